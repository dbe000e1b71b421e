use crossterm::event::{KeyCode, KeyModifiers};

use crate::domain::types::FetchResult;

#[derive(Debug)]
pub enum Action {
    Input { code: KeyCode, modifiers: KeyModifiers },
    EventsLoaded(FetchResult),
}
