use crossterm::event::{KeyCode, KeyModifiers};

use crate::app::App;
use crate::command::Command;

const PAGE: u16 = 10;

pub fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Vec<Command> {
    match (code, modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.should_quit = true;
            Vec::new()
        }
        (KeyCode::Enter, _) => submit(app),
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => {
            app.focus_next();
            Vec::new()
        }
        (KeyCode::Backspace, _) => {
            app.delete_char();
            Vec::new()
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            app.clear_field();
            Vec::new()
        }
        (KeyCode::Down, _) => {
            app.scroll_down(1);
            Vec::new()
        }
        (KeyCode::Up, _) => {
            app.scroll_up(1);
            Vec::new()
        }
        (KeyCode::PageDown, _) => {
            app.scroll_down(PAGE);
            Vec::new()
        }
        (KeyCode::PageUp, _) => {
            app.scroll_up(PAGE);
            Vec::new()
        }
        (KeyCode::Char(c), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            app.insert_char(c);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn submit(app: &mut App) -> Vec<Command> {
    let Some(inputs) = app.begin_submit() else {
        tracing::debug!(
            fetching = app.state().fetching,
            "Submission not admitted"
        );
        return Vec::new();
    };

    tracing::info!("Fetching events for {}/{}", inputs.owner, inputs.repo);
    vec![Command::FetchEvents {
        owner: inputs.owner,
        repo: inputs.repo,
    }]
}
