mod actions;
mod form;

use crate::action::Action;
use crate::app::App;
use crate::command::Command;

pub fn update(app: &mut App, action: Action) -> Vec<Command> {
    match action {
        Action::Input { code, modifiers } => form::handle_input(app, code, modifiers),
        Action::EventsLoaded(result) => actions::handle_events_loaded(app, result),
    }
}
