use crate::app::App;
use crate::command::Command;
use crate::domain::types::FetchResult;

pub fn handle_events_loaded(app: &mut App, result: FetchResult) -> Vec<Command> {
    tracing::debug!(success = result.is_success(), "Fetch completed");
    app.finish_submit(result);
    Vec::new()
}
