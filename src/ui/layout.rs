use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use super::components::{
    render_error, render_events, render_form, render_keybindings, render_loading,
};
use super::feed::{render_result, FeedView};
use crate::app::App;

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Form
            Constraint::Min(3),    // Result
            Constraint::Length(2), // Keybindings bar
        ])
        .split(frame.area());

    render_form(frame, app, chunks[0]);
    render_result_area(frame, app, chunks[1]);
    render_keybindings(frame, app, chunks[2]);
}

/// The previous result stays on screen until a new one replaces it
fn render_result_area(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.state();

    match render_result(state.result.as_ref()) {
        FeedView::Empty if state.fetching => render_loading(frame, area, "Fetching events..."),
        FeedView::Empty => {}
        FeedView::Lines(lines) => render_events(frame, area, &lines, app.scroll_offset),
        FeedView::Error(message) => render_error(frame, area, &message),
    }
}
