use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Failure message in a red frame, set apart from the event list
pub fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            " Error ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));

    let error = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default().fg(Color::LightRed),
    )))
    .block(block)
    .wrap(Wrap { trim: false });

    frame.render_widget(error, area);
}
