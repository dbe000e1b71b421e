use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let loading = Paragraph::new(Line::from(vec![Span::styled(
        format!("⏳ {}", message),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )]))
    .block(block);

    frame.render_widget(loading, area);
}
