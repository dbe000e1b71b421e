use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_events(frame: &mut Frame, area: Rect, lines: &[String], scroll: u16) {
    let text: Vec<Line> = lines
        .iter()
        .map(|line| Line::styled(line.as_str(), Style::default().fg(Color::White)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" Events ({}) ", lines.len()));

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}
