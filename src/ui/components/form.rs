use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Field};

const MARKER_WIDTH: u16 = 2;
const LABEL_WIDTH: usize = 8;

/// Owner and repo inputs followed by the submit control
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    for field in [Field::Owner, Field::Repo] {
        let focused = field == app.focus;
        let marker = if focused { "▶ " } else { "  " };
        let value_style = if focused {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{:<width$}", field.label(), width = LABEL_WIDTH),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(app.field(field), value_style),
        ]));
    }

    let button = if app.state().fetching {
        Span::styled(
            "[ Fetching... ]",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else if app.can_submit() {
        Span::styled(
            "[ Get events ]",
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[ Get events ]", Style::default().fg(Color::DarkGray))
    };
    lines.push(Line::from(vec![Span::raw("  "), button]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Repository events ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);

    frame.render_widget(Paragraph::new(lines).block(block), area);

    let row = match app.focus {
        Field::Owner => 0,
        Field::Repo => 1,
    };
    let typed = u16::try_from(app.field(app.focus).chars().count()).unwrap_or(u16::MAX);
    let x = inner
        .x
        .saturating_add(MARKER_WIDTH + LABEL_WIDTH as u16)
        .saturating_add(typed);
    if x < inner.right() && row < inner.height {
        frame.set_cursor_position((x, inner.y + row));
    }
}
