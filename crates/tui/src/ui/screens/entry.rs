use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{
    app::{AppState, EntryField},
    ui::theme::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let block = Block::default()
        .title(" novo custo ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Categoria label
            Constraint::Length(1), // Category picker
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Estabelecimento label
            Constraint::Length(1), // Establishment input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Valor label
            Constraint::Length(1), // Amount input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Message
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let entry = &state.entry;

    render_label(frame, rows[0], "Categoria", &theme);
    render_category_picker(frame, rows[1], state, &theme);

    render_label(frame, rows[3], "Estabelecimento", &theme);
    render_input(
        frame,
        rows[4],
        &entry.establishment,
        entry.focus == EntryField::Establishment,
        &theme,
    );

    render_label(frame, rows[6], "Valor", &theme);
    render_input(
        frame,
        rows[7],
        &entry.amount,
        entry.focus == EntryField::Amount,
        &theme,
    );

    if let Some(message) = &entry.message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            )),
            rows[9],
        );
    }
}

fn render_label(frame: &mut Frame<'_>, area: Rect, label: &str, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Span::styled(
            label.to_string(),
            Style::default().fg(theme.text_muted),
        )),
        area,
    );
}

fn render_category_picker(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let entry = &state.entry;
    let focused = entry.focus == EntryField::Category;

    let name = entry
        .selected_category
        .and_then(|idx| entry.categories.get(idx))
        .map(|category| category.name.as_str());

    let display = match name {
        Some(name) if focused => format!("‹ {name} ›"),
        Some(name) => name.to_string(),
        None if focused => "‹ Selecione uma categoria ›".to_string(),
        None => "Selecione uma categoria".to_string(),
    };

    let style = if focused {
        Style::default().fg(theme.accent)
    } else if name.is_some() {
        Style::default().fg(theme.text)
    } else {
        Style::default().fg(theme.text_muted)
    };

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(display, style))),
        area,
    );
}

/// Renders a one-line input field: the value plus a cursor bar when focused.
fn render_input(frame: &mut Frame<'_>, area: Rect, value: &str, focused: bool, theme: &Theme) {
    let cursor = if focused { "│" } else { "" };
    let display = format!("{value}{cursor}");

    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    frame.render_widget(Paragraph::new(Span::styled(display, style)), area);
}
