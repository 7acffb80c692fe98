use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, ExpensesMode},
    ui::{
        components::{date, money},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(1), // Search line
            Constraint::Min(0),    // List
        ])
        .split(area);

    render_header(frame, layout[0], state, &theme);
    render_search(frame, layout[1], state, &theme);
    render_list(frame, layout[2], state, &theme);
    render_confirm_modal(frame, area, state, &theme);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut line = vec![
        Span::styled("Total", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}   ", state.expenses.items.len())),
        Span::styled("Exibindo", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}", state.expenses.filtered.len())),
    ];

    if let Some(err) = &state.expenses.error {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.as_str(), Style::default().fg(theme.error)));
    }

    let block = Block::default().borders(Borders::ALL).title("Custos");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_search(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let searching = state.expenses.mode == ExpensesMode::Search;
    let query = state.expenses.query.as_str();

    let line = if query.is_empty() && !searching {
        Line::from(Span::styled(
            "Pesquisar por categoria ou estabelecimento (/)",
            Style::default().fg(theme.text_muted),
        ))
    } else {
        let cursor = if searching { "│" } else { "" };
        let style = if searching {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.text)
        };
        Line::from(vec![
            Span::styled("Pesquisar", Style::default().fg(theme.text_muted)),
            Span::styled(format!(": {query}{cursor}"), style),
        ])
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    if state.expenses.filtered.is_empty() {
        let block = Block::default().borders(Borders::ALL);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Nenhum custo encontrado.",
                Style::default().fg(theme.text_muted),
            )))
            .block(block)
            .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let items = state
        .expenses
        .filtered
        .iter()
        .map(|expense| {
            let created = date::format_create_dt(&expense.create_dt);
            let line = Line::from(vec![
                Span::styled(
                    format!("{created}  "),
                    Style::default().fg(theme.text_muted),
                ),
                Span::raw(format!("{:<18} ", expense.category_name)),
                Span::raw(format!("{:<28} ", expense.establishment_name)),
                money::styled_amount(expense.amount, theme),
            ]);
            ListItem::new(line)
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.expenses.selected));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Calculates a centered rect for the confirmation box.
fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

fn render_confirm_modal(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(id) = state.expenses.delete.pending_id() else {
        return;
    };

    let staged = state
        .expenses
        .items
        .iter()
        .find(|expense| expense.id == id);

    let card_area = centered_box(46, 7, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" confirmação ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.error));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::raw("Deseja realmente excluir este custo?")),
    ];

    if let Some(expense) = staged {
        lines.push(Line::from(Span::styled(
            format!(
                "{} — {} ({})",
                expense.category_name,
                expense.establishment_name,
                money::format_amount(expense.amount)
            ),
            Style::default().fg(theme.text_muted),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(theme.accent)),
        Span::raw(" excluir   "),
        Span::styled("Esc", Style::default().fg(theme.accent)),
        Span::raw(" cancelar"),
    ]));

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}
