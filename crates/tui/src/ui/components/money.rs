use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Formats an expense amount the way the backend's users read it.
pub fn format_amount(amount: f64) -> String {
    format!("R$ {amount:.2}")
}

/// Styled span for an expense amount.
#[must_use]
pub fn styled_amount(amount: f64, theme: &Theme) -> Span<'static> {
    Span::styled(format_amount(amount), Style::default().fg(theme.positive))
}
