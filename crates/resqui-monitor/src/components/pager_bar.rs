//! Page indicator shown under paged listings.

use crate::ui::Theme;
use ratatui::{
    style::Style,
    text::{Line, Span},
};
use resqui_state::Pager;

pub struct PagerBar;

impl PagerBar {
    /// `None` when the listing is empty and paging is hidden.
    pub fn line(pager: &Pager, total: u64, visible: bool, busy: bool, theme: &Theme) -> Option<Line<'static>> {
        if !visible {
            return None;
        }

        let enabled = |allowed: bool| {
            if allowed && !busy {
                Style::default().fg(theme.foreground)
            } else {
                Style::default().fg(theme.muted)
            }
        };

        Some(Line::from(vec![
            Span::styled("← p ", enabled(!pager.at_start())),
            Span::styled(
                format!("Page {}", pager.page_number()),
                Style::default().fg(theme.highlight),
            ),
            Span::styled(" n →", enabled(!pager.at_end(total))),
        ]))
    }
}
