//! Tab strip rendered into a block title.

use crate::ui::Theme;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use resqui_state::Route;

pub struct ViewTabs;

impl ViewTabs {
    /// Something like ` default [mail] Failed Workers `.
    pub fn title_line(tabs: &[Route], current: &Route, theme: &Theme) -> Line<'static> {
        let mut spans = vec![Span::raw(" ")];

        for (i, tab) in tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            if tab == current {
                spans.push(Span::styled(
                    format!("[{}]", tab.label()),
                    Style::default()
                        .fg(theme.warning)
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(
                    tab.label().to_string(),
                    Style::default().fg(theme.muted),
                ));
            }
        }

        spans.push(Span::raw(" "));
        Line::from(spans)
    }
}
