use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{ActiveLayout, App, Focus};
use crate::presenter::{Expansion, NavPresenter, NavRow};
use crate::theme::{get_theme, Theme};

pub const APP_TITLE: &str = "Serverpod Swagger Documentation";
pub const SIDEBAR_TITLE: &str = " Documentation ";
pub const MENU_BUTTON_OPEN: &str = " ☰ Menu ";
pub const MENU_BUTTON_CLOSE: &str = " ✕ Close ";

pub fn draw(frame: &mut Frame, app: &App) {
    let theme = get_theme();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_title_bar(frame, &theme, rows[0]);

    match app.layout {
        ActiveLayout::Desktop => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(app.config.layout.sidebar_width),
                    Constraint::Min(0),
                ])
                .split(rows[1]);
            draw_sidebar(frame, app, &app.desktop, &theme, columns[0]);
            draw_content(frame, app, &theme, columns[1]);
        }
        ActiveLayout::Mobile => {
            draw_content(frame, app, &theme, rows[1]);
            if app.mobile.is_visible() {
                let width = app.config.layout.sidebar_width.min(rows[1].width);
                let overlay = Rect::new(rows[1].x, rows[1].y, width, rows[1].height);
                frame.render_widget(Clear, overlay);
                draw_sidebar(frame, app, &app.mobile, &theme, overlay);
            }
            draw_menu_button(frame, app, &theme, rows[1]);
        }
    }

    draw_status_bar(frame, app, &theme, rows[2]);
}

fn draw_title_bar(frame: &mut Frame, theme: &Theme, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {}", APP_TITLE),
        Style::default()
            .fg(theme.title_fg)
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(theme.title_bg));
    frame.render_widget(title, area);
}

/// One sidebar row: indentation, a chevron for branches, the title
pub fn row_text(row: &NavRow) -> String {
    let chevron = match row.expansion {
        Some(Expansion::Expanded) => "▾ ",
        Some(Expansion::Collapsed) => "▸ ",
        None => "  ",
    };
    format!("{}{}{}", "  ".repeat(row.depth), chevron, row.title)
}

fn row_style(row: &NavRow, theme: &Theme) -> Style {
    if row.is_current {
        Style::default()
            .fg(theme.nav_current_fg)
            .bg(theme.nav_current_bg)
            .add_modifier(Modifier::BOLD)
    } else if row.on_active_path {
        Style::default()
            .fg(theme.nav_active_path)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.nav_default)
    }
}

fn draw_sidebar(frame: &mut Frame, app: &App, presenter: &NavPresenter, theme: &Theme, area: Rect) {
    let is_active = app.focus == Focus::Sidebar;
    let border_style = if is_active {
        Style::default().fg(theme.active_border)
    } else {
        Style::default().fg(theme.inactive_border)
    };

    let block = Block::default()
        .title(SIDEBAR_TITLE)
        .borders(Borders::ALL)
        .border_style(border_style);

    let rows = presenter.visible_rows(&app.location);
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| ListItem::new(Line::from(Span::styled(row_text(row), row_style(row, theme)))))
        .collect();

    let highlight_style = if is_active {
        Style::default()
            .fg(theme.nav_cursor_fg)
            .bg(theme.nav_cursor_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("");

    let mut list_state = ListState::default();
    list_state.select(presenter.selected_index(&app.location));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_content(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let is_active = app.focus == Focus::Content;
    let border_style = if is_active {
        Style::default().fg(theme.active_border)
    } else {
        Style::default().fg(theme.inactive_border)
    };

    let title = match app.current_page() {
        Some(page) => format!(" {} ", page.title),
        None => " Page not found ".to_string(),
    };
    let title_style = if app.current_page().is_some() {
        Style::default()
    } else {
        Style::default().fg(theme.not_found)
    };

    let block = Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    let paragraph = Paragraph::new(app.content_text())
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.content_scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Floating disclosure for the mobile overlay, pinned to the top right
fn draw_menu_button(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let label = if app.mobile.is_visible() {
        MENU_BUTTON_CLOSE
    } else {
        MENU_BUTTON_OPEN
    };
    let width = (label.chars().count() as u16).min(area.width);
    if width == 0 || area.height == 0 {
        return;
    }
    let x = area.x + area.width.saturating_sub(width + 1);
    let button = Rect::new(x, area.y, width, 1);

    let paragraph = Paragraph::new(Span::styled(
        label,
        Style::default()
            .fg(theme.menu_button_fg)
            .bg(theme.menu_button_bg)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Clear, button);
    frame.render_widget(paragraph, button);
}

fn draw_status_bar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let keys = &app.config.keybindings;
    let help_text = match (app.layout, app.sidebar_focused()) {
        (_, true) => format!(
            "↑↓: Move | Space: Expand/Collapse | Enter: Open | Tab: Content | {}: Back | {}: Quit",
            keys.back, keys.quit
        ),
        (ActiveLayout::Mobile, false) => format!(
            "{}: Menu | ↑↓: Scroll | {}: Back | {}: Home | {}: Quit",
            keys.toggle_menu, keys.back, keys.home, keys.quit
        ),
        (ActiveLayout::Desktop, false) => format!(
            "↑↓: Scroll | PgUp/PgDn: Page | Tab: Sidebar | {}: Back | {}: Quit",
            keys.back, keys.quit
        ),
    };

    let status_line = Line::from(vec![
        Span::styled(app.status_message.clone(), Style::default().fg(theme.status_bar_fg)),
        Span::raw(" | "),
        Span::styled(help_text, Style::default().fg(theme.status_help_text)),
    ]);

    let paragraph = Paragraph::new(status_line).style(Style::default().bg(theme.status_bar_bg));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(depth: usize, expansion: Option<Expansion>) -> NavRow {
        NavRow {
            title: "Configuration".to_string(),
            path: "/docs/configuration".to_string(),
            depth,
            is_current: false,
            on_active_path: false,
            expansion,
        }
    }

    #[test]
    fn test_row_text_chevrons() {
        assert_eq!(row_text(&row(0, Some(Expansion::Expanded))), "▾ Configuration");
        assert_eq!(row_text(&row(0, Some(Expansion::Collapsed))), "▸ Configuration");
        assert_eq!(row_text(&row(1, None)), "    Configuration");
    }

    #[test]
    fn test_current_row_style_wins_over_active_path() {
        let theme = Theme::default();
        let mut current = row(0, None);
        current.is_current = true;
        current.on_active_path = true;
        assert_eq!(row_style(&current, &theme).bg, Some(theme.nav_current_bg));

        let mut ancestor = row(0, Some(Expansion::Expanded));
        ancestor.on_active_path = true;
        let style = row_style(&ancestor, &theme);
        assert_eq!(style.fg, Some(theme.nav_active_path));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }
}
