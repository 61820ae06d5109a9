use ratatui::style::Color;

/// Colors used by the documentation browser
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    pub active_border: Color,
    pub inactive_border: Color,

    // Title bar
    pub title_bg: Color,
    pub title_fg: Color,

    // Sidebar
    pub nav_default: Color,
    pub nav_current_fg: Color,
    pub nav_current_bg: Color,
    pub nav_active_path: Color,
    pub nav_cursor_fg: Color,
    pub nav_cursor_bg: Color,

    // Content
    pub content_text: Color,
    pub content_accent: Color,
    pub not_found: Color,

    // Mobile menu button
    pub menu_button_fg: Color,
    pub menu_button_bg: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_help_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            active_border: Color::Yellow,
            inactive_border: Color::DarkGray,

            title_bg: Color::Blue,
            title_fg: Color::White,

            nav_default: Color::Reset,
            nav_current_fg: Color::Black,
            nav_current_bg: Color::Cyan,
            nav_active_path: Color::Cyan,
            nav_cursor_fg: Color::Black,
            nav_cursor_bg: Color::White,

            content_text: Color::Reset,
            content_accent: Color::Cyan,
            not_found: Color::Red,

            menu_button_fg: Color::White,
            menu_button_bg: Color::Blue,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_help_text: Color::Gray,
        }
    }
}

pub fn get_theme() -> Theme {
    Theme::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_page_stands_out_from_default() {
        let theme = get_theme();
        assert_ne!(theme.nav_current_bg, theme.nav_default);
        assert_eq!(theme.active_border, Color::Yellow);
    }

    #[test]
    fn test_cursor_and_current_are_distinct() {
        let theme = Theme::default();
        assert_ne!(theme.nav_cursor_bg, theme.nav_current_bg);
    }
}
