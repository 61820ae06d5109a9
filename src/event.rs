use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::command::Command;
use crate::error::Result;
use crate::executor::Executor;

pub fn handle_event(event: Event, app: &mut App) -> Result<()> {
    let command = match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => key_to_command(key, app),
        Event::Resize(width, height) => Some(Command::Resize(width, height)),
        _ => None,
    };

    if let Some(command) = command {
        log::debug!("handle_event: {}", command.to_string());
        Executor::execute(app, command);
    }

    Ok(())
}

/// Translate a key press into a command for the current focus
pub fn key_to_command(key: KeyEvent, app: &App) -> Option<Command> {
    let bindings = &app.config.keybindings;

    // Global keybindings
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Command::Quit)
        }
        KeyCode::Char(c) if c == bindings.quit => return Some(Command::Quit),
        KeyCode::Char(c) if c == bindings.toggle_menu => return Some(Command::ToggleMenu),
        KeyCode::Char(c) if c == bindings.back => return Some(Command::Back),
        KeyCode::Char(c) if c == bindings.home => return Some(Command::Home),
        KeyCode::Tab | KeyCode::BackTab => return Some(Command::SwitchFocus),
        KeyCode::Esc => return Some(Command::CloseMenu),
        _ => {}
    }

    if app.sidebar_focused() {
        sidebar_command(key.code)
    } else {
        content_command(key.code)
    }
}

fn sidebar_command(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => Some(Command::SelectPrevious),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::SelectNext),
        KeyCode::Home | KeyCode::Char('g') => Some(Command::SelectFirst),
        KeyCode::End | KeyCode::Char('G') => Some(Command::SelectLast),
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => Some(Command::ToggleNode),
        KeyCode::Enter => Some(Command::OpenSelected),
        KeyCode::PageUp => Some(Command::PageUp),
        KeyCode::PageDown => Some(Command::PageDown),
        _ => None,
    }
}

fn content_command(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => Some(Command::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::ScrollDown),
        KeyCode::PageUp => Some(Command::PageUp),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(Command::PageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::nav_tree::NavTree;
    use std::sync::Arc;

    fn app(width: u16) -> App {
        App::new(Arc::new(NavTree::site().unwrap()), Config::default(), "/", width, 40)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_depend_on_focus() {
        let mut app = app(120);
        assert_eq!(key_to_command(press(KeyCode::Down), &app), Some(Command::SelectNext));
        app.switch_focus();
        assert_eq!(key_to_command(press(KeyCode::Down), &app), Some(Command::ScrollDown));
    }

    #[test]
    fn test_global_keys() {
        let app = app(120);
        assert_eq!(key_to_command(press(KeyCode::Char('q')), &app), Some(Command::Quit));
        assert_eq!(key_to_command(press(KeyCode::Char('m')), &app), Some(Command::ToggleMenu));
        assert_eq!(key_to_command(press(KeyCode::Char('b')), &app), Some(Command::Back));
        assert_eq!(key_to_command(press(KeyCode::Tab), &app), Some(Command::SwitchFocus));
        assert_eq!(
            key_to_command(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &app),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_toggle_keys() {
        let app = app(120);
        for code in [KeyCode::Left, KeyCode::Right, KeyCode::Char(' ')] {
            assert_eq!(key_to_command(press(code), &app), Some(Command::ToggleNode));
        }
        assert_eq!(key_to_command(press(KeyCode::Enter), &app), Some(Command::OpenSelected));
    }

    #[test]
    fn test_rebound_keys() {
        let mut app = app(120);
        app.config.keybindings.quit = 'x';
        assert_eq!(key_to_command(press(KeyCode::Char('x')), &app), Some(Command::Quit));
        assert_eq!(key_to_command(press(KeyCode::Char('q')), &app), None);
    }

    #[test]
    fn test_resize_event_relayouts() {
        let mut app = app(120);
        handle_event(Event::Resize(70, 30), &mut app).unwrap();
        assert_eq!(app.width, 70);
        assert_eq!(app.layout, crate::app::ActiveLayout::Mobile);
    }

    #[test]
    fn test_menu_key_opens_overlay_on_mobile() {
        let mut app = app(70);
        handle_event(Event::Key(press(KeyCode::Char('m'))), &mut app).unwrap();
        assert!(app.mobile.is_visible());
        handle_event(Event::Key(press(KeyCode::Esc)), &mut app).unwrap();
        assert!(!app.mobile.is_visible());
    }
}
