use crate::config::LayoutMode;
use serde::{Deserialize, Serialize};

/// Represents all possible user commands that can be executed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    // Global commands
    Quit,
    SwitchFocus,
    Back,
    Home,
    GoTo(String),

    // Sidebar commands
    SelectPrevious,
    SelectNext,
    SelectFirst,
    SelectLast,
    ToggleNode,
    OpenSelected,

    // Mobile overlay
    ToggleMenu,
    CloseMenu,

    // Content commands
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // Layout commands
    SetLayout(LayoutMode),
    Resize(u16, u16),

    // Multi-step commands for testing
    Sequence(Vec<Command>),
}

impl Command {
    /// Parse a command from a string representation
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quit" | "q" => Ok(Command::Quit),
            "focus" | "tab" => Ok(Command::SwitchFocus),
            "back" | "b" => Ok(Command::Back),
            "home" | "h" => Ok(Command::Home),

            "up" | "k" => Ok(Command::SelectPrevious),
            "down" | "j" => Ok(Command::SelectNext),
            "first" => Ok(Command::SelectFirst),
            "last" => Ok(Command::SelectLast),
            "toggle" | "space" => Ok(Command::ToggleNode),
            "open" | "enter" => Ok(Command::OpenSelected),

            "menu" | "m" => Ok(Command::ToggleMenu),
            "close_menu" | "escape" => Ok(Command::CloseMenu),

            "scroll_up" => Ok(Command::ScrollUp),
            "scroll_down" => Ok(Command::ScrollDown),
            "page_up" => Ok(Command::PageUp),
            "page_down" => Ok(Command::PageDown),

            _ => {
                // Locations keep their case
                if let Some(location) = s.strip_prefix("goto:") {
                    if location.is_empty() {
                        return Err("goto needs a location".to_string());
                    }
                    return Ok(Command::GoTo(location.to_string()));
                }

                if let Some(mode) = s.strip_prefix("layout:") {
                    return LayoutMode::from_string(mode).map(Command::SetLayout);
                }

                if let Some(size) = s.strip_prefix("resize:") {
                    return parse_size(size)
                        .map(|(width, height)| Command::Resize(width, height))
                        .ok_or_else(|| format!("Invalid size '{}', expected WIDTHxHEIGHT", size));
                }

                if s.starts_with("sequence:[") && s.ends_with(']') {
                    // Parse sequence: sequence:[cmd1,cmd2,cmd3]
                    let inner = &s["sequence:[".len()..s.len() - 1];
                    if inner.trim().is_empty() {
                        return Ok(Command::Sequence(vec![]));
                    }

                    let mut commands = Vec::new();
                    for cmd_str in inner.split(',') {
                        let cmd_str = cmd_str.trim();
                        match Command::from_string(cmd_str) {
                            Ok(cmd) => commands.push(cmd),
                            Err(e) => {
                                return Err(format!(
                                    "Invalid command in sequence '{}': {}",
                                    cmd_str, e
                                ))
                            }
                        }
                    }

                    return Ok(Command::Sequence(commands));
                }

                Err(format!("Unknown command: {}", s))
            }
        }
    }

    /// Convert command to string representation
    pub fn to_string(&self) -> String {
        match self {
            Command::Quit => "quit".to_string(),
            Command::SwitchFocus => "focus".to_string(),
            Command::Back => "back".to_string(),
            Command::Home => "home".to_string(),
            Command::GoTo(location) => format!("goto:{}", location),

            Command::SelectPrevious => "up".to_string(),
            Command::SelectNext => "down".to_string(),
            Command::SelectFirst => "first".to_string(),
            Command::SelectLast => "last".to_string(),
            Command::ToggleNode => "toggle".to_string(),
            Command::OpenSelected => "open".to_string(),

            Command::ToggleMenu => "menu".to_string(),
            Command::CloseMenu => "close_menu".to_string(),

            Command::ScrollUp => "scroll_up".to_string(),
            Command::ScrollDown => "scroll_down".to_string(),
            Command::PageUp => "page_up".to_string(),
            Command::PageDown => "page_down".to_string(),

            Command::SetLayout(mode) => format!("layout:{}", mode.as_str()),
            Command::Resize(width, height) => format!("resize:{}x{}", width, height),

            Command::Sequence(commands) => {
                format!(
                    "sequence:[{}]",
                    commands
                        .iter()
                        .map(|c| c.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
        }
    }
}

fn parse_size(size: &str) -> Option<(u16, u16)> {
    let (width, height) = size.split_once('x')?;
    Some((width.trim().parse().ok()?, height.trim().parse().ok()?))
}
