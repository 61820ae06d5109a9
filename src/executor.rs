use crate::{
    app::App,
    command::Command,
    presenter::Expansion,
};

const PAGE_STEP: i32 = 10;

/// Result of executing a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub status_message: Option<String>,
    pub should_quit: bool,
}

/// Applies commands to the application state, one at a time
pub struct Executor;

impl Executor {
    /// Execute a command and report what it did
    pub fn execute(app: &mut App, command: Command) -> ExecutionResult {
        let mut status_message = None;

        match command {
            Command::Quit => {
                app.should_quit = true;
                status_message = Some("Goodbye!".to_string());
            }

            Command::SwitchFocus => {
                app.switch_focus();
                status_message = Some(format!("Focus: {:?}", app.focus));
            }

            Command::Back => {
                app.back();
                status_message = Some(app.status_message.clone());
            }

            Command::Home => {
                app.home();
                status_message = Some(app.status_message.clone());
            }

            Command::GoTo(location) => {
                app.navigate_to(&location);
                status_message = Some(app.status_message.clone());
            }

            // Sidebar commands
            Command::SelectPrevious => {
                if app.sidebar_focused() {
                    Self::execute_select(app, &mut status_message, |p, l| p.select_previous(l));
                }
            }

            Command::SelectNext => {
                if app.sidebar_focused() {
                    Self::execute_select(app, &mut status_message, |p, l| p.select_next(l));
                }
            }

            Command::SelectFirst => {
                if app.sidebar_focused() {
                    Self::execute_select(app, &mut status_message, |p, l| p.select_first(l));
                }
            }

            Command::SelectLast => {
                if app.sidebar_focused() {
                    Self::execute_select(app, &mut status_message, |p, l| p.select_last(l));
                }
            }

            Command::ToggleNode => {
                if app.sidebar_focused() {
                    Self::execute_toggle(app, &mut status_message);
                }
            }

            Command::OpenSelected => {
                if app.sidebar_focused() && app.open_selected() {
                    status_message = Some(app.status_message.clone());
                }
            }

            // Mobile overlay
            Command::ToggleMenu => {
                status_message = Some(if app.toggle_menu() {
                    if app.mobile.is_visible() {
                        "Menu opened".to_string()
                    } else {
                        "Menu closed".to_string()
                    }
                } else {
                    "Menu is only available in the mobile layout".to_string()
                });
            }

            Command::CloseMenu => {
                if app.close_menu() {
                    status_message = Some("Menu closed".to_string());
                }
            }

            // Content commands
            Command::ScrollUp => app.scroll_content(-1),
            Command::ScrollDown => app.scroll_content(1),
            Command::PageUp => app.scroll_content(-PAGE_STEP),
            Command::PageDown => app.scroll_content(PAGE_STEP),

            // Layout commands
            Command::SetLayout(mode) => {
                app.set_layout_mode(mode);
                status_message = Some(format!("Layout: {:?}", app.layout));
            }

            Command::Resize(width, height) => {
                app.resize(width, height);
            }

            Command::Sequence(commands) => {
                for cmd in commands {
                    let result = Self::execute(app, cmd);
                    if result.status_message.is_some() {
                        status_message = result.status_message;
                    }
                    if result.should_quit {
                        break;
                    }
                }
            }
        }

        if let Some(ref message) = status_message {
            app.status_message = message.clone();
        }

        ExecutionResult {
            status_message,
            should_quit: app.should_quit,
        }
    }
}

// Implementation of specific command handlers
impl Executor {
    fn execute_select<F>(app: &mut App, status_message: &mut Option<String>, step: F)
    where
        F: FnOnce(&mut crate::presenter::NavPresenter, &str) -> bool,
    {
        let location = app.location.clone();
        if step(app.active_presenter_mut(), &location) {
            if let Some(path) = app.active_presenter().selected() {
                let title = app
                    .tree
                    .find_node(path)
                    .map(|node| node.title.clone())
                    .unwrap_or_else(|| path.to_string());
                *status_message = Some(title);
            }
        }
    }

    fn execute_toggle(app: &mut App, status_message: &mut Option<String>) {
        *status_message = Some(match app.toggle_selected() {
            Some(Expansion::Expanded) => "Expanded section".to_string(),
            Some(Expansion::Collapsed) => "Collapsed section".to_string(),
            None => "Nothing to expand".to_string(),
        });
    }
}
