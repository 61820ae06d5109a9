use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::fs;

use crate::{app::App, error::Result, ui};

/// Draw one frame of `app` into an off-screen buffer and return it as text
pub fn render_to_string(app: &App, width: u16, height: u16) -> Result<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;

    terminal.draw(|frame| {
        ui::draw(frame, app);
    })?;

    let buffer = terminal.backend().buffer().clone();
    Ok(buffer_to_string(&buffer))
}

pub fn generate_screenshot(app: &App, output_path: Option<&str>) -> Result<()> {
    let screenshot = render_to_string(app, app.width, app.height)?;

    match output_path {
        Some(path) => {
            fs::write(path, screenshot)?;
            println!("Screenshot saved to: {}", path);
        }
        None => {
            print!("{}", screenshot);
        }
    }

    Ok(())
}

pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();

    for y in 0..buffer.area().height {
        for x in 0..buffer.area().width {
            let cell = &buffer[(x, y)];
            let sym = cell.symbol();

            // Use a space for empty cells to make output more readable
            if sym.is_empty() {
                result.push(' ');
            } else {
                result.push_str(sym);
            }
        }
        result.push('\n');
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::nav_tree::NavTree;
    use std::sync::Arc;

    #[test]
    fn test_buffer_to_string() {
        let backend = TestBackend::new(10, 3);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                use ratatui::{
                    text::Text,
                    widgets::{Block, Borders, Paragraph},
                };

                let paragraph = Paragraph::new(Text::from("Test"))
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(paragraph, frame.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let result = buffer_to_string(&buffer);

        assert!(result.contains("Test"));
        assert_eq!(result.lines().count(), 3);
    }

    #[test]
    fn test_render_to_string_has_requested_size() {
        let tree = Arc::new(NavTree::site().unwrap());
        let app = App::new(tree, Config::default(), "/examples", 120, 30);
        let screen = render_to_string(&app, 120, 30).unwrap();
        assert_eq!(screen.lines().count(), 30);
        assert!(screen.lines().all(|line| line.chars().count() == 120));
    }
}
