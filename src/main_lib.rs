// Library module containing testable functions from main.rs

use crate::app::App;
use crate::cli::ViewArgs;
use crate::command::Command;
use crate::config::{Config, LayoutMode};
use crate::content::PageRegistry;
use crate::error::{DocsError, Result};
use crate::executor::Executor;
use crate::nav_tree::NavTree;
use crate::presenter::{NavPresenter, PresentationKind};
use crate::screenshot;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Build the site tree. A malformed tree stops the program here.
pub fn load_tree() -> Result<Arc<NavTree>> {
    let tree = NavTree::site()?;
    log::info!("load_tree: {} navigation nodes", tree.len());
    Ok(Arc::new(tree))
}

/// Load configuration and apply command-line overrides
pub fn load_config(config_path: Option<&Path>, layout: Option<&str>) -> Result<Config> {
    let mut config = Config::load(config_path)?;
    if let Some(layout) = layout {
        config.layout.mode = LayoutMode::from_string(layout)?;
    }
    Ok(config)
}

pub fn build_app(config_path: Option<&Path>, view: &ViewArgs, width: u16, height: u16) -> Result<App> {
    let config = load_config(config_path, view.layout.as_deref())?;
    Ok(App::new(load_tree()?, config, &view.location, width, height))
}

pub fn parse_command(command_str: &str) -> Result<Command> {
    Command::from_string(command_str).map_err(DocsError::UnknownCommand)
}

pub fn take_screenshot(
    config_path: Option<&Path>,
    view: &ViewArgs,
    command_str: Option<&str>,
    output_path: Option<&str>,
    width: u16,
    height: u16,
) -> Result<()> {
    let mut app = build_app(config_path, view, width, height)?;
    if let Some(command_str) = command_str {
        Executor::execute(&mut app, parse_command(command_str)?);
    }
    screenshot::generate_screenshot(&app, output_path)
}

pub fn execute_command(
    config_path: Option<&Path>,
    view: &ViewArgs,
    command_str: &str,
    output_path: Option<&str>,
    generate_screenshot: bool,
    width: u16,
    height: u16,
) -> Result<()> {
    let mut app = build_app(config_path, view, width, height)?;
    let command = parse_command(command_str)?;
    log::info!("execute_command: {}", command.to_string());

    let result = Executor::execute(&mut app, command);
    if let Some(message) = &result.status_message {
        eprintln!("Status: {}", message);
    }

    let json = serde_json::to_string_pretty(&app.snapshot())?;
    match output_path {
        Some(path) => {
            fs::write(path, json)?;
            println!("State saved to: {}", path);
        }
        None => println!("{}", json),
    }

    if generate_screenshot {
        println!();
        screenshot::generate_screenshot(&app, None)?;
    }

    Ok(())
}

/// Presentation tree of a freshly mounted desktop panel, as JSON
pub fn nav_json(location: &str) -> Result<String> {
    let presenter = NavPresenter::mount(PresentationKind::DesktopPanel, load_tree()?, location);
    Ok(serde_json::to_string_pretty(&presenter.render(location))?)
}

pub fn list_pages() -> String {
    PageRegistry::site()
        .pages()
        .iter()
        .map(|page| format!("{:<45} {}\n", page.path, page.title))
        .collect()
}
