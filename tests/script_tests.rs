use std::sync::Arc;
use swagger_docs::app::{ActiveLayout, App, AppSnapshot, Focus};
use swagger_docs::command::Command;
use swagger_docs::config::Config;
use swagger_docs::executor::Executor;
use swagger_docs::nav_tree::NavTree;
use swagger_docs::presenter::Expansion;

/// Runs newline-separated command scripts against a fresh app.
/// Blank lines and lines starting with `#` are skipped.
pub struct ScriptTestDriver {
    app: App,
}

impl ScriptTestDriver {
    pub fn new(location: &str, width: u16, height: u16) -> Self {
        let tree = Arc::new(NavTree::site().unwrap());
        Self {
            app: App::new(tree, Config::default(), location, width, height),
        }
    }

    pub fn run(&mut self, script: &str) -> Result<AppSnapshot, String> {
        for (number, line) in script.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let command =
                Command::from_string(line).map_err(|e| format!("line {}: {}", number + 1, e))?;
            let result = Executor::execute(&mut self.app, command);
            if result.should_quit {
                break;
            }
        }
        Ok(self.app.snapshot())
    }
}

#[test]
fn test_mobile_browse_session() {
    let mut driver = ScriptTestDriver::new("/", 70, 30);
    let snapshot = driver
        .run(
            "
            # open the overlay and walk into Configuration
            menu
            down
            down
            down
            toggle
            down
            open
            ",
        )
        .unwrap();

    assert_eq!(snapshot.layout, ActiveLayout::Mobile);
    assert_eq!(snapshot.location, "/docs/configuration/openapi-generation");
    assert_eq!(snapshot.page_title.as_deref(), Some("OpenAPI Generation"));
    assert!(!snapshot.overlay_visible);
    assert_eq!(snapshot.focus, Focus::Content);
    assert_eq!(snapshot.mobile_states["/docs/configuration"], Expansion::Expanded);
    // Desktop panel was never touched
    assert_eq!(snapshot.desktop_states["/docs/configuration"], Expansion::Collapsed);
}

#[test]
fn test_reopening_menu_keeps_expansion() {
    let mut driver = ScriptTestDriver::new("/", 70, 30);
    let snapshot = driver
        .run(
            "
            menu
            last
            up
            toggle
            menu
            menu
            ",
        )
        .unwrap();

    assert!(snapshot.overlay_visible);
    assert_eq!(snapshot.mobile_states["/api-reference"], Expansion::Expanded);
    assert_eq!(snapshot.mobile_selection.as_deref(), Some("/api-reference"));
}

#[test]
fn test_goto_back_and_home() {
    let mut driver = ScriptTestDriver::new("/docs/installation", 120, 40);
    let snapshot = driver
        .run(
            "
            goto:/examples
            goto:/api-reference/cli-options
            back
            home
            ",
        )
        .unwrap();

    assert_eq!(snapshot.location, "/");
    assert_eq!(snapshot.back_stack, vec!["/docs/installation", "/examples"]);
    // Navigation never re-seeds expansion
    assert_eq!(snapshot.desktop_states["/api-reference"], Expansion::Collapsed);
}

#[test]
fn test_resize_switches_presenter_without_touching_state() {
    let mut driver = ScriptTestDriver::new("/docs/advanced-usage/custom-schemas", 120, 40);
    let snapshot = driver
        .run(
            "
            up
            toggle
            resize:60x30
            menu
            ",
        )
        .unwrap();

    assert_eq!(snapshot.layout, ActiveLayout::Mobile);
    assert!(snapshot.overlay_visible);
    assert_eq!(snapshot.desktop_states["/docs/advanced-usage"], Expansion::Collapsed);
    assert_eq!(snapshot.mobile_states["/docs/advanced-usage"], Expansion::Expanded);
    assert_eq!(snapshot.desktop_selection.as_deref(), Some("/docs/advanced-usage"));
    assert_eq!(
        snapshot.mobile_selection.as_deref(),
        Some("/docs/advanced-usage/custom-schemas")
    );
}

#[test]
fn test_quit_stops_script() {
    let mut driver = ScriptTestDriver::new("/", 120, 40);
    let snapshot = driver.run("quit\ngoto:/examples").unwrap();
    assert!(snapshot.should_quit);
    assert_eq!(snapshot.location, "/");
}

#[test]
fn test_bad_line_is_reported() {
    let mut driver = ScriptTestDriver::new("/", 120, 40);
    let error = driver.run("down\nfly").unwrap_err();
    assert!(error.starts_with("line 2"));
}
