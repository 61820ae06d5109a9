use crate::config::{Config, LayoutMode};
use crate::content::{Page, PageRegistry};
use crate::markdown::{self, RenderOptions};
use crate::code_block::CodeOptions;
use crate::nav_tree::NavTree;
use crate::presenter::{Expansion, NavPresenter, PresentationKind};
use crate::theme::get_theme;
use ratatui::text::Text;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const HOME_LOCATION: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    Sidebar,
    Content,
}

/// The layout actually on screen, after resolving `LayoutMode::Auto`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveLayout {
    Desktop,
    Mobile,
}

impl ActiveLayout {
    pub fn resolve(mode: LayoutMode, width: u16, mobile_breakpoint: u16) -> Self {
        match mode {
            LayoutMode::Desktop => ActiveLayout::Desktop,
            LayoutMode::Mobile => ActiveLayout::Mobile,
            LayoutMode::Auto if width >= mobile_breakpoint => ActiveLayout::Desktop,
            LayoutMode::Auto => ActiveLayout::Mobile,
        }
    }
}

pub struct App {
    pub tree: Arc<NavTree>,
    pub pages: PageRegistry,
    pub config: Config,

    // Location
    pub location: String,
    pub back_stack: Vec<String>,

    // Sidebar instances, mounted once
    pub desktop: NavPresenter,
    pub mobile: NavPresenter,

    // Layout
    pub layout_mode: LayoutMode,
    pub layout: ActiveLayout,
    pub width: u16,
    pub height: u16,

    // UI State
    pub focus: Focus,
    pub content_scroll: u16,
    pub status_message: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(tree: Arc<NavTree>, config: Config, location: &str, width: u16, height: u16) -> Self {
        let desktop = NavPresenter::mount(PresentationKind::DesktopPanel, tree.clone(), location);
        let mobile = NavPresenter::mount(PresentationKind::MobileOverlay, tree.clone(), location);
        let layout_mode = config.layout.mode;
        let layout = ActiveLayout::resolve(layout_mode, width, config.layout.mobile_breakpoint);

        let mut app = Self {
            tree,
            pages: PageRegistry::site(),
            config,
            location: location.to_string(),
            back_stack: Vec::new(),
            desktop,
            mobile,
            layout_mode,
            layout,
            width,
            height,
            focus: Focus::Sidebar,
            content_scroll: 0,
            status_message: String::new(),
            should_quit: false,
        };
        app.status_message = app.page_status();
        if !app.sidebar_visible() {
            app.focus = Focus::Content;
        }
        log::info!("App::new: {} ({:?} layout)", app.location, app.layout);
        app
    }

    pub fn current_page(&self) -> Option<&'static Page> {
        self.pages.find(&self.location)
    }

    fn page_status(&self) -> String {
        match self.current_page() {
            Some(page) => page.title.to_string(),
            None => format!("Page not found: {}", self.location),
        }
    }

    /// Markdown source for the current location
    pub fn content_source(&self) -> String {
        match self.current_page() {
            Some(page) => page.source.to_string(),
            None => format!(
                "# Page not found\n\nNo documentation page exists at `{}`.\n",
                self.location
            ),
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        let theme = get_theme();
        RenderOptions {
            base_fg: theme.content_text,
            accent: theme.content_accent,
            code_defaults: CodeOptions {
                show_line_numbers: self.config.code.show_line_numbers,
                file_name: None,
            },
            code_theme: self.config.code.theme.clone(),
        }
    }

    pub fn content_text(&self) -> Text<'static> {
        markdown::render(&self.content_source(), &self.render_options())
    }

    // Navigation

    /// Move to `location`. Presenters keep their expansion state.
    pub fn navigate_to(&mut self, location: &str) {
        if location == self.location {
            self.content_scroll = 0;
            return;
        }
        let previous = std::mem::replace(&mut self.location, location.to_string());
        self.back_stack.push(previous);
        self.content_scroll = 0;
        self.status_message = self.page_status();
        log::debug!("App::navigate_to: {}", self.location);
    }

    pub fn back(&mut self) -> bool {
        match self.back_stack.pop() {
            Some(previous) => {
                self.location = previous;
                self.content_scroll = 0;
                self.status_message = self.page_status();
                log::debug!("App::back: {}", self.location);
                true
            }
            None => {
                self.status_message = "No previous page".to_string();
                false
            }
        }
    }

    pub fn home(&mut self) {
        self.navigate_to(HOME_LOCATION);
    }

    // Layout

    pub fn set_layout_mode(&mut self, mode: LayoutMode) {
        self.layout_mode = mode;
        self.relayout();
        self.clamp_scroll();
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.relayout();
        self.clamp_scroll();
    }

    fn relayout(&mut self) {
        let layout = ActiveLayout::resolve(
            self.layout_mode,
            self.width,
            self.config.layout.mobile_breakpoint,
        );
        if layout != self.layout {
            log::debug!("App::relayout: {:?} -> {:?}", self.layout, layout);
            self.layout = layout;
        }
        if !self.sidebar_visible() {
            self.focus = Focus::Content;
        }
    }

    /// The sidebar instance belonging to the current layout
    pub fn active_presenter(&self) -> &NavPresenter {
        match self.layout {
            ActiveLayout::Desktop => &self.desktop,
            ActiveLayout::Mobile => &self.mobile,
        }
    }

    pub fn active_presenter_mut(&mut self) -> &mut NavPresenter {
        match self.layout {
            ActiveLayout::Desktop => &mut self.desktop,
            ActiveLayout::Mobile => &mut self.mobile,
        }
    }

    pub fn sidebar_visible(&self) -> bool {
        self.active_presenter().is_visible()
    }

    pub fn sidebar_focused(&self) -> bool {
        self.focus == Focus::Sidebar && self.sidebar_visible()
    }

    // Sidebar actions

    /// Flip the node under the cursor in the active instance
    pub fn toggle_selected(&mut self) -> Option<Expansion> {
        let path = self.active_presenter().selected()?.to_string();
        self.active_presenter_mut().toggle(&path)
    }

    /// Navigate to the node under the cursor. The mobile overlay closes afterwards.
    pub fn open_selected(&mut self) -> bool {
        let Some(path) = self.active_presenter().selected().map(str::to_string) else {
            return false;
        };
        self.navigate_to(&path);
        if self.layout == ActiveLayout::Mobile {
            self.mobile.set_overlay_visible(false);
            self.focus = Focus::Content;
        }
        true
    }

    /// Show or hide the mobile overlay. Returns false in the desktop layout.
    pub fn toggle_menu(&mut self) -> bool {
        if self.layout != ActiveLayout::Mobile {
            return false;
        }
        self.mobile.toggle_overlay();
        self.focus = if self.mobile.is_visible() {
            Focus::Sidebar
        } else {
            Focus::Content
        };
        true
    }

    pub fn close_menu(&mut self) -> bool {
        let changed = self.mobile.set_overlay_visible(false);
        if changed && self.layout == ActiveLayout::Mobile {
            self.focus = Focus::Content;
        }
        changed
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Content,
            Focus::Content if self.sidebar_visible() => Focus::Sidebar,
            Focus::Content => Focus::Content,
        };
    }

    // Content scrolling

    /// Rows available for content below the title bar and above the status bar
    pub fn content_viewport_height(&self) -> u16 {
        self.height.saturating_sub(4)
    }

    /// Columns available for content inside its border
    pub fn content_viewport_width(&self) -> u16 {
        let sidebar = match self.layout {
            ActiveLayout::Desktop => self.config.layout.sidebar_width,
            ActiveLayout::Mobile => 0,
        };
        self.width.saturating_sub(sidebar).saturating_sub(2).max(1)
    }

    /// Rows the current page needs once wrapped to the viewport
    pub fn content_height(&self) -> usize {
        let width = usize::from(self.content_viewport_width());
        self.content_text()
            .lines
            .iter()
            .map(|line| line.width().div_ceil(width).max(1))
            .sum()
    }

    fn max_scroll(&self) -> u16 {
        let rows = u16::try_from(self.content_height()).unwrap_or(u16::MAX);
        rows.saturating_sub(self.content_viewport_height())
    }

    pub fn scroll_content(&mut self, delta: i32) {
        let target = i32::from(self.content_scroll) + delta;
        let target = target.clamp(0, i32::from(self.max_scroll()));
        self.content_scroll = u16::try_from(target).unwrap_or(0);
    }

    fn clamp_scroll(&mut self) {
        self.content_scroll = self.content_scroll.min(self.max_scroll());
    }

    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            location: self.location.clone(),
            page_title: self.current_page().map(|page| page.title.to_string()),
            back_stack: self.back_stack.clone(),
            layout_mode: self.layout_mode,
            layout: self.layout,
            focus: self.focus,
            overlay_visible: self.mobile.is_visible(),
            desktop_states: self.desktop.states().clone(),
            mobile_states: self.mobile.states().clone(),
            desktop_selection: self.desktop.selected().map(str::to_string),
            mobile_selection: self.mobile.selected().map(str::to_string),
            content_scroll: self.content_scroll,
            status_message: self.status_message.clone(),
            should_quit: self.should_quit,
        }
    }
}

/// Serializable view of the application state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppSnapshot {
    pub location: String,
    pub page_title: Option<String>,
    pub back_stack: Vec<String>,
    pub layout_mode: LayoutMode,
    pub layout: ActiveLayout,
    pub focus: Focus,
    pub overlay_visible: bool,
    pub desktop_states: BTreeMap<String, Expansion>,
    pub mobile_states: BTreeMap<String, Expansion>,
    pub desktop_selection: Option<String>,
    pub mobile_selection: Option<String>,
    pub content_scroll: u16,
    pub status_message: String,
    pub should_quit: bool,
}
