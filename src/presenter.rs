//! Per-instance presentation state for the navigation sidebar.
//!
//! A [`NavPresenter`] binds the shared [`NavTree`] to a location. Active-path
//! highlighting is derived from the location passed to every render, while
//! expansion is seeded once at mount and afterwards changed only by
//! [`NavPresenter::toggle`]. The desktop panel and the mobile overlay each
//! mount their own presenter, so their state tables never meet.

use crate::nav_tree::{NavNode, NavTree};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationKind {
    DesktopPanel,
    MobileOverlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expansion {
    Collapsed,
    Expanded,
}

impl Expansion {
    pub fn toggled(self) -> Self {
        match self {
            Expansion::Collapsed => Expansion::Expanded,
            Expansion::Expanded => Expansion::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Expansion::Expanded
    }

    fn at_mount(on_active_path: bool) -> Self {
        if on_active_path {
            Expansion::Expanded
        } else {
            Expansion::Collapsed
        }
    }
}

/// One node as rendered by a presenter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentedNode {
    pub title: String,
    pub path: String,
    pub depth: usize,
    /// The page being viewed
    pub is_current: bool,
    pub on_active_path: bool,
    /// `None` for leaves, which have no disclosure control
    pub expansion: Option<Expansion>,
    /// Empty unless the node is expanded
    pub children: Vec<PresentedNode>,
}

/// A flattened, visible row of the rendered tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavRow {
    pub title: String,
    pub path: String,
    pub depth: usize,
    pub is_current: bool,
    pub on_active_path: bool,
    pub expansion: Option<Expansion>,
}

#[derive(Debug, Clone)]
pub struct NavPresenter {
    kind: PresentationKind,
    tree: Arc<NavTree>,
    /// Keyed by node path; only nodes with children have an entry
    states: BTreeMap<String, Expansion>,
    overlay_visible: bool,
    selection: Option<String>,
}

impl NavPresenter {
    /// Mount a fresh instance, expanding every branch on the active path of `location`
    pub fn mount(kind: PresentationKind, tree: Arc<NavTree>, location: &str) -> Self {
        let states: BTreeMap<String, Expansion> = tree
            .walk()
            .into_iter()
            .filter(|(node, _)| node.has_children())
            .map(|(node, _)| {
                (
                    node.path.clone(),
                    Expansion::at_mount(node.is_on_active_path(location)),
                )
            })
            .collect();

        let selection = tree
            .current_node(location)
            .or_else(|| tree.all_nodes().first())
            .map(|node| node.path.clone());

        log::debug!(
            "NavPresenter::mount: {:?} at {:?}, {} expanded",
            kind,
            location,
            states.values().filter(|s| s.is_expanded()).count()
        );

        Self {
            kind,
            tree,
            states,
            overlay_visible: false,
            selection,
        }
    }

    pub fn kind(&self) -> PresentationKind {
        self.kind
    }

    pub fn tree(&self) -> &NavTree {
        &self.tree
    }

    /// Expansion of the node at `path`, `None` for leaves and unknown paths
    pub fn expansion(&self, path: &str) -> Option<Expansion> {
        self.states.get(path).copied()
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expansion(path).is_some_and(Expansion::is_expanded)
    }

    /// Snapshot of the whole state table
    pub fn states(&self) -> &BTreeMap<String, Expansion> {
        &self.states
    }

    /// Flip the node at `path` in this instance only.
    ///
    /// Returns the new state, or `None` when the node has no disclosure control.
    pub fn toggle(&mut self, path: &str) -> Option<Expansion> {
        let state = self.states.get_mut(path)?;
        *state = state.toggled();
        let new_state = *state;

        // A collapsed branch hides its descendants, so pull the cursor up to it.
        if new_state == Expansion::Collapsed {
            let hides_selection = match (&self.selection, self.tree.find_node(path)) {
                (Some(selected), Some(node)) => node.has_descendant(selected),
                _ => false,
            };
            if hides_selection {
                self.selection = Some(path.to_string());
            }
        }

        log::debug!("NavPresenter::toggle: {:?} {} -> {:?}", self.kind, path, new_state);
        Some(new_state)
    }

    /// Build the presentation tree for the live `location`
    pub fn render(&self, location: &str) -> Vec<PresentedNode> {
        self.tree
            .all_nodes()
            .iter()
            .map(|node| self.present(node, location, 0))
            .collect()
    }

    fn present(&self, node: &NavNode, location: &str, depth: usize) -> PresentedNode {
        let expansion = self.expansion(&node.path);
        let children = if expansion.is_some_and(Expansion::is_expanded) {
            node.children
                .iter()
                .map(|child| self.present(child, location, depth + 1))
                .collect()
        } else {
            Vec::new()
        };

        PresentedNode {
            title: node.title.clone(),
            path: node.path.clone(),
            depth,
            is_current: node.is_current(location),
            on_active_path: node.is_on_active_path(location),
            expansion,
            children,
        }
    }

    /// Visible rows in render order
    pub fn visible_rows(&self, location: &str) -> Vec<NavRow> {
        fn flatten(nodes: Vec<PresentedNode>, rows: &mut Vec<NavRow>) {
            for node in nodes {
                rows.push(NavRow {
                    title: node.title,
                    path: node.path,
                    depth: node.depth,
                    is_current: node.is_current,
                    on_active_path: node.on_active_path,
                    expansion: node.expansion,
                });
                flatten(node.children, rows);
            }
        }

        let mut rows = Vec::new();
        flatten(self.render(location), &mut rows);
        rows
    }

    // Mobile overlay

    /// Whether this instance is on screen when its layout is active.
    /// The desktop panel is always shown.
    pub fn is_visible(&self) -> bool {
        match self.kind {
            PresentationKind::DesktopPanel => true,
            PresentationKind::MobileOverlay => self.overlay_visible,
        }
    }

    /// Flip the overlay. No-op returning `false` on the desktop panel.
    pub fn toggle_overlay(&mut self) -> bool {
        self.set_overlay_visible(!self.overlay_visible)
    }

    /// Returns whether the visibility changed
    pub fn set_overlay_visible(&mut self, visible: bool) -> bool {
        if self.kind != PresentationKind::MobileOverlay || self.overlay_visible == visible {
            return false;
        }
        self.overlay_visible = visible;
        log::debug!("NavPresenter: overlay visible = {}", visible);
        true
    }

    // Keyboard cursor

    pub fn selected(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Move the cursor to `path` if it is currently visible
    pub fn select(&mut self, path: &str, location: &str) -> bool {
        if self.visible_rows(location).iter().any(|row| row.path == path) {
            self.selection = Some(path.to_string());
            true
        } else {
            false
        }
    }

    pub fn select_next(&mut self, location: &str) -> bool {
        self.step_selection(location, 1)
    }

    pub fn select_previous(&mut self, location: &str) -> bool {
        self.step_selection(location, -1)
    }

    pub fn select_first(&mut self, location: &str) -> bool {
        let first = self.visible_rows(location).into_iter().next();
        self.replace_selection(first.map(|row| row.path))
    }

    pub fn select_last(&mut self, location: &str) -> bool {
        let last = self.visible_rows(location).pop();
        self.replace_selection(last.map(|row| row.path))
    }

    /// Index of the cursor among the visible rows
    pub fn selected_index(&self, location: &str) -> Option<usize> {
        let selected = self.selection.as_deref()?;
        self.visible_rows(location)
            .iter()
            .position(|row| row.path == selected)
    }

    fn step_selection(&mut self, location: &str, delta: isize) -> bool {
        let rows = self.visible_rows(location);
        if rows.is_empty() {
            return false;
        }
        let target = match self.selected_index(location) {
            Some(index) => {
                let next = index as isize + delta;
                if next < 0 || next >= rows.len() as isize {
                    return false;
                }
                next as usize
            }
            None => 0,
        };
        self.replace_selection(Some(rows[target].path.clone()))
    }

    fn replace_selection(&mut self, path: Option<String>) -> bool {
        if path.is_none() || path == self.selection {
            return false;
        }
        self.selection = path;
        true
    }
}
