use crate::error::{DocsError, Result};
use serde::Serialize;
use std::collections::HashSet;

/// Separator between location segments.
pub const SEPARATOR: char = '/';

/// A single entry in the navigation forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavNode {
    pub title: String,
    pub path: String,
    pub children: Vec<NavNode>,
}

impl NavNode {
    /// Create a node without children
    pub fn leaf(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            children: Vec::new(),
        }
    }

    /// Create a node with an ordered list of children
    pub fn branch(
        title: impl Into<String>,
        path: impl Into<String>,
        children: Vec<NavNode>,
    ) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            children,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether this node is on the active path for `location`
    pub fn is_on_active_path(&self, location: &str) -> bool {
        is_on_active_path(&self.path, location)
    }

    /// Whether this node is the page being viewed at `location`
    pub fn is_current(&self, location: &str) -> bool {
        is_current(&self.path, location)
    }

    /// Whether `path` names a strict descendant of this node
    pub fn has_descendant(&self, path: &str) -> bool {
        self.children
            .iter()
            .any(|child| child.path == path || child.has_descendant(path))
    }
}

/// True iff `location` equals `node_path` or continues it past a separator.
///
/// A single trailing separator on either side counts as none, so
/// `/examples/` and `/examples` name the same node. The root path `/`
/// only matches the root location itself: a plain string-prefix test
/// would put it on the active path of every location.
pub fn is_on_active_path(node_path: &str, location: &str) -> bool {
    let node_path = trim_trailing_separator(node_path);
    let location = trim_trailing_separator(location);

    if node_path.is_empty() {
        return location.is_empty();
    }

    match location.strip_prefix(node_path) {
        Some(rest) => rest.is_empty() || rest.starts_with(SEPARATOR),
        None => false,
    }
}

/// Exact match between a node path and a location, modulo one trailing separator
pub fn is_current(node_path: &str, location: &str) -> bool {
    trim_trailing_separator(node_path) == trim_trailing_separator(location)
}

pub(crate) fn trim_trailing_separator(path: &str) -> &str {
    path.strip_suffix(SEPARATOR).unwrap_or(path)
}

/// Immutable navigation forest with unique paths
#[derive(Debug, Clone, Serialize)]
pub struct NavTree {
    roots: Vec<NavNode>,
}

impl NavTree {
    /// Build a tree, rejecting duplicate paths and empty titles at any depth
    pub fn new(roots: Vec<NavNode>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut pending: Vec<&NavNode> = roots.iter().collect();

        while let Some(node) = pending.pop() {
            if node.title.trim().is_empty() {
                return Err(DocsError::EmptyTitle {
                    path: node.path.clone(),
                });
            }
            if !seen.insert(node.path.as_str()) {
                return Err(DocsError::DuplicatePath {
                    path: node.path.clone(),
                });
            }
            pending.extend(node.children.iter());
        }

        log::debug!("NavTree::new: {} nodes", seen.len());
        Ok(Self { roots })
    }

    /// The navigation of the Serverpod Swagger documentation site
    pub fn site() -> Result<Self> {
        Self::new(vec![
            NavNode::leaf("Getting Started", "/docs/getting-started"),
            NavNode::leaf("Installation", "/docs/installation"),
            NavNode::leaf("Basic Usage", "/docs/basic-usage"),
            NavNode::branch(
                "Configuration",
                "/docs/configuration",
                vec![
                    NavNode::leaf(
                        "OpenAPI Generation",
                        "/docs/configuration/openapi-generation",
                    ),
                    NavNode::leaf(
                        "Swagger UI Options",
                        "/docs/configuration/swagger-ui-options",
                    ),
                    NavNode::leaf("Authentication", "/docs/configuration/authentication"),
                ],
            ),
            NavNode::branch(
                "Advanced Usage",
                "/docs/advanced-usage",
                vec![
                    NavNode::leaf("Custom Schemas", "/docs/advanced-usage/custom-schemas"),
                    NavNode::leaf(
                        "Response Examples",
                        "/docs/advanced-usage/response-examples",
                    ),
                ],
            ),
            NavNode::leaf("Examples", "/examples"),
            NavNode::branch(
                "API Reference",
                "/api-reference",
                vec![
                    NavNode::leaf("SwaggerUIRoute", "/api-reference/swagger-ui-route"),
                    NavNode::leaf(
                        "ServerpodSwaggerVersion",
                        "/api-reference/serverpod-swagger-version",
                    ),
                    NavNode::leaf("CLI Options", "/api-reference/cli-options"),
                ],
            ),
            NavNode::leaf("Troubleshooting", "/docs/troubleshooting"),
        ])
    }

    /// The top-level ordered list
    pub fn all_nodes(&self) -> &[NavNode] {
        &self.roots
    }

    pub fn is_on_active_path(&self, node: &NavNode, location: &str) -> bool {
        node.is_on_active_path(location)
    }

    /// Depth-first walk in render order, paired with each node's depth
    pub fn walk(&self) -> Vec<(&NavNode, usize)> {
        let mut out = Vec::new();
        for node in &self.roots {
            Self::walk_into(node, 0, &mut out);
        }
        out
    }

    fn walk_into<'a>(node: &'a NavNode, depth: usize, out: &mut Vec<(&'a NavNode, usize)>) {
        out.push((node, depth));
        for child in &node.children {
            Self::walk_into(child, depth + 1, out);
        }
    }

    /// Find a node by its exact path
    pub fn find_node(&self, path: &str) -> Option<&NavNode> {
        self.walk()
            .into_iter()
            .map(|(node, _)| node)
            .find(|node| node.path == path)
    }

    /// The node whose page is `location`, if the navigation lists it
    pub fn current_node(&self, location: &str) -> Option<&NavNode> {
        self.walk()
            .into_iter()
            .map(|(node, _)| node)
            .find(|node| node.is_current(location))
    }

    /// Nodes on the active path for `location`, outermost first
    pub fn active_trail(&self, location: &str) -> Vec<&NavNode> {
        self.walk()
            .into_iter()
            .map(|(node, _)| node)
            .filter(|node| node.is_on_active_path(location))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.walk().len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
