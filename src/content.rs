use crate::nav_tree::trim_trailing_separator;
use serde::Serialize;

/// A static documentation page compiled into the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub path: &'static str,
    pub title: &'static str,
    #[serde(skip)]
    pub source: &'static str,
}

macro_rules! page {
    ($path:literal, $title:literal, $file:literal) => {
        Page {
            path: $path,
            title: $title,
            source: include_str!(concat!("../content/", $file)),
        }
    };
}

const SITE_PAGES: &[Page] = &[
    page!("/", "Serverpod Swagger", "index.md"),
    page!("/docs/getting-started", "Getting Started", "docs/getting-started.md"),
    page!("/docs/installation", "Installation", "docs/installation.md"),
    page!("/docs/basic-usage", "Basic Usage", "docs/basic-usage.md"),
    page!("/docs/configuration", "Configuration", "docs/configuration.md"),
    page!(
        "/docs/configuration/openapi-generation",
        "OpenAPI Generation",
        "docs/configuration/openapi-generation.md"
    ),
    page!(
        "/docs/configuration/swagger-ui-options",
        "Swagger UI Options",
        "docs/configuration/swagger-ui-options.md"
    ),
    page!(
        "/docs/configuration/authentication",
        "Authentication",
        "docs/configuration/authentication.md"
    ),
    page!("/docs/advanced-usage", "Advanced Usage", "docs/advanced-usage.md"),
    page!(
        "/docs/advanced-usage/custom-schemas",
        "Custom Schemas",
        "docs/advanced-usage/custom-schemas.md"
    ),
    page!(
        "/docs/advanced-usage/response-examples",
        "Response Examples",
        "docs/advanced-usage/response-examples.md"
    ),
    page!("/docs/troubleshooting", "Troubleshooting", "docs/troubleshooting.md"),
    page!("/examples", "Examples", "examples.md"),
    page!("/api-reference", "API Reference", "api-reference.md"),
    page!(
        "/api-reference/swagger-ui-route",
        "SwaggerUIRoute",
        "api-reference/swagger-ui-route.md"
    ),
    page!(
        "/api-reference/serverpod-swagger-version",
        "ServerpodSwaggerVersion",
        "api-reference/serverpod-swagger-version.md"
    ),
    page!("/api-reference/cli-options", "CLI Options", "api-reference/cli-options.md"),
];

/// Lookup table from location to page
#[derive(Debug, Clone, Copy)]
pub struct PageRegistry {
    pages: &'static [Page],
}

impl Default for PageRegistry {
    fn default() -> Self {
        Self::site()
    }
}

impl PageRegistry {
    pub fn site() -> Self {
        Self { pages: SITE_PAGES }
    }

    pub fn pages(&self) -> &'static [Page] {
        self.pages
    }

    /// Resolve a location; one trailing separator is ignored
    pub fn find(&self, location: &str) -> Option<&'static Page> {
        let location = trim_trailing_separator(location);
        self.pages
            .iter()
            .find(|page| trim_trailing_separator(page.path) == location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav_tree::NavTree;
    use std::collections::HashSet;

    #[test]
    fn test_every_nav_path_has_a_page() {
        let tree = NavTree::site().unwrap();
        let registry = PageRegistry::site();
        for (node, _) in tree.walk() {
            let page = registry.find(&node.path);
            assert!(page.is_some(), "no page for {}", node.path);
            assert_eq!(page.unwrap().title, node.title);
        }
    }

    #[test]
    fn test_page_paths_are_unique() {
        let registry = PageRegistry::site();
        let unique: HashSet<&str> = registry.pages().iter().map(|p| p.path).collect();
        assert_eq!(unique.len(), registry.pages().len());
    }

    #[test]
    fn test_find_handles_trailing_separator_and_root() {
        let registry = PageRegistry::site();
        assert_eq!(registry.find("/examples/").map(|p| p.path), Some("/examples"));
        assert_eq!(registry.find("/").map(|p| p.title), Some("Serverpod Swagger"));
        assert!(registry.find("/docs/missing").is_none());
    }

    #[test]
    fn test_pages_start_with_a_heading() {
        for page in PageRegistry::site().pages() {
            assert!(page.source.starts_with("# "), "{} lacks a title heading", page.path);
        }
    }

    #[test]
    fn test_pages_keep_their_later_sections() {
        let sections = [
            ("/", "## Features"),
            ("/docs/getting-started", "### 4. Start your server and access the Swagger UI"),
            ("/docs/installation", "## Verifying Installation"),
            ("/docs/basic-usage", "## Documenting Your Endpoints"),
            ("/docs/configuration", "## Configuration Best Practices"),
            ("/docs/configuration/openapi-generation", "## Regenerating on Code Changes"),
            ("/docs/configuration/swagger-ui-options", "## Multiple Swagger UI Instances"),
            ("/docs/configuration/authentication", "## Implementing Authentication in Serverpod"),
            ("/docs/advanced-usage", "## Additional Resources"),
            (
                "/docs/advanced-usage/custom-schemas",
                "## Combining Custom Schemas with Security Definitions",
            ),
            (
                "/docs/advanced-usage/response-examples",
                "## Combining Examples with Custom Schemas",
            ),
            ("/docs/troubleshooting", "## Still Having Issues?"),
            ("/examples", "## Example with File Upload"),
            ("/api-reference", "## Annotations"),
            ("/api-reference/swagger-ui-route", "## Usage Example"),
            ("/api-reference/serverpod-swagger-version", "## Version Checking"),
            ("/api-reference/cli-options", "## Integration with Build Process"),
        ];

        let registry = PageRegistry::site();
        assert_eq!(sections.len(), registry.pages().len());
        for (path, heading) in sections {
            let page = registry.find(path).unwrap();
            assert!(
                page.source.lines().any(|line| line == heading),
                "{} is missing {:?}",
                path,
                heading
            );
        }
    }

    #[test]
    fn test_api_reference_lists_every_annotation() {
        let source = PageRegistry::site().find("/api-reference").unwrap().source;
        for annotation in ["@Route", "@Method", "@Security", "@Param"] {
            assert!(source.contains(&format!("### `{}`", annotation)));
        }
        assert_eq!(source.matches("```dart").count(), 6);
        assert!(source.contains("```bash nolinenums"));
    }
}
