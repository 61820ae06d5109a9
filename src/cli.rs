use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "swagger-docs")]
#[command(about = "Browse the Serverpod Swagger documentation in the terminal")]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the browser starts and how it is laid out
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Location to open, e.g. /docs/configuration
    #[arg(short, long, default_value = "/")]
    pub location: String,
    /// Layout: auto, desktop or mobile (overrides the config file)
    #[arg(long)]
    pub layout: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive TUI (default)
    Run {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Render a single frame to text
    Screenshot {
        #[command(flatten)]
        view: ViewArgs,
        /// Commands applied before rendering (e.g. "sequence:[menu,down]")
        #[arg(short = 'x', long)]
        command: Option<String>,
        /// Output file for the screenshot (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
        /// Terminal width for rendering
        #[arg(long, default_value = "120")]
        width: u16,
        /// Terminal height for rendering
        #[arg(long, default_value = "40")]
        height: u16,
    },
    /// Execute a command headlessly and print the resulting state as JSON
    Execute {
        #[command(flatten)]
        view: ViewArgs,
        /// Command to execute (e.g., "down", "toggle", "goto:/examples")
        #[arg(short = 'x', long)]
        command: String,
        /// Output file for the resulting state (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
        /// Also print a screenshot of the result
        #[arg(long)]
        screenshot: bool,
        /// Terminal width
        #[arg(long, default_value = "120")]
        width: u16,
        /// Terminal height
        #[arg(long, default_value = "40")]
        height: u16,
    },
    /// Print the sidebar presentation tree for a location as JSON
    Nav {
        /// Location to highlight
        #[arg(short, long, default_value = "/")]
        location: String,
    },
    /// List every documentation page
    Pages,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["swagger-docs"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_screenshot_arguments() {
        let cli = Cli::try_parse_from([
            "swagger-docs",
            "--config",
            "docs.json",
            "screenshot",
            "--location",
            "/examples",
            "--layout",
            "mobile",
            "-x",
            "menu",
            "--width",
            "60",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("docs.json")));
        match cli.command {
            Some(Commands::Screenshot {
                view,
                command,
                width,
                height,
                ..
            }) => {
                assert_eq!(view.location, "/examples");
                assert_eq!(view.layout.as_deref(), Some("mobile"));
                assert_eq!(command.as_deref(), Some("menu"));
                assert_eq!(width, 60);
                assert_eq!(height, 40);
            }
            _ => panic!("expected screenshot command"),
        }
    }

    #[test]
    fn test_execute_requires_command() {
        assert!(Cli::try_parse_from(["swagger-docs", "execute"]).is_err());
    }

    #[test]
    fn test_nav_default_location() {
        let cli = Cli::try_parse_from(["swagger-docs", "nav"]).unwrap();
        match cli.command {
            Some(Commands::Nav { location }) => assert_eq!(location, "/"),
            _ => panic!("expected nav command"),
        }
    }
}
