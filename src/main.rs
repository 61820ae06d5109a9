use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::path::Path;
use std::{io, time::Duration};

use swagger_docs::app::App;
use swagger_docs::cli::{Cli, Commands, ViewArgs};
use swagger_docs::error::Result;
use swagger_docs::{event, main_lib, ui};

fn main() -> Result<()> {
    // Initialize logger only if SWAGGER_DOCS_LOG environment variable is set
    if let Ok(log_file) = std::env::var("SWAGGER_DOCS_LOG") {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        env_logger::Builder::new()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .filter_level(log::LevelFilter::Debug)
            .init();

        log::info!("Serverpod Swagger docs starting up");
    }

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let command = cli.command.unwrap_or(Commands::Run {
        view: ViewArgs {
            location: "/".to_string(),
            layout: None,
        },
    });

    match command {
        Commands::Run { view } => run_interactive(config_path, &view),
        Commands::Screenshot {
            view,
            command,
            output,
            width,
            height,
        } => main_lib::take_screenshot(
            config_path,
            &view,
            command.as_deref(),
            output.as_deref(),
            width,
            height,
        ),
        Commands::Execute {
            view,
            command,
            output,
            screenshot,
            width,
            height,
        } => main_lib::execute_command(
            config_path,
            &view,
            &command,
            output.as_deref(),
            screenshot,
            width,
            height,
        ),
        Commands::Nav { location } => {
            println!("{}", main_lib::nav_json(&location)?);
            Ok(())
        }
        Commands::Pages => {
            print!("{}", main_lib::list_pages());
            Ok(())
        }
    }
}

fn run_interactive(config_path: Option<&Path>, view: &ViewArgs) -> Result<()> {
    // Fail on a bad tree or config before touching the terminal
    let (width, height) = crossterm::terminal::size()?;
    let mut app = main_lib::build_app(config_path, view, width, height)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if crossterm::event::poll(tick_rate)? {
            let event = crossterm::event::read()?;
            if let Err(e) = event::handle_event(event, app) {
                app.status_message = format!("Error handling event: {}", e);
            }
        }

        if app.should_quit {
            log::info!("event_loop: quit");
            return Ok(());
        }
    }
}
