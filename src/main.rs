use std::fs::File;
use std::io::Stdout;

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use souschef::{
    catalog::RecipeCatalog,
    config::AppConfig,
    controllers::{get_saved_recipes, get_shopping_list},
    storage,
    tui::{
        app::{AppAction, RecipeApp},
        commands,
    },
};
use sqlx::SqlitePool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;

    let pool = storage::connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;

    // Load persisted collections before taking over the terminal
    let mut app = RecipeApp::new(
        RecipeCatalog::default(),
        get_saved_recipes(&pool).await,
        get_shopping_list(&pool).await,
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &pool).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    log::info!("Exiting");
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut RecipeApp,
    pool: &SqlitePool,
) -> anyhow::Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| app.render(f))?;

        // Handle input
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.handle_key(key.code) {
                AppAction::Continue => {}
                AppAction::Execute(command) => commands::execute(pool, app, command).await,
                AppAction::Exit => return Ok(()),
            }
        }
    }
}

fn init_logging(config: &AppConfig) -> anyhow::Result<()> {
    let log_file = File::options()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;

    env_logger::Builder::new()
        .parse_filters(&config.log_filter)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    log::info!("Starting with database {}", config.database_url);
    Ok(())
}
