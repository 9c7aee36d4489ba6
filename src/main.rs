use std::sync::Arc;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use lunch_picker_rs::catalog::{Catalog, load_catalog};
use lunch_picker_rs::cli::{Cli, Command, FilterArgs};
use lunch_picker_rs::config::{EngineConfig, load_config};
use lunch_picker_rs::engine::{PickOutcome, SelectionEngine, TickSource, TokioTicks, filter};
use lunch_picker_rs::error::{PickError, Result};
use lunch_picker_rs::interface::{
    MenuAction, display_history, display_item_list, display_justification, display_loading,
    display_no_eligible, display_preferences, display_settled, display_welcome, follow_spin,
    prompt_crowd_type, prompt_menu_action, prompt_preferences,
};
use lunch_picker_rs::recommend::RecommendationClient;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to install logger: {e}");
    }
}

async fn run(cli: Cli) -> Result<()> {
    let catalog = match &cli.catalog {
        Some(path) => load_catalog(path)?,
        None => Catalog::builtin(),
    };
    let config = load_config(cli.config.as_deref())?;

    match cli.command.unwrap_or_default() {
        Command::Session => cmd_session(catalog, &config).await,
        Command::Spin { filters, offline } => cmd_spin(catalog, &config, &filters, offline).await,
        Command::List { filters } => cmd_list(&catalog, &filters),
    }
}

fn build_engine(
    catalog: Catalog,
    config: &EngineConfig,
    offline: bool,
) -> SelectionEngine<TokioTicks> {
    let recommender = if offline {
        RecommendationClient::offline()
    } else {
        RecommendationClient::from_config(&config.recommender)
    };
    if recommender.is_offline() {
        tracing::info!("using local recommendations only");
    }
    SelectionEngine::new(Arc::new(catalog), config, TokioTicks, Arc::new(recommender))
}

/// Interactive loop until the user quits.
///
/// Prompts run on the blocking pool so a justification fetch keeps making
/// progress while the menu is open.
async fn cmd_session(catalog: Catalog, config: &EngineConfig) -> Result<()> {
    display_welcome(&catalog);
    let mut engine = build_engine(catalog, config, false);

    loop {
        if engine.apply_ready_justification() {
            if let Some(justification) = engine.state().justification() {
                display_justification(justification);
            }
        }

        let snapshot = engine.snapshot();
        let menu_snapshot = snapshot.clone();
        let action = blocking(move || prompt_menu_action(&menu_snapshot)).await?;

        match action {
            MenuAction::Pick => {
                spin_once(&mut engine).await?;
            }
            MenuAction::Preferences => {
                let catalog = engine.shared_catalog();
                let current = snapshot.preferences.clone();
                let preferences = blocking(move || prompt_preferences(&catalog, &current)).await?;
                engine.set_preferences(preferences);
                display_preferences(&engine.snapshot(), engine.catalog());
            }
            MenuAction::CrowdType => {
                let current = snapshot.crowd;
                let crowd = blocking(move || prompt_crowd_type(current)).await?;
                if engine.set_crowd_type(crowd) {
                    display_preferences(&engine.snapshot(), engine.catalog());
                }
            }
            MenuAction::History => display_history(&snapshot.history),
            MenuAction::Quit => break,
        }
    }

    Ok(())
}

async fn blocking<F, R>(prompt: F) -> Result<R>
where
    F: FnOnce() -> Result<R> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(prompt).await?
}

/// One pick with command-line filters.
async fn cmd_spin(
    catalog: Catalog,
    config: &EngineConfig,
    filters: &FilterArgs,
    offline: bool,
) -> Result<()> {
    let preferences = filters.to_preferences(&catalog)?;
    let mut engine = build_engine(catalog, config, offline);
    engine.set_preferences(preferences);
    engine.set_crowd_type(filters.crowd);

    if spin_once(&mut engine).await? {
        if let Some(justification) = engine.wait_for_justification().await {
            display_justification(&justification);
        }
    }
    Ok(())
}

/// Print the items that pass the filters.
fn cmd_list(catalog: &Catalog, filters: &FilterArgs) -> Result<()> {
    let preferences = filters.to_preferences(catalog)?;
    let eligible = filter(catalog.items(), &preferences, filters.crowd);

    if eligible.is_empty() {
        display_no_eligible();
        return Ok(());
    }

    display_item_list(&eligible, catalog, "Eligible items");
    Ok(())
}

/// Animate one spin and show the result. Returns `true` when it settled; the
/// note is fetched in the background.
async fn spin_once<T: TickSource>(engine: &mut SelectionEngine<T>) -> Result<bool> {
    let renderer = tokio::spawn(follow_spin(engine.subscribe()));

    let settlement = match engine.pick().await {
        Ok(PickOutcome::Settled(settlement)) => settlement,
        Ok(PickOutcome::Ignored) => {
            renderer.abort();
            return Ok(false);
        }
        Err(PickError::EmptyEligibleSet) => {
            renderer.abort();
            display_no_eligible();
            return Ok(false);
        }
        Err(e) => {
            renderer.abort();
            return Err(e);
        }
    };

    // The renderer exits on its own once it sees the settled snapshot.
    let _ = renderer.await;

    display_settled(&settlement.item);
    display_loading();
    Ok(true)
}
