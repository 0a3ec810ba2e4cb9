//! Strictly Territory - command-line game runner
//!
//! Prints a prompt and the board each turn and a score summary at the end.
//! Logs go to stderr; set `RUST_LOG` to adjust verbosity.

use anyhow::Result;
use clap::Parser;
use strictly_territory::cli::{Cli, Command};
use strictly_territory::{
    AgentMover, Contestant, GameConfig, GameError, GameOutcome, HumanMover, LlmClient, Mover,
    MoverKind, SeatKind, SimpleAi, TurnController, TurnEvent, TurnSettings,
};
use tokio::sync::mpsc;
use tracing::{error, info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status when an automated player exhausts its retries.
const EXIT_RETRY_BUDGET: i32 = 2;

/// Log filter used when `RUST_LOG` is unset. Logs share the terminal with the
/// human player's prompt, so per-turn detail stays opt-in.
const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    let result = match cli.command {
        Command::Play {
            config,
            rows,
            cols,
            max_retries,
            scoring,
        } => {
            let config = GameConfig::load_or_default(&config)?
                .with_overrides(rows, cols, max_retries, scoring)?;
            run_play(config).await
        }
        Command::Demo { rows, cols } => run_demo(rows, cols).await,
    };

    if let Err(err) = result {
        error!(error = %err, "Game stopped");
        eprintln!("{err}");
        std::process::exit(exit_code(&err));
    }
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<GameError>() {
        Some(GameError::RetryBudgetExceeded { .. }) => {
            eprintln!("Exiting game due to too many agent retries.");
            EXIT_RETRY_BUDGET
        }
        _ => 1,
    }
}

/// Play a configured game
#[instrument(skip(config), fields(rows = config.rows(), cols = config.cols()))]
async fn run_play(config: GameConfig) -> Result<()> {
    let contestants = build_contestants(&config)?;
    let game = TurnController::with_dimensions(
        *config.rows(),
        *config.cols(),
        contestants,
        config.turn_settings(),
    )?;
    play(game).await.map(|_| ())
}

/// Play two simple AIs against each other
#[instrument]
async fn run_demo(rows: usize, cols: usize) -> Result<()> {
    let contestants = vec![
        Contestant::new("left", '*', Box::new(SimpleAi)),
        Contestant::new("right", 'o', Box::new(SimpleAi)),
    ];
    let game = TurnController::with_dimensions(rows, cols, contestants, TurnSettings::default())?;
    play(game).await.map(|_| ())
}

fn build_contestants(config: &GameConfig) -> Result<Vec<Contestant>> {
    config
        .players()
        .iter()
        .map(|seat| -> Result<Contestant> {
            let mover: Box<dyn Mover> = match seat.kind() {
                SeatKind::Human => Box::new(HumanMover::stdio(seat.name().clone())),
                SeatKind::Agent => {
                    let client = LlmClient::new(seat.llm_config()?);
                    Box::new(AgentMover::new(seat.name().clone(), client))
                }
                SeatKind::Simple => Box::new(SimpleAi),
            };
            Ok(Contestant::new(seat.name().clone(), *seat.marker(), mover))
        })
        .collect()
}

/// Runs the game turn by turn, printing what happened after each turn.
async fn play(game: TurnController) -> Result<GameOutcome> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut game = game.with_events(event_tx);

    println!("Starting game.\n");
    while let Some(active) = game.phase().active() {
        let name = game.roster().name(active);
        let automated = game
            .roster()
            .get(active)
            .is_some_and(|seat| *seat.kind() == MoverKind::Automated);

        println!("\nPlayer {name}'s turn.");
        // Interactive movers print the board as part of their prompt.
        if automated {
            println!("{}", game.render());
        }

        let turn = game.play_turn().await;

        while let Ok(event) = event_rx.try_recv() {
            match event {
                TurnEvent::MoveRejected { attempt, reason, .. } if automated => {
                    println!("Attempt {attempt} failed: {reason}");
                }
                TurnEvent::ClaimApplied(claim) => {
                    println!("{name} claims ({}).", claim.coord);
                }
                _ => {}
            }
        }

        turn?;
    }

    println!("\n{}", game.render());
    println!("Game ended.");
    let outcome = game.outcome().ok_or(GameError::NotInProgress)?;
    info!(winners = ?outcome.winners(), "Game finished");
    println!("{}", outcome.summary(game.roster()));
    Ok(outcome)
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_default_filter_hides_turn_detail() {
        let filter = EnvFilter::new(DEFAULT_LOG_FILTER);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }
}
