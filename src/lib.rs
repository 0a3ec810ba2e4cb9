//! Strictly Territory library - a territory-claiming grid game
//!
//! Players alternately claim empty cells on a fixed grid. When the grid is
//! full, each player's score is the size of their largest connected group
//! of cells, where cells connect orthogonally and never diagonally.
//!
//! # Architecture
//!
//! - **Board**: cell storage, adjacency and claims
//! - **Scoring**: connected-component partitioning per owner
//! - **TurnController**: turn rotation, validation and bounded retries
//! - **Movers**: humans on stdin, LLM agents, a simple AI, scripted replays
//!
//! # Example
//!
//! ```no_run
//! use strictly_territory::{Contestant, SimpleAi, TurnController, TurnSettings};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut game = TurnController::with_dimensions(
//!     5,
//!     5,
//!     vec![
//!         Contestant::new("left", '*', Box::new(SimpleAi)),
//!         Contestant::new("right", 'o', Box::new(SimpleAi)),
//!     ],
//!     TurnSettings::default(),
//! )?;
//! let outcome = game.run().await?;
//! println!("{}", outcome.summary(game.roster()));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod game_config;
pub mod games;
pub mod llm_client;
pub mod players;

// Crate-level exports - Game types
pub use games::territory::{
    Board, BoardError, BoardView, Cell, Claim, Contestant, Coord, GameError, GameOutcome, Mover,
    MoverError, MoverKind, ParseCoordError, PlayerId, Roster, ScoringMode, Seat, Territory,
    TurnController, TurnEvent, TurnPhase, TurnSettings, score_all, territories,
};

// Crate-level exports - Players
pub use players::{AgentMover, HumanMover, ScriptedMover, SimpleAi};

// Crate-level exports - Configuration
pub use game_config::{ConfigError, GameConfig, SeatConfig, SeatKind};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider, Prompt};
