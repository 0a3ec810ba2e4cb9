//! Language-model player.

use crate::games::territory::{BoardView, Coord, Mover, MoverError, MoverKind};
use crate::llm_client::{LlmClient, Prompt};
use tracing::{debug, info, instrument, warn};

/// Automated player that asks a hosted model for each move.
#[derive(Debug, Clone)]
pub struct AgentMover {
    name: String,
    client: LlmClient,
}

impl AgentMover {
    /// Creates an agent around an already-configured client.
    pub fn new(name: impl Into<String>, client: LlmClient) -> Self {
        let name = name.into();
        info!(agent = %name, model = %client.config().model(), "Creating agent player");
        Self { name, client }
    }

    /// Builds the rules and turn prompt for the current position.
    pub fn build_prompt(view: &BoardView<'_>, feedback: Option<&str>) -> Prompt {
        let board = view.board();
        let own = view.active_seat().map(|s| *s.marker()).unwrap_or('?');
        let others: Vec<String> = view
            .roster()
            .iter()
            .filter(|s| *s.id() != view.active())
            .map(|s| format!("`{}`", s.marker()))
            .collect();

        let system = format!(
            "You are playing a turn-based territory game on a {rows}x{cols} grid. \
             Players take turns claiming one empty cell each. Empty cells are shown as \
             whitespace. Cells you own contain `{own}`. Cells owned by opponents contain {others}. \
             Two cells are connected when a path of orthogonally adjacent cells with the same \
             owner joins them; diagonal cells are not connected. When every cell is taken, \
             each player's score is the size of their largest connected group.",
            rows = board.rows(),
            cols = board.cols(),
            others = others.join(" or "),
        );

        let mut user = format!(
            "It's your turn. Current board:\n{}\n\nOpen positions: {}\n",
            view.render(),
            view.open_cells_text(),
        );
        if let Some(feedback) = feedback {
            user.push_str(&format!("\nYour previous attempts failed:{feedback}\n"));
        }
        user.push_str(
            "\nReply with a single position formatted as `row,col` (zero-indexed), \
             for example `0,3` for row 0 and column 3. Output only the position.",
        );

        Prompt::new(system, user)
    }
}

#[async_trait::async_trait]
impl Mover for AgentMover {
    #[instrument(skip(self, view, feedback), fields(agent = %self.name, retry = feedback.is_some()))]
    async fn propose_move(
        &mut self,
        view: &BoardView<'_>,
        feedback: Option<&str>,
    ) -> Result<Coord, MoverError> {
        let prompt = Self::build_prompt(view, feedback);
        let reply = self.client.complete(&prompt).await.map_err(|e| {
            warn!(error = %e, "Completion failed");
            MoverError::Unavailable { message: e.message }
        })?;
        debug!(reply = %reply.trim(), "Agent replied");
        Ok(reply.parse::<Coord>()?)
    }

    fn kind(&self) -> MoverKind {
        MoverKind::Automated
    }
}
