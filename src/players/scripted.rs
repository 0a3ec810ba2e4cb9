//! Player that replays a fixed list of responses.

use crate::games::territory::{BoardView, Coord, Mover, MoverError, MoverKind};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Replays pre-recorded responses in order, for replays and tests.
///
/// Each call pops the next response. Once the script runs out every call
/// reports `MoverError::InputClosed`. The feedback received on each call is
/// recorded and can be read back through [`ScriptedMover::feedback_log`].
#[derive(Debug, Clone)]
pub struct ScriptedMover {
    kind: MoverKind,
    script: VecDeque<Result<Coord, MoverError>>,
    seen: Arc<Mutex<Vec<Option<String>>>>,
}

impl ScriptedMover {
    /// Creates a mover from raw responses.
    pub fn new(kind: MoverKind, script: impl IntoIterator<Item = Result<Coord, MoverError>>) -> Self {
        Self {
            kind,
            script: script.into_iter().collect(),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a mover that proposes `coords` in order.
    pub fn from_coords(kind: MoverKind, coords: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self::new(kind, coords.into_iter().map(|c| Ok(Coord::from(c))))
    }

    /// Creates a mover that reads each line of `lines` as typed input.
    pub fn from_lines<'a>(kind: MoverKind, lines: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(
            kind,
            lines
                .into_iter()
                .map(|line| line.parse::<Coord>().map_err(MoverError::from)),
        )
    }

    /// Shared handle to the feedback passed on each call so far.
    pub fn feedback_log(&self) -> Arc<Mutex<Vec<Option<String>>>> {
        Arc::clone(&self.seen)
    }
}

#[async_trait::async_trait]
impl Mover for ScriptedMover {
    async fn propose_move(
        &mut self,
        _view: &BoardView<'_>,
        feedback: Option<&str>,
    ) -> Result<Coord, MoverError> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(feedback.map(str::to_string));
        }
        let next = self.script.pop_front().unwrap_or(Err(MoverError::InputClosed));
        debug!(?next, "Scripted move");
        next
    }

    fn kind(&self) -> MoverKind {
        self.kind
    }
}
