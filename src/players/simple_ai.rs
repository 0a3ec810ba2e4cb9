//! Simple AI that picks the first open cell.

use crate::games::territory::{BoardView, Coord, Mover, MoverError, MoverKind};

/// Returns the first open cell in row-major order.
pub fn pick_move(view: &BoardView<'_>) -> Option<Coord> {
    view.open_cells().into_iter().next()
}

/// Automated player backed by [`pick_move`]. Needs no network.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleAi;

#[async_trait::async_trait]
impl Mover for SimpleAi {
    async fn propose_move(
        &mut self,
        view: &BoardView<'_>,
        _feedback: Option<&str>,
    ) -> Result<Coord, MoverError> {
        pick_move(view).ok_or_else(|| MoverError::Unavailable {
            message: "No open cells".to_string(),
        })
    }

    fn kind(&self) -> MoverKind {
        MoverKind::Automated
    }
}
