//! The rectangular grid of claimable cells.

use super::error::BoardError;
use super::types::{Cell, Coord, PlayerId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Row-major grid of cells with fixed dimensions.
///
/// Cells only change through [`Board::claim`], and a claimed cell keeps its
/// owner for the rest of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::InvalidDimensions` if the dimensions are rejected
    /// by [`Board::cell_count`].
    #[instrument]
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        let cells = Self::cell_count(rows, cols)?;
        debug!(cells, "Creating board");
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; cells],
        })
    }

    /// Number of cells a `rows` x `cols` board would hold.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::InvalidDimensions` if either dimension is zero or
    /// the grid is too large to address in memory.
    pub fn cell_count(rows: usize, cols: usize) -> Result<usize, BoardError> {
        let invalid = || BoardError::InvalidDimensions { rows, cols };
        if rows == 0 || cols == 0 {
            return Err(invalid());
        }
        let cells = rows.checked_mul(cols).ok_or_else(invalid)?;
        // Vec allocations are capped at isize::MAX bytes.
        let bytes = cells
            .checked_mul(std::mem::size_of::<Cell>())
            .ok_or_else(invalid)?;
        if bytes > isize::MAX as usize {
            return Err(invalid());
        }
        Ok(cells)
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a board has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Checks whether `coord` lies on the board.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    fn index_of(&self, coord: Coord) -> Result<usize, BoardError> {
        if self.contains(coord) {
            Ok(coord.row * self.cols + coord.col)
        } else {
            Err(BoardError::OutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Gets the cell at `coord`.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::OutOfBounds` if `coord` is off the board.
    pub fn cell_at(&self, coord: Coord) -> Result<Cell, BoardError> {
        let index = self.index_of(coord)?;
        Ok(self.cells[index])
    }

    /// Returns the in-bounds orthogonal neighbors of `coord`.
    ///
    /// Order is up, down, left, right; missing entries at edges and
    /// corners are skipped. Diagonals never count as neighbors.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::OutOfBounds` if `coord` is off the board.
    pub fn neighbors_of(&self, coord: Coord) -> Result<Vec<Coord>, BoardError> {
        self.index_of(coord)?;
        Ok(self.adjacent(coord).collect())
    }

    /// Orthogonal neighbors of an in-bounds coordinate.
    pub(crate) fn adjacent(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        let Coord { row, col } = coord;
        [
            row.checked_sub(1).map(|r| Coord::new(r, col)),
            Some(Coord::new(row + 1, col)),
            col.checked_sub(1).map(|c| Coord::new(row, c)),
            Some(Coord::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(|c| self.contains(*c))
    }

    /// Claims the cell at `coord` for `player`.
    ///
    /// Either the owner is set or the board is left untouched.
    ///
    /// # Errors
    ///
    /// - `BoardError::OutOfBounds` if `coord` is off the board
    /// - `BoardError::AlreadyOwned` if someone already owns the cell
    #[instrument(skip(self), fields(rows = self.rows, cols = self.cols))]
    pub fn claim(&mut self, coord: Coord, player: PlayerId) -> Result<(), BoardError> {
        let index = self.index_of(coord)?;
        match self.cells[index] {
            Cell::OwnedBy(owner) => Err(BoardError::AlreadyOwned { coord, owner }),
            Cell::Empty => {
                self.cells[index] = Cell::OwnedBy(player);
                debug!(%coord, %player, "Cell claimed");
                Ok(())
            }
        }
    }

    /// Checks if every cell has an owner.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Number of owned cells.
    pub fn owned_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Coord::new(row, col)))
    }

    /// Coordinates still open for claiming, in row-major order.
    pub fn open_cells(&self) -> Vec<Coord> {
        self.coords()
            .zip(self.cells.iter())
            .filter(|(_, cell)| cell.is_empty())
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Coordinates owned by `player`, in row-major order.
    pub fn cells_owned_by(&self, player: PlayerId) -> Vec<Coord> {
        self.coords()
            .zip(self.cells.iter())
            .filter(|(_, cell)| cell.owner() == Some(player))
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Renders the board inside an ASCII frame.
    ///
    /// Owned cells show the marker returned by `marker`; empty cells are a
    /// blank. The layout only depends on the board contents, so the same
    /// board always renders to the same text:
    ///
    /// ```text
    /// +-+-+
    /// |o| |
    /// | |*|
    /// +-+-+
    /// ```
    pub fn render_with(&self, marker: impl Fn(PlayerId) -> char) -> String {
        let border = format!("{}+", "+-".repeat(self.cols));
        let mut out = String::with_capacity((self.rows + 2) * (2 * self.cols + 2));
        out.push_str(&border);
        out.push('\n');
        for row in self.cells.chunks(self.cols) {
            for cell in row {
                out.push('|');
                out.push(cell.owner().map(&marker).unwrap_or(' '));
            }
            out.push_str("|\n");
        }
        out.push_str(&border);
        out
    }
}
