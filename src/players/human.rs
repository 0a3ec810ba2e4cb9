//! Human player that types moves on a line-oriented input.

use crate::games::territory::{BoardView, Coord, Mover, MoverError, MoverKind};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tracing::{debug, instrument, warn};

/// Human player reading `row,col` lines.
///
/// The prompt, the board and any feedback from failed attempts are written
/// to `output` before each read.
pub struct HumanMover<R, W> {
    name: String,
    input: R,
    output: W,
}

impl HumanMover<BufReader<Stdin>, Stdout> {
    /// Creates a human player on the process's stdin and stdout.
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> HumanMover<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Creates a human player over arbitrary streams.
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    /// Returns the wrapped output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    async fn prompt(&mut self, view: &BoardView<'_>, feedback: Option<&str>) -> std::io::Result<()> {
        let marker = view.active_seat().map(|s| *s.marker()).unwrap_or('?');
        let mut text = format!("{}\n", view.render());
        if let Some(feedback) = feedback {
            text.push_str("Previous attempts failed:");
            text.push_str(feedback);
            text.push('\n');
        }
        text.push_str(&format!("{} ({marker}), enter row,col move: ", self.name));
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }
}

#[async_trait::async_trait]
impl<R, W> Mover for HumanMover<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    #[instrument(skip(self, view, feedback), fields(player = %self.name))]
    async fn propose_move(
        &mut self,
        view: &BoardView<'_>,
        feedback: Option<&str>,
    ) -> Result<Coord, MoverError> {
        self.prompt(view, feedback).await.map_err(|e| {
            warn!(error = %e, "Failed to write prompt");
            MoverError::InputClosed
        })?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).await.map_err(|e| {
            warn!(error = %e, "Failed to read move");
            MoverError::InputClosed
        })?;
        if read == 0 {
            debug!("End of input");
            return Err(MoverError::InputClosed);
        }

        debug!(input = %line.trim(), "Read move");
        Ok(line.parse::<Coord>()?)
    }

    fn kind(&self) -> MoverKind {
        MoverKind::Interactive
    }
}
