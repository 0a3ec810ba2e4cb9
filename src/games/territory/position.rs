//! Parsing of `row,col` move text.
//!
//! Humans type moves and language models generate them, so the parser
//! accepts a little decoration around the two numbers: surrounding
//! whitespace, code fences or backticks, and an optional pair of
//! parentheses or brackets. Anything else is rejected with a message that
//! can be handed back to the player verbatim.

use super::types::Coord;
use derive_more::{Display, Error};
use std::str::FromStr;
use tracing::instrument;

/// Reasons a move string could not be read as a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseCoordError {
    /// Input contained nothing after trimming.
    #[display("Empty move; expected `row,col`")]
    Empty,

    /// Input did not split into exactly two parts.
    #[display("Expected `row,col` but got `{input}`")]
    WrongShape {
        /// The trimmed input.
        input: String,
    },

    /// One of the parts was not a non-negative integer.
    #[display("`{part}` is not a valid {axis} index (must be a non-negative integer)")]
    NotAnIndex {
        /// Which axis failed to parse.
        axis: &'static str,
        /// The offending text.
        part: String,
    },
}

impl FromStr for Coord {
    type Err = ParseCoordError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = strip_decoration(s);
        if trimmed.is_empty() {
            return Err(ParseCoordError::Empty);
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        let [row, col] = parts.as_slice() else {
            return Err(ParseCoordError::WrongShape {
                input: trimmed.to_string(),
            });
        };

        Ok(Coord::new(parse_index("row", row)?, parse_index("column", col)?))
    }
}

fn parse_index(axis: &'static str, part: &str) -> Result<usize, ParseCoordError> {
    part.parse::<usize>()
        .map_err(|_| ParseCoordError::NotAnIndex {
            axis,
            part: part.to_string(),
        })
}

/// Removes fences, backticks and one layer of brackets.
fn strip_decoration(s: &str) -> &str {
    let mut text = s.trim();
    text = text.trim_matches('`').trim();
    if let Some(rest) = text.strip_prefix("text") {
        text = rest.trim();
    }
    for (open, close) in [('(', ')'), ('[', ']')] {
        if let Some(inner) = text.strip_prefix(open).and_then(|t| t.strip_suffix(close)) {
            text = inner.trim();
            break;
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_pair() {
        assert_eq!("0,3".parse::<Coord>(), Ok(Coord::new(0, 3)));
    }

    #[test]
    fn test_tuple_with_spaces() {
        assert_eq!(" (2, 4)\n".parse::<Coord>(), Ok(Coord::new(2, 4)));
    }

    #[test]
    fn test_code_fence() {
        assert_eq!("```\n1,1\n```".parse::<Coord>(), Ok(Coord::new(1, 1)));
        assert_eq!("`3,0`".parse::<Coord>(), Ok(Coord::new(3, 0)));
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            "-1,2".parse::<Coord>(),
            Err(ParseCoordError::NotAnIndex { axis: "row", .. })
        ));
    }

    #[test]
    fn test_wrong_shape() {
        assert!(matches!(
            "1,2,3".parse::<Coord>(),
            Err(ParseCoordError::WrongShape { .. })
        ));
        assert!(matches!(
            "center".parse::<Coord>(),
            Err(ParseCoordError::WrongShape { .. })
        ));
        assert_eq!("   ".parse::<Coord>(), Err(ParseCoordError::Empty));
    }
}
