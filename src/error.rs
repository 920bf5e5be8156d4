pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors arising at the puzzle data boundary.
///
/// Everything that can go wrong *during* solving or editing (a stalled
/// propagation run, an exhausted search, an edit aimed at a locked cell, a
/// value conflicting with its domain) is an expected outcome and is
/// reported through ordinary return values, never through this type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cell ({row}, {col}) holds {value}, expected a digit 0-9")]
    InvalidCellValue { row: usize, col: usize, value: u8 },

    #[error("puzzle text holds {found} cells, expected 81")]
    PuzzleTextLength { found: usize },

    #[error("puzzle text contains unexpected character {0:?}")]
    UnexpectedCharacter(char),

    #[error("unknown level {0:?}")]
    UnknownLevel(String),

    #[error("unknown solve mode {0:?}")]
    UnknownMode(String),
}
