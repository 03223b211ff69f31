use std::fmt;

pub type Result<T, E = CodecError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("frame {frame}: expected {expected} {axis}, found {found}")]
    DimensionMismatch {
        frame: usize,
        axis: Axis,
        expected: usize,
        found: usize,
    },

    #[error("cannot encode an empty sequence")]
    EmptySequence,

    #[error("frame {frame}: invalid cell {cell:?} at row {row}, column {column}")]
    InvalidCell {
        frame: usize,
        row: usize,
        column: usize,
        cell: char,
    },

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("syntax error at byte {offset}: {reason}")]
    Syntax { offset: usize, reason: String },
}

impl CodecError {
    pub fn syntax(offset: usize, reason: impl Into<String>) -> Self {
        Self::Syntax {
            offset,
            reason: reason.into(),
        }
    }
}

/// Which side of a grid disagreed with the declared shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Number of rows (height).
    Rows,
    /// Number of cells in a single row (width).
    Columns { row: usize },
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Rows => write!(f, "rows"),
            Axis::Columns { row } => write!(f, "columns in row {}", row),
        }
    }
}
