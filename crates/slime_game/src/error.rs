use std::fmt;

/// Everything that can abort loading a description file or building a scene.
///
/// Loads are all-or-nothing: any of these leaves the caller without a
/// partially populated atlas or tilemap.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    Io {
        path: String,
        message: String,
    },
    /// A required field is missing or fails to parse.
    MalformedDescription(String),
    /// A name lookup against a registry found nothing.
    MissingReference {
        kind: &'static str,
        name: String,
    },
    InconsistentRowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    OutOfRangeTile {
        column: usize,
        row: usize,
        id: u32,
        tile_count: usize,
    },
    InvalidRegion {
        name: String,
        reason: String,
    },
    DuplicateName {
        kind: &'static str,
        name: String,
    },
    ArenaTooSmall {
        columns: usize,
        rows: usize,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, message } => write!(f, "Failed to read {path}: {message}"),
            LoadError::MalformedDescription(message) => {
                write!(f, "Malformed description: {message}")
            }
            LoadError::MissingReference { kind, name } => {
                write!(f, "Missing reference: no {kind} named '{name}'")
            }
            LoadError::InconsistentRowLength {
                row,
                expected,
                found,
            } => write!(
                f,
                "Inconsistent row length: row {row} has {found} tiles, expected {expected}"
            ),
            LoadError::OutOfRangeTile {
                column,
                row,
                id,
                tile_count,
            } => write!(
                f,
                "Tile id {id} at ({column}, {row}) is out of range for a tileset of {tile_count} tiles"
            ),
            LoadError::InvalidRegion { name, reason } => {
                write!(f, "Invalid region '{name}': {reason}")
            }
            LoadError::DuplicateName { kind, name } => {
                write!(f, "Duplicate {kind} name '{name}'")
            }
            LoadError::ArenaTooSmall { columns, rows } => write!(
                f,
                "Tilemap of {columns}x{rows} has no interior cells (need at least 3x3)"
            ),
        }
    }
}

impl std::error::Error for LoadError {}

impl LoadError {
    pub fn io(path: &str, err: impl fmt::Display) -> Self {
        LoadError::Io {
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        LoadError::MalformedDescription(message.into())
    }
}
