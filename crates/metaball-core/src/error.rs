use thiserror::Error;

/// Rejected index-addressed scene mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("ball index {index} out of range (scene has {len} balls)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A single SCAD line the importer could not make sense of.
///
/// These never escape the parser; they are logged and the line is skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScadError {
    #[error("line {line}: expected a number, found '{found}'")]
    BadNumber { line: usize, found: String },
    #[error("line {line}: translate() needs 3 coordinates, found {count}")]
    BadVector { line: usize, count: usize },
    #[error("line {line}: sphere radius must be positive and finite, got {radius}")]
    BadRadius { line: usize, radius: f32 },
    #[error("line {line}: expected '{expected}', found '{found}'")]
    Expected {
        line: usize,
        expected: char,
        found: String,
    },
    #[error("line {line}: unbalanced '{token}'")]
    Unbalanced { line: usize, token: char },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A backend could not produce this frame. The next frame retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("render surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("render surface lost")]
    SurfaceLost,
}
