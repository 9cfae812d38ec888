use thiserror::Error;

/// Errors that can occur while recentering an SVG document.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RecenterError {
    #[error("unsupported media type `{0}`, expected image/svg+xml")]
    InvalidInputType(String),

    #[error("failed to read input: {0}")]
    ReadFailure(#[from] std::io::Error),

    #[error("malformed SVG document: {0}")]
    MalformedDocument(String),

    #[error("invalid path data: {0}")]
    InvalidPathData(String),

    #[error("document contains no path outlines")]
    NoOutlines,

    #[error("not enough points to compute a centroid")]
    EmptyGeometry,

    #[error("combined outline encloses zero area")]
    DegenerateGeometry,

    #[error("cannot recenter on an undefined centroid")]
    UndefinedCentroid,

    #[error("unsupported path segment `{0}`")]
    UnsupportedSegmentKind(char),

    #[error("segment `{kind}` expects {expected} coordinate values, found {found}")]
    InvalidOperands {
        kind: char,
        expected: usize,
        found: usize,
    },

    #[error("failed to render preview: {0}")]
    Render(String),
}

impl RecenterError {
    /// Human-readable status line for the upload boundary.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInputType(_) => "Please upload a valid SVG file.".to_string(),
            Self::ReadFailure(_) => "Error reading file".to_string(),
            Self::NoOutlines => "The SVG does not contain a valid path.".to_string(),
            Self::EmptyGeometry => "No valid points found in the SVG paths.".to_string(),
            Self::DegenerateGeometry => {
                "The SVG paths enclose no area, so no centroid exists.".to_string()
            }
            other => format!("Error: {other}"),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RecenterError>;
