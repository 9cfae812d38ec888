//! Input boundary: accepted media type, read failures, status line.
//!
//! Every error from the pipeline stops here and becomes a single
//! [`Status`] message. Output is only attached when the whole run
//! succeeded.

use std::fs;
use std::io;
use std::path::Path;

use tracing::error;

use crate::config::RecenterConfig;
use crate::error::{RecenterError, Result};
use crate::{process_svg, Recentered};

pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// A file handed to the tool, as received from the user.
#[derive(Debug)]
pub struct Upload {
    pub name: String,
    /// Declared media type.
    pub media_type: String,
    /// Decoded text, or the error the read produced.
    pub content: io::Result<String>,
}

impl Upload {
    /// Read a file from disk, deriving its media type from the extension.
    pub fn from_path(path: &Path) -> Self {
        Self {
            name: path.display().to_string(),
            media_type: media_type_for(path).to_string(),
            content: fs::read_to_string(path),
        }
    }

    /// Text of an accepted upload.
    pub fn text(self) -> Result<String> {
        if self.media_type != SVG_MEDIA_TYPE {
            return Err(RecenterError::InvalidInputType(self.media_type));
        }
        Ok(self.content?)
    }
}

/// Media type for a file name, by extension.
pub fn media_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("svg") => SVG_MEDIA_TYPE,
        _ => "application/octet-stream",
    }
}

/// User-visible status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
}

/// Result of handling one upload.
#[derive(Debug)]
pub struct Outcome {
    pub status: Status,
    pub output: Option<Recentered>,
}

/// Run the whole pipeline for one upload.
pub fn handle_upload(upload: Upload, config: &RecenterConfig) -> Outcome {
    let name = upload.name.clone();
    match upload.text().and_then(|text| process_svg(&text, config)) {
        Ok(result) => {
            let c = result.centroid;
            let message = format!(
                "Centroid successfully calculated and displayed. Centroid at ({}, {}).",
                c.x, c.y
            );
            Outcome {
                status: Status {
                    message,
                    is_error: false,
                },
                output: Some(result),
            }
        }
        Err(e) => {
            error!(upload = %name, error = %e, "processing failed");
            Outcome {
                status: Status {
                    message: e.user_message(),
                    is_error: true,
                },
                output: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn upload(media_type: &str, content: io::Result<String>) -> Upload {
        Upload {
            name: "drawing.svg".to_string(),
            media_type: media_type.to_string(),
            content,
        }
    }

    #[test]
    fn wrong_media_type_is_refused_before_parsing() {
        let outcome = handle_upload(
            upload("image/png", Ok("not even markup".to_string())),
            &RecenterConfig::default(),
        );
        assert!(outcome.output.is_none());
        assert!(outcome.status.is_error);
        assert_eq!(outcome.status.message, "Please upload a valid SVG file.");
    }

    #[test]
    fn read_failure_is_reported() {
        let failed = io::Error::new(io::ErrorKind::UnexpectedEof, "truncated");
        let outcome = handle_upload(upload(SVG_MEDIA_TYPE, Err(failed)), &RecenterConfig::default());
        assert!(outcome.output.is_none());
        assert_eq!(outcome.status.message, "Error reading file");
    }

    #[test]
    fn success_reports_centroid() {
        let svg = r#"<svg><path d="M0 0 L1 0 L1 1 L0 1 Z"/></svg>"#;
        let outcome = handle_upload(
            upload(SVG_MEDIA_TYPE, Ok(svg.to_string())),
            &RecenterConfig::default(),
        );
        assert!(!outcome.status.is_error);
        assert!(outcome.status.message.contains("(0.5, 0.5)"));
        assert!(outcome.output.is_some());
    }

    #[test]
    fn pipeline_errors_become_messages() {
        let outcome = handle_upload(
            upload(SVG_MEDIA_TYPE, Ok("<svg></svg>".to_string())),
            &RecenterConfig::default(),
        );
        assert!(outcome.output.is_none());
        assert_eq!(outcome.status.message, "The SVG does not contain a valid path.");
    }

    #[test]
    fn from_path_reads_and_types_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shape.SVG");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "<svg/>").unwrap();

        let upload = Upload::from_path(&path);
        assert_eq!(upload.media_type, SVG_MEDIA_TYPE);
        assert_eq!(upload.text().unwrap(), "<svg/>");

        let missing = Upload::from_path(&dir.path().join("missing.svg"));
        assert!(matches!(missing.text(), Err(RecenterError::ReadFailure(_))));
        assert_eq!(
            media_type_for(Path::new("photo.png")),
            "application/octet-stream"
        );
    }
}
