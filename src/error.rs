//! Error types for decoding, rendering, persistence and export.

use thiserror::Error;

/// Errors produced while turning an icon code back into an [`IconDescription`].
///
/// A failed decode never touches the caller's live icon; the editor keeps its
/// previous state and surfaces the message.
///
/// [`IconDescription`]: crate::IconDescription
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The code was empty or only whitespace.
    #[error("icon code is empty")]
    Empty,

    /// The text-safe transform could not be reversed.
    #[error("icon code is not valid base64: {0}")]
    Transform(#[from] base64::DecodeError),

    /// The structured payload is not well-formed or has the wrong shape.
    #[error("icon payload is malformed: {0}")]
    Payload(#[from] serde_json::Error),

    /// A required field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A positional field could not be read as a number.
    #[error("field `{field}` is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A delimited record has a field count the format does not accept.
    #[error("{format} record {record} has {found} fields")]
    FieldCount {
        format: &'static str,
        record: usize,
        found: usize,
    },

    /// No known code format accepted the input.
    #[error("unrecognized icon code ({})", summarize(.attempts))]
    Unrecognized {
        attempts: Vec<(&'static str, DecodeError)>,
    },
}

fn summarize(attempts: &[(&'static str, DecodeError)]) -> String {
    attempts
        .iter()
        .map(|(name, err)| format!("{name}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// A shape token that is syntactically fine but names no known kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shape kind `{0}`")]
pub struct UnknownShapeKind(pub String);

/// Errors from the saved-icon store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store contents are not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that abort a bulk import as a whole.
///
/// Individual records with undecodable codes are skipped instead and counted
/// in the [`ImportReport`](crate::ImportReport).
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import document is not a map of saved icons: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not write imported icons: {0}")]
    Store(#[from] StoreError),
}

/// Errors from raster export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("rendered svg could not be parsed: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("cannot allocate a {0}x{0} raster")]
    Pixmap(u32),

    #[error("png encoding failed: {0}")]
    Png(#[from] image::ImageError),
}
