//! Error type shared by the session store and the recipe exporter.

use thiserror::Error;

/// Errors raised by the simulator core.
///
/// Out-of-range numbers are never errors: they are clamped where they are
/// entered. Everything here is either a programming mistake (an unknown field
/// name) or a recipe that cannot be written or read.
#[derive(Debug, Error)]
pub enum Error {
    /// A field name that is not `pv_mm` or one of the six setting keys.
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// A note code outside `A, B, C, D, F, G`.
    #[error("unknown note code `{0}`")]
    UnknownNoteCode(String),

    /// A numeric field holds NaN or infinity and cannot be exported.
    #[error("`{field}` is not a finite number")]
    NonFiniteValue {
        /// JSON key of the offending field
        field: &'static str,
    },

    /// Recipe JSON could not be produced or parsed.
    #[error("recipe JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
