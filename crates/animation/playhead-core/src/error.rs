//! Error types for timeline loading and instance construction.
//!
//! Per-frame operations (advance, apply) never return errors; malformed input
//! there is normalized in place. Only binding an instance to a timeline and
//! loading timeline data can fail.

/// Errors raised while loading timelines or binding instances to them.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum PlaybackError {
    /// No timeline is available under the requested name.
    #[error("Unbound timeline: no timeline named '{name}'")]
    UnboundTimeline { name: String },

    /// Timeline metadata or keyframes violate basic invariants.
    #[error("Invalid timeline: {reason}")]
    InvalidTimeline { reason: String },

    /// Timeline JSON could not be decoded.
    #[error("Timeline parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PlaybackError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidTimeline {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlaybackError>;
