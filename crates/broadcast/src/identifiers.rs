//! Newtype domain identifiers.
//!
//! Every value that names something outside the process (a track repository,
//! an exercise, a created issue) is a distinct newtype wrapping a `String`, so
//! a [`TrackId`] can never be passed where an [`ExerciseSlug`] is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Identifies a track in the track directory (e.g. `"go"`, `"rust"`).
    ///
    /// The track's GitHub repository is named after it with an `x` prefix
    /// (`xgo`, `xrust`).
    TrackId
}

string_id! {
    /// Short identifier of one exercise within a track (e.g. `"two-fer"`).
    ExerciseSlug
}

string_id! {
    /// Browser URL of an issue created on GitHub (the `html_url` field).
    IssueUrl
}

// ---------------------------------------------------------------------------

/// Identifies a single invocation of the tool.
///
/// Generated fresh for every run and recorded on the run's tracing span so
/// that every log line from one run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
