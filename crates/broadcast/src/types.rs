//! Track records as published by the track directory.
//!
//! A [`Track`] is read once per run and never modified. The field layout
//! mirrors the directory's JSON so the adapter can decode straight into it.

use serde::{Deserialize, Serialize};

use crate::{ExerciseSlug, TrackId};

/// One exercise implemented by a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Exercise identifier.
    pub slug: ExerciseSlug,
}

impl Problem {
    /// Creates a [`Problem`] for the given exercise.
    pub fn new(slug: ExerciseSlug) -> Self {
        Self { slug }
    }
}

// ---------------------------------------------------------------------------

/// A per-language exercise repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Directory identifier; also names the GitHub repository (`x<id>`).
    pub id: TrackId,

    /// Human-readable language name, used in diagnostics.
    pub language: String,

    /// Whether the track is live. Missing in the payload means inactive.
    #[serde(default)]
    pub active: bool,

    /// Exercises implemented by this track, in directory order.
    #[serde(default)]
    pub problems: Vec<Problem>,
}

impl Track {
    /// Returns `true` if this track implements `exercise`.
    ///
    /// An empty `exercise` means "no filter" and matches every track.
    pub fn has(&self, exercise: &str) -> bool {
        if exercise.is_empty() {
            return true;
        }
        self.problems.iter().any(|p| p.slug.as_str() == exercise)
    }
}
