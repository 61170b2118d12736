//! Which tracks a run targets.
//!
//! A preview lists every track that implements the requested exercise,
//! inactive ones included, so the user sees the whole picture. A real
//! submission additionally skips inactive tracks so nothing is written to a
//! repository that is not live.

use serde::{Deserialize, Serialize};

use crate::Track;

/// Whether a run only previews or actually writes issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// List target tracks; make no write calls.
    DryRun,
    /// Create one issue per target track.
    Submit,
}

impl RunMode {
    /// Maps the `--yes` confirmation flag to a mode.
    pub fn from_confirmation(confirmed: bool) -> Self {
        if confirmed {
            Self::Submit
        } else {
            Self::DryRun
        }
    }
}

// ---------------------------------------------------------------------------

/// Track filter for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackSelection {
    exercise: String,
}

impl TrackSelection {
    /// Restricts the run to tracks implementing `exercise`. An empty slug
    /// selects every track.
    pub fn new(exercise: impl Into<String>) -> Self {
        Self {
            exercise: exercise.into(),
        }
    }

    /// The exercise filter, empty when unfiltered.
    pub fn exercise(&self) -> &str {
        &self.exercise
    }

    /// Returns `true` if `track` is targeted in `mode`.
    pub fn includes(&self, track: &Track, mode: RunMode) -> bool {
        if !track.has(&self.exercise) {
            return false;
        }
        match mode {
            RunMode::DryRun => true,
            RunMode::Submit => track.active,
        }
    }

    /// Yields the targeted tracks in directory order.
    pub fn select<'a>(
        &'a self,
        tracks: &'a [Track],
        mode: RunMode,
    ) -> impl Iterator<Item = &'a Track> + 'a {
        tracks.iter().filter(move |t| self.includes(t, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExerciseSlug, Problem, TrackId};

    fn track(id: &str, active: bool, exercises: &[&str]) -> Track {
        Track {
            id: TrackId::new(id).unwrap(),
            language: id.to_uppercase(),
            active,
            problems: exercises
                .iter()
                .map(|s| Problem::new(ExerciseSlug::new(*s).unwrap()))
                .collect(),
        }
    }

    fn ids<'a>(tracks: impl Iterator<Item = &'a Track>) -> Vec<&'a str> {
        tracks.map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn dry_run_keeps_inactive_tracks() {
        let tracks = vec![
            track("go", true, &["leap"]),
            track("cobol", false, &["leap"]),
        ];
        let selection = TrackSelection::default();
        assert_eq!(ids(selection.select(&tracks, RunMode::DryRun)), ["go", "cobol"]);
    }

    #[test]
    fn submit_drops_inactive_tracks() {
        let tracks = vec![
            track("go", true, &["leap"]),
            track("cobol", false, &["leap"]),
        ];
        let selection = TrackSelection::default();
        assert_eq!(ids(selection.select(&tracks, RunMode::Submit)), ["go"]);
    }

    #[test]
    fn exercise_filter_applies_in_both_modes() {
        let tracks = vec![
            track("go", true, &["two-fer"]),
            track("rust", true, &["leap"]),
            track("elm", false, &["two-fer"]),
        ];
        let selection = TrackSelection::new("two-fer");
        assert_eq!(ids(selection.select(&tracks, RunMode::DryRun)), ["go", "elm"]);
        assert_eq!(ids(selection.select(&tracks, RunMode::Submit)), ["go"]);
    }

    #[test]
    fn confirmation_flag_selects_mode() {
        assert_eq!(RunMode::from_confirmation(false), RunMode::DryRun);
        assert_eq!(RunMode::from_confirmation(true), RunMode::Submit);
    }
}
