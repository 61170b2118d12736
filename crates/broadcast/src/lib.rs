//! Core domain for Blazon.
//!
//! This crate contains every domain concept used to broadcast one issue to
//! many exercise tracks: identifiers, the track record, the ticket payload,
//! the track selection policy, and the port traits the runner drives.
//! Infrastructure crates implement the traits defined here; they never add
//! domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`TrackId`, `ExerciseSlug`, `IssueUrl`, `RunId`) |
//! | [`types`] | Track records (`Track`, `Problem`) |
//! | [`ticket`] | Issue payload (`Ticket`, `Labels`) |
//! | [`selection`] | Run mode and track filter |
//! | [`ports`] | `TrackDirectory` and `IssueTracker` traits with their errors |
//! | [`errors`] | Input errors and error tiers |

pub mod errors;
pub mod identifiers;
pub mod ports;
pub mod selection;
pub mod ticket;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{BlazonError, ErrorTier};
pub use identifiers::{ExerciseSlug, IssueUrl, RunId, TrackId};
pub use ports::{DirectoryError, IssueTracker, IssueTrackerError, TrackDirectory};
pub use selection::{RunMode, TrackSelection};
pub use ticket::{Labels, Ticket};
pub use types::{Problem, Track};
