/// URL state definitions for tracking harvest progress
///
/// Every URL moves `Unvisited → Visiting → {Saved, Skipped, Failed}` and never
/// leaves a terminal state within one run.
use std::fmt;

/// Represents the current state of a URL in the harvest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlState {
    // ===== Active States =====
    /// URL is known (or not yet known) but has not been claimed by a worker
    Unvisited,

    /// URL has been claimed and is being fetched and extracted
    Visiting,

    // ===== Terminal States =====
    /// A section was extracted and persisted
    Saved,

    /// The page had no recognizable documentation content
    Skipped,

    /// Fetching failed or returned nothing
    Failed,
}

impl UrlState {
    /// Returns true if no further processing will happen for this URL
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Saved | Self::Skipped | Self::Failed)
    }

    /// Returns true if this represents a saved section
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved)
    }

    /// Returns true if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: UrlState) -> bool {
        matches!(
            (self, next),
            (Self::Unvisited, Self::Visiting)
                | (Self::Visiting, Self::Saved)
                | (Self::Visiting, Self::Skipped)
                | (Self::Visiting, Self::Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unvisited => "unvisited",
            Self::Visiting => "visiting",
            Self::Saved => "saved",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for UrlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
