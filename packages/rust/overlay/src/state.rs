//! Scroll-driven visibility state machine.

use tracing::{debug, trace};

/// Default scroll offset the page must exceed before the overlay shows.
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 100.0;

/// Whether the overlay is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

impl Visibility {
    /// Level-triggered derivation: `offset > threshold`. NaN is never above.
    pub fn from_offset(offset: f64, threshold: f64) -> Self {
        if offset > threshold {
            Self::Visible
        } else {
            Self::Hidden
        }
    }

    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hidden => f.write_str("hidden"),
            Self::Visible => f.write_str("visible"),
        }
    }
}

/// Two-state machine recomputed from the current offset on every event.
///
/// No hysteresis and no debounce: the state after an event depends only on
/// that event's offset.
#[derive(Debug, Clone)]
pub struct OverlayStateMachine {
    threshold: f64,
    visibility: Visibility,
}

impl OverlayStateMachine {
    /// Start hidden.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            visibility: Visibility::Hidden,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Feed one scroll offset; returns the new visibility.
    pub fn on_scroll(&mut self, offset: f64) -> Visibility {
        let next = Visibility::from_offset(offset, self.threshold);
        trace!(offset, %next, "scroll event");

        if next != self.visibility {
            debug!(from = %self.visibility, to = %next, offset, "overlay visibility changed");
            self.visibility = next;
        }
        next
    }
}

impl Default for OverlayStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD)
    }
}
