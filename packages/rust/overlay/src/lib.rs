//! Adaptive call-to-action overlay for LocalSite pages.
//!
//! The overlay subscribes to a [`ScrollSource`], keeps a two-state
//! [`OverlayStateMachine`] in sync with the scroll offset, and renders a
//! compact bottom bar (Call + Get Quote) or a wide floating Call button. Both
//! layouts follow the same visibility flag.

mod render;
pub mod signal;
pub mod state;
pub mod view;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use maud::Markup;
use tracing::{debug, instrument};

use localsite_shared::{BusinessIdentity, OverlayConfig};

pub use signal::{ScrollListener, ScrollSignal, ScrollSource, Subscription};
pub use state::{DEFAULT_SCROLL_THRESHOLD, OverlayStateMachine, Visibility};
pub use view::{
    CtaAction, CtaKind, DEFAULT_COMPACT_BREAKPOINT, OverlayLayout, OverlayView, ViewportClass,
};

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Presentation constants for the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySettings {
    /// Offset the page must exceed before the overlay shows.
    pub scroll_threshold: f64,
    /// Viewport widths below this are compact.
    pub compact_breakpoint: u32,
    /// In-page anchor for the quote action.
    pub quote_anchor: String,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            compact_breakpoint: DEFAULT_COMPACT_BREAKPOINT,
            quote_anchor: "#quote".into(),
        }
    }
}

impl From<&OverlayConfig> for OverlaySettings {
    fn from(config: &OverlayConfig) -> Self {
        Self {
            scroll_threshold: config.scroll_threshold,
            compact_breakpoint: config.compact_breakpoint,
            quote_anchor: config.quote_anchor.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

/// Unmounted overlay: identity plus settings, no scroll state yet.
#[derive(Debug, Clone)]
pub struct AdaptiveCtaOverlay {
    identity: Arc<BusinessIdentity>,
    settings: OverlaySettings,
}

impl AdaptiveCtaOverlay {
    pub fn new(identity: Arc<BusinessIdentity>, settings: OverlaySettings) -> Self {
        Self { identity, settings }
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    /// Viewport class for a width in px.
    pub fn classify(&self, width: u32) -> ViewportClass {
        ViewportClass::classify(width, self.settings.compact_breakpoint)
    }

    /// Layout shown on the given viewport class.
    pub fn layout(&self, viewport: ViewportClass) -> OverlayLayout {
        let call = CtaAction::call(&self.identity);
        match viewport {
            ViewportClass::Compact => OverlayLayout::CompactBar {
                call,
                quote: CtaAction::quote(&self.settings.quote_anchor),
            },
            ViewportClass::Wide => OverlayLayout::FloatingButton { call },
        }
    }

    /// Markup for a given visibility. With no viewport, both layouts are
    /// emitted and the breakpoint classes pick one.
    pub fn render(&self, visibility: Visibility, viewport: Option<ViewportClass>) -> Markup {
        let layouts = [
            self.layout(ViewportClass::Compact),
            self.layout(ViewportClass::Wide),
        ];
        render::overlay(&layouts, visibility, viewport, self.identity.name())
    }

    /// Start listening to scroll events. The overlay starts hidden and stays
    /// subscribed until the returned handle is dropped.
    #[instrument(skip_all, fields(threshold = self.settings.scroll_threshold))]
    pub fn mount<S: ScrollSource + ?Sized>(&self, source: &S) -> MountedOverlay {
        let machine = Rc::new(RefCell::new(OverlayStateMachine::new(
            self.settings.scroll_threshold,
        )));

        let listener_machine = Rc::clone(&machine);
        let subscription = source.subscribe(Box::new(move |offset| {
            listener_machine.borrow_mut().on_scroll(offset);
        }));
        debug!("overlay mounted");

        MountedOverlay {
            overlay: self.clone(),
            machine,
            _subscription: subscription,
        }
    }
}

/// An overlay attached to a scroll source.
///
/// Dropping it (or calling [`MountedOverlay::unmount`]) releases the
/// subscription.
#[derive(Debug)]
pub struct MountedOverlay {
    overlay: AdaptiveCtaOverlay,
    machine: Rc<RefCell<OverlayStateMachine>>,
    _subscription: Subscription,
}

impl MountedOverlay {
    pub fn visibility(&self) -> Visibility {
        self.machine.borrow().visibility()
    }

    /// Current state for one viewport class.
    pub fn view(&self, viewport: ViewportClass) -> OverlayView {
        OverlayView {
            visibility: self.visibility(),
            layout: self.overlay.layout(viewport),
        }
    }

    /// Current markup; see [`AdaptiveCtaOverlay::render`].
    pub fn render(&self, viewport: Option<ViewportClass>) -> Markup {
        self.overlay.render(self.visibility(), viewport)
    }

    /// Release the scroll subscription.
    pub fn unmount(self) {
        debug!("overlay unmounted");
    }
}
