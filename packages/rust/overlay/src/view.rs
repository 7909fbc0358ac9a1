//! Viewport classification and the data behind each overlay layout.

use localsite_shared::BusinessIdentity;

use crate::state::Visibility;

/// Default width (px) at which the layout switches from compact to wide.
pub const DEFAULT_COMPACT_BREAKPOINT: u32 = 768;

/// Binary display-width class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Compact,
    Wide,
}

impl ViewportClass {
    /// `width < breakpoint` is compact.
    pub fn classify(width: u32, breakpoint: u32) -> Self {
        if width < breakpoint {
            Self::Compact
        } else {
            Self::Wide
        }
    }
}

/// What a call-to-action button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtaKind {
    Call,
    Quote,
}

/// A single button in the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtaAction {
    pub kind: CtaKind,
    pub label: String,
    pub href: String,
}

impl CtaAction {
    /// Dial the business: targets `phone_link`, shows `phone`.
    pub fn call(identity: &BusinessIdentity) -> Self {
        Self {
            kind: CtaKind::Call,
            label: identity.phone().to_string(),
            href: identity.phone_link().to_string(),
        }
    }

    /// Jump to the in-page quote form.
    pub fn quote(anchor: &str) -> Self {
        Self {
            kind: CtaKind::Quote,
            label: "Get Quote".into(),
            href: anchor.to_string(),
        }
    }
}

/// Arrangement of actions for one viewport class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayLayout {
    /// Full-width bar pinned to the bottom edge.
    CompactBar { call: CtaAction, quote: CtaAction },
    /// Round button floating in the bottom-right corner.
    FloatingButton { call: CtaAction },
}

impl OverlayLayout {
    pub fn viewport(&self) -> ViewportClass {
        match self {
            Self::CompactBar { .. } => ViewportClass::Compact,
            Self::FloatingButton { .. } => ViewportClass::Wide,
        }
    }

    /// Actions in display order.
    pub fn actions(&self) -> Vec<&CtaAction> {
        match self {
            Self::CompactBar { call, quote } => vec![call, quote],
            Self::FloatingButton { call } => vec![call],
        }
    }
}

/// Everything needed to draw the overlay for one viewport at one moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    pub visibility: Visibility,
    pub layout: OverlayLayout,
}
