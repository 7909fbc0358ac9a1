//! HTML for both overlay layouts.
//!
//! A hidden overlay stays in the markup, moved off-screen and transparent, so
//! the host stylesheet can animate the change.

use maud::{Markup, html};

use crate::state::Visibility;
use crate::view::{OverlayLayout, ViewportClass};

const TRANSITION: &str = "transition-all duration-300 ease-out";

fn bar_state(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Visible => "translate-y-0 opacity-100",
        Visibility::Hidden => "translate-y-full opacity-0 pointer-events-none",
    }
}

fn button_state(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Visible => "translate-y-0 opacity-100",
        Visibility::Hidden => "translate-y-4 opacity-0 pointer-events-none",
    }
}

/// Draw one layout. `responsive` adds the breakpoint classes that restrict it
/// to its own viewport class when the actual width is unknown.
pub(crate) fn layout(
    layout: &OverlayLayout,
    visibility: Visibility,
    responsive: bool,
    business_name: &str,
) -> Markup {
    let hidden = if visibility.is_visible() { "false" } else { "true" };
    // Hidden actions stay in the DOM but must drop out of the tab order.
    let tabindex = (!visibility.is_visible()).then_some("-1");

    match layout {
        OverlayLayout::CompactBar { call, quote } => {
            let display = if responsive { "md:hidden" } else { "" };
            let classes = format!(
                "cta-overlay fixed inset-x-0 bottom-0 z-50 {display} {TRANSITION} {}",
                bar_state(visibility)
            );
            html! {
                div class=(classes) data-layout="compact" data-visibility=(visibility.to_string()) aria-hidden=(hidden) {
                    div class="flex gap-2 border-t border-gray-200 bg-white p-3 shadow-lg" {
                        a href=(call.href) class="flex-1 rounded-lg bg-blue-600 py-3 text-center font-semibold text-white" data-action="call" tabindex=[tabindex] {
                            "Call " (call.label)
                        }
                        a href=(quote.href) class="flex-1 rounded-lg bg-orange-500 py-3 text-center font-semibold text-white" data-action="quote" tabindex=[tabindex] {
                            (quote.label)
                        }
                    }
                }
            }
        }
        OverlayLayout::FloatingButton { call } => {
            let display = if responsive { "hidden md:flex" } else { "flex" };
            let classes = format!(
                "cta-overlay fixed bottom-6 right-6 z-50 {display} items-center gap-2 rounded-full bg-blue-600 px-5 py-4 font-semibold text-white shadow-xl {TRANSITION} {}",
                button_state(visibility)
            );
            html! {
                a href=(call.href) class=(classes) data-layout="wide" data-action="call" data-visibility=(visibility.to_string()) aria-hidden=(hidden) tabindex=[tabindex] aria-label=(format!("Call {business_name}")) {
                    span { "Call" }
                    span { (call.label) }
                }
            }
        }
    }
}

/// Both layouts when the viewport is unknown, otherwise only the matching one.
pub(crate) fn overlay(
    layouts: &[OverlayLayout],
    visibility: Visibility,
    viewport: Option<ViewportClass>,
    business_name: &str,
) -> Markup {
    html! {
        @for candidate in layouts {
            @match viewport {
                None => { (layout(candidate, visibility, true, business_name)) }
                Some(class) if class == candidate.viewport() => {
                    (layout(candidate, visibility, false, business_name))
                }
                Some(_) => {}
            }
        }
    }
}
