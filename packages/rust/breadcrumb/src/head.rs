//! Page head metadata collector.

use maud::{Markup, html};

/// Ordered collection of fragments destined for the document `<head>`.
#[derive(Debug, Clone, Default)]
pub struct PageHead {
    fragments: Vec<Markup>,
}

impl PageHead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment; insertion order is render order.
    pub fn push(&mut self, fragment: Markup) {
        self.fragments.push(fragment);
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// All fragments concatenated.
    pub fn render(&self) -> Markup {
        html! {
            @for fragment in &self.fragments {
                (fragment)
            }
        }
    }
}
