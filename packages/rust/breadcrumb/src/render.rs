//! HTML rendering of the visual trail and its metadata script.

use maud::{Markup, PreEscaped, html};
use tracing::instrument;

use localsite_shared::{Result, TrailVariant};

use crate::head::PageHead;
use crate::trail::{BreadcrumbTrail, EntryKind};

/// Glyph placed between consecutive entries.
pub const SEPARATOR: &str = "›";

/// CSS classes for one style profile.
struct VariantStyles {
    link: &'static str,
    separator: &'static str,
    current: &'static str,
    text: &'static str,
}

fn styles(variant: TrailVariant) -> VariantStyles {
    match variant {
        TrailVariant::Light => VariantStyles {
            link: "text-gray-600 hover:text-blue-700 transition-colors",
            separator: "text-gray-400",
            current: "text-gray-900 font-medium",
            text: "text-gray-600",
        },
        TrailVariant::Dark => VariantStyles {
            link: "text-blue-100 hover:text-white transition-colors",
            separator: "text-blue-300",
            current: "text-white font-medium",
            text: "text-blue-100",
        },
    }
}

impl BreadcrumbTrail {
    /// Visual trail: `nav > ol > li`, links for navigable ancestors.
    pub fn render(&self, variant: TrailVariant) -> Markup {
        let styles = styles(variant);

        html! {
            nav aria-label="Breadcrumb" class="breadcrumb" data-variant=(variant.to_string()) {
                ol class="flex flex-wrap items-center gap-2 text-sm" {
                    @for (i, entry) in self.entries().iter().enumerate() {
                        li class="flex items-center gap-2" {
                            @if i > 0 {
                                span class=(styles.separator) aria-hidden="true" { (SEPARATOR) }
                            }
                            @match (entry.kind, entry.href.as_deref()) {
                                (EntryKind::Link, Some(href)) => {
                                    a href=(href) class=(styles.link) { (entry.label) }
                                }
                                _ => {
                                    @if entry.is_current {
                                        span class=(styles.current) aria-current="page" { (entry.label) }
                                    } @else {
                                        span class=(styles.text) { (entry.label) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// `<script type="application/ld+json">` carrying the structured data.
    pub fn render_json_ld(&self) -> Result<Markup> {
        let json = self.structured_data().to_script_json()?;
        Ok(html! {
            script type="application/ld+json" { (PreEscaped(json)) }
        })
    }

    /// Attach the structured data to the page head and return the visual trail.
    ///
    /// The metadata is attached for every variant.
    #[instrument(skip_all, fields(entries = self.entries().len(), variant = %variant))]
    pub fn attach(&self, head: &mut PageHead, variant: TrailVariant) -> Result<Markup> {
        head.push(self.render_json_ld()?);
        Ok(self.render(variant))
    }
}
