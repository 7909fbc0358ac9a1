//! Breadcrumb trail for LocalSite pages.
//!
//! One input, two outputs: a visual navigation trail rendered as HTML, and a
//! schema.org `BreadcrumbList` document embedded as page metadata so crawlers
//! can read the page hierarchy.
//!
//! ```text
//! [Home(/)] ++ page steps ──► BreadcrumbTrail ──┬─► render(variant)   (nav > ol > li)
//!                                               └─► structured_data() (JSON-LD)
//! ```

pub mod head;
pub mod render;
pub mod structured;
pub mod trail;

pub use head::PageHead;
pub use render::SEPARATOR;
pub use structured::{ListItem, SCHEMA_CONTEXT, StructuredDataDocument};
pub use trail::{BreadcrumbTrail, EntryKind, ROOT_HREF, ROOT_LABEL, TrailEntry};
