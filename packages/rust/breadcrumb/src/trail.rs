//! Trail composition: the implicit root plus the page's ancestors.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use localsite_shared::{BusinessIdentity, NavigationStep, Result, SiteError};

use crate::structured::{ListItem, StructuredDataDocument};

/// Label of the synthetic first step.
pub const ROOT_LABEL: &str = "Home";

/// Target of the synthetic first step.
pub const ROOT_HREF: &str = "/";

/// How an entry is shown in the visual trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Active navigation link.
    Link,
    /// Plain text: the terminal step, or any step without a target.
    Text,
}

/// One effective step, after the root has been prepended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailEntry {
    /// 1-based position.
    pub position: usize,
    pub label: String,
    pub href: Option<String>,
    pub kind: EntryKind,
    /// Last entry in the trail.
    pub is_current: bool,
}

/// A validated breadcrumb trail for one page.
///
/// Pure function of its inputs: building it twice from the same steps and
/// identity yields identical entries and byte-identical structured data.
#[derive(Debug, Clone)]
pub struct BreadcrumbTrail {
    website: String,
    entries: Vec<TrailEntry>,
}

impl BreadcrumbTrail {
    /// Build a trail from the page's ancestors (root excluded).
    ///
    /// An empty slice is valid and yields a trail of just "Home".
    #[instrument(skip_all, fields(steps = steps.len()))]
    pub fn new(identity: &BusinessIdentity, steps: &[NavigationStep]) -> Result<Self> {
        for (index, step) in steps.iter().enumerate() {
            if step.label.trim().is_empty() {
                return Err(SiteError::invalid_input(format!(
                    "navigation step {} has an empty label",
                    index + 1
                )));
            }
        }

        let root = NavigationStep::link(ROOT_LABEL, ROOT_HREF);
        let effective: Vec<&NavigationStep> = std::iter::once(&root).chain(steps).collect();
        let last = effective.len();

        let entries = effective
            .into_iter()
            .enumerate()
            .map(|(i, step)| {
                let position = i + 1;
                let is_current = position == last;
                let kind = if !is_current && step.href.is_some() {
                    EntryKind::Link
                } else {
                    EntryKind::Text
                };
                TrailEntry {
                    position,
                    label: step.label.clone(),
                    href: step.href.clone(),
                    kind,
                    is_current,
                }
            })
            .collect::<Vec<_>>();

        debug!(entries = entries.len(), "breadcrumb trail composed");

        Ok(Self {
            website: identity.website().to_string(),
            entries,
        })
    }

    /// Build a trail from untyped JSON, as handed over by a page template.
    ///
    /// The value must be an array of `{ "label": string, "href"?: string | null }`.
    pub fn from_json(identity: &BusinessIdentity, value: &Value) -> Result<Self> {
        if !value.is_array() {
            return Err(SiteError::invalid_input(format!(
                "navigation steps must be a list, got {}",
                json_kind(value)
            )));
        }

        let steps = Vec::<NavigationStep>::deserialize(value).map_err(|e| {
            SiteError::invalid_input(format!("invalid navigation steps: {e}"))
        })?;

        Self::new(identity, &steps)
    }

    /// Effective entries, root first.
    pub fn entries(&self) -> &[TrailEntry] {
        &self.entries
    }

    /// The `BreadcrumbList` document for this trail.
    pub fn structured_data(&self) -> StructuredDataDocument {
        let items = self
            .entries
            .iter()
            .map(|entry| {
                let item = entry
                    .href
                    .as_deref()
                    .map(|href| format!("{}{href}", self.website));
                ListItem::new(entry.position, &entry.label, item)
            })
            .collect();

        StructuredDataDocument::breadcrumb_list(items)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
