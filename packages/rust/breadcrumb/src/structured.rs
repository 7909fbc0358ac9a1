//! `BreadcrumbList` structured data (schema.org JSON-LD).

use serde::{Deserialize, Serialize};

use localsite_shared::Result;

/// JSON-LD vocabulary for every document this crate emits.
pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Top-level JSON-LD document describing a page's position in the site.
///
/// Field order is the serialized key order, so output is byte-stable for
/// identical input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDataDocument {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "itemListElement")]
    pub items: Vec<ListItem>,
}

/// One position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub kind: String,
    /// 1-based position.
    pub position: usize,
    pub name: String,
    /// Absolute URL. Omitted (never null) for non-navigable steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

impl StructuredDataDocument {
    pub(crate) fn breadcrumb_list(items: Vec<ListItem>) -> Self {
        Self {
            context: SCHEMA_CONTEXT.into(),
            kind: "BreadcrumbList".into(),
            items,
        }
    }

    /// Compact JSON, as embedded in page metadata.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON for humans.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// JSON safe to place inside a `<script>` element: `</` cannot close the tag.
    pub fn to_script_json(&self) -> Result<String> {
        Ok(self.to_json()?.replace("</", "<\\/"))
    }
}

impl ListItem {
    pub(crate) fn new(position: usize, name: &str, item: Option<String>) -> Self {
        Self {
            kind: "ListItem".into(),
            position,
            name: name.to_string(),
            item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_order_and_item_omission() {
        let doc = StructuredDataDocument::breadcrumb_list(vec![
            ListItem::new(1, "Home", Some("https://example.com/".into())),
            ListItem::new(2, "Plumbing", None),
        ]);

        let json = doc.to_json().expect("serialize");
        assert_eq!(
            json,
            concat!(
                r#"{"@context":"https://schema.org","@type":"BreadcrumbList","itemListElement":["#,
                r#"{"@type":"ListItem","position":1,"name":"Home","item":"https://example.com/"},"#,
                r#"{"@type":"ListItem","position":2,"name":"Plumbing"}]}"#
            )
        );
        assert!(!json.contains("null"));
    }

    #[test]
    fn script_json_escapes_closing_tags() {
        let doc = StructuredDataDocument::breadcrumb_list(vec![ListItem::new(
            1,
            "</script><b>",
            None,
        )]);
        let json = doc.to_script_json().expect("serialize");
        assert!(!json.contains("</script>"));
        assert!(json.contains(r"<\/script>"));

        // Still valid JSON with the original label.
        let parsed: StructuredDataDocument = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed.items[0].name, "</script><b>");
    }
}
