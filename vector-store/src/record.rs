//! Row model returned by the similarity-search functions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One ranked row from a lookup function.
///
/// Only the text payload is interpreted. Metadata is carried through
/// untouched and any other column (ids, prices, ...) is ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextRow {
    /// Text payload. Older functions name the column `content`.
    #[serde(default, alias = "content")]
    pub document_content: Option<String>,

    /// Opaque metadata column, if the function returns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    /// Similarity score, if the function returns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
}

impl ContextRow {
    /// Row with only a text payload.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            document_content: Some(text.into()),
            ..Self::default()
        }
    }

    /// Text payload, `""` when the column was null or missing.
    pub fn text(&self) -> &str {
        self.document_content.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_rows_with_extra_columns() {
        let raw = r#"[
            {"id": 7, "document_content": "Mug, $12", "metadata": {"sku": "M-1"}, "similarity": 0.91},
            {"content": "Tea towel, $8"},
            {"document_content": null}
        ]"#;
        let rows: Vec<ContextRow> = serde_json::from_str(raw).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].text(), "Mug, $12");
        assert_eq!(rows[0].metadata.as_ref().unwrap()["sku"], "M-1");
        assert_eq!(rows[1].text(), "Tea towel, $8");
        assert_eq!(rows[2].text(), "");
    }
}
