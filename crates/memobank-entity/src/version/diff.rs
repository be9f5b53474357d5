//! Line-diff result types.

use serde::{Deserialize, Serialize};

/// Kind of difference at one line position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// The line exists only in the second version.
    Addition,
    /// The line exists only in the first version.
    Deletion,
    /// Both versions have the line but the text differs.
    Modification,
}

/// A single line-level difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    /// Kind of difference.
    #[serde(rename = "type")]
    pub kind: DiffKind,
    /// 1-based line position.
    pub line: usize,
    /// Added or deleted text, or `From: "<old>" To: "<new>"` for a modification.
    pub content: String,
}

impl DiffEntry {
    /// A line present only in the second version.
    pub fn addition(line: usize, text: &str) -> Self {
        Self {
            kind: DiffKind::Addition,
            line,
            content: text.to_string(),
        }
    }

    /// A line present only in the first version.
    pub fn deletion(line: usize, text: &str) -> Self {
        Self {
            kind: DiffKind::Deletion,
            line,
            content: text.to_string(),
        }
    }

    /// A line whose text changed.
    pub fn modification(line: usize, old: &str, new: &str) -> Self {
        Self {
            kind: DiffKind::Modification,
            line,
            content: format!("From: \"{old}\" To: \"{new}\""),
        }
    }
}

/// Full content of two versions and the differences between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionComparison {
    /// Content of the first (older, by convention) version.
    pub version1_content: String,
    /// Content of the second version.
    pub version2_content: String,
    /// Differences in ascending line order.
    pub differences: Vec<DiffEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_with_type_tag() {
        let json = serde_json::to_value(DiffEntry::modification(2, "b", "B")).expect("serialize");
        assert_eq!(json["type"], "modification");
        assert_eq!(json["line"], 2);
        assert_eq!(json["content"], "From: \"b\" To: \"B\"");
    }
}
