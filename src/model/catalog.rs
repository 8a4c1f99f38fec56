//! Label style catalog tree
//!
//! The host keeps label styles in a nested collection structure: a root may
//! contain further sub-roots and named collections of style objects. This is
//! modelled as an explicit tagged tree rather than anything reflective, and
//! flattened into a plain entry list for the UI.

use serde::{Deserialize, Serialize};

/// Opaque style identifier assigned by the host document.
pub type StyleId = u64;

/// One node of the host's style collection tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum CatalogNode {
    /// Nested sub-root holding further nodes
    SubCatalog { children: Vec<CatalogNode> },
    /// Named collection of concrete style objects
    StyleCollection {
        name: String,
        entries: Vec<StyleRecord>,
    },
}

/// A style object as stored inside a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleRecord {
    pub id: StyleId,
    pub name: String,
    /// Host type name of the style, e.g. "PipeLabelStyle"
    #[serde(default)]
    pub kind: String,
}

/// Flattened catalog entry produced by walking the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    pub id: StyleId,
    pub name: String,
    pub kind: String,
    /// Name of the collection the style was found in
    pub parent: String,
}

impl CatalogNode {
    /// Create an empty catalog root.
    pub fn empty() -> Self {
        CatalogNode::SubCatalog {
            children: Vec::new(),
        }
    }

    /// Walk the tree and collect every style entry in encounter order.
    ///
    /// Entries with an empty name are skipped; the host occasionally reports
    /// placeholder styles without one.
    pub fn flatten(&self) -> Vec<StyleEntry> {
        let mut entries = Vec::new();
        self.collect(&mut entries);
        entries
    }

    fn collect(&self, entries: &mut Vec<StyleEntry>) {
        match self {
            CatalogNode::SubCatalog { children } => {
                for child in children {
                    child.collect(entries);
                }
            }
            CatalogNode::StyleCollection { name, entries: recs } => {
                for rec in recs {
                    if rec.name.is_empty() {
                        continue;
                    }
                    entries.push(StyleEntry {
                        id: rec.id,
                        name: rec.name.clone(),
                        kind: rec.kind.clone(),
                        parent: name.clone(),
                    });
                }
            }
        }
    }

    /// Find a style id by name, re-walking the full tree.
    pub fn find_style(&self, style_name: &str) -> Option<StyleId> {
        self.flatten()
            .into_iter()
            .find(|e| e.name == style_name)
            .map(|e| e.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> CatalogNode {
        CatalogNode::SubCatalog {
            children: vec![
                CatalogNode::StyleCollection {
                    name: "LengthMaterial".to_string(),
                    entries: vec![
                        StyleRecord {
                            id: 1,
                            name: "Length Only".to_string(),
                            kind: "PipeLabelStyle".to_string(),
                        },
                        StyleRecord {
                            id: 2,
                            name: String::new(),
                            kind: "PipeLabelStyle".to_string(),
                        },
                    ],
                },
                CatalogNode::SubCatalog {
                    children: vec![CatalogNode::StyleCollection {
                        name: "Plan".to_string(),
                        entries: vec![StyleRecord {
                            id: 3,
                            name: "Name Only".to_string(),
                            kind: "PipeLabelStyle".to_string(),
                        }],
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_flatten_recurses_and_records_parent() {
        let entries = sample_tree().flatten();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Length Only");
        assert_eq!(entries[0].parent, "LengthMaterial");
        assert_eq!(entries[1].name, "Name Only");
        assert_eq!(entries[1].parent, "Plan");
    }

    #[test]
    fn test_flatten_skips_unnamed_styles() {
        let entries = sample_tree().flatten();
        assert!(entries.iter().all(|e| !e.name.is_empty()));
    }

    #[test]
    fn test_find_style_by_name() {
        let tree = sample_tree();
        assert_eq!(tree.find_style("Name Only"), Some(3));
        assert_eq!(tree.find_style("Missing"), None);
    }

    #[test]
    fn test_empty_tree_flattens_to_nothing() {
        assert!(CatalogNode::empty().flatten().is_empty());
    }
}
