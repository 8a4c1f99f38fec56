//! Label style catalog services
//!
//! Thin wrappers over the host's style collection trees: flatten a tree into
//! the style names the UI offers, and resolve a chosen name back to a host
//! style id. Resolution re-walks the full catalog on every call; catalogs are
//! small and calls are user-paced, so nothing is cached.

use crate::host::Transaction;
use crate::logging::DiagnosticsLog;
use crate::model::{PartKind, StyleId};
use anyhow::{anyhow, Result};

/// Synthetic entry offered when the host reports no styles at all
pub const FALLBACK_STYLE: &str = "Standard";

/// Style names available for the given part kind.
///
/// Best effort: a traversal failure is logged, never propagated, and the
/// result is padded with a synthetic "Standard" entry whenever the walk comes
/// back empty so the UI always has something to select.
pub fn style_names(txn: &dyn Transaction, kind: PartKind, log: &DiagnosticsLog) -> Vec<String> {
    let mut names = Vec::new();
    match txn.style_tree(kind) {
        Ok(tree) => {
            for entry in tree.flatten() {
                log.log(&format!(
                    "found {} label style: {} (type: {}, parent: {})",
                    kind.label(),
                    entry.name,
                    entry.kind,
                    entry.parent
                ));
                names.push(entry.name);
            }
        }
        Err(e) => {
            log.error(
                &format!("error walking {} label styles", kind.label()),
                &e,
            );
        }
    }

    if names.is_empty() {
        log.log(&format!(
            "no {} label styles found, substituting '{}'",
            kind.label(),
            FALLBACK_STYLE
        ));
        names.push(FALLBACK_STYLE.to_string());
    }
    names
}

/// Resolve a style name to its host id for the given part kind.
pub fn resolve_style(txn: &dyn Transaction, kind: PartKind, name: &str) -> Result<StyleId> {
    let tree = txn.style_tree(kind)?;
    tree.find_style(name)
        .ok_or_else(|| anyhow!("no {} label style named '{}'", kind.label(), name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::snapshot::{DrawingData, SnapshotDrawing};
    use crate::host::HostDocument;
    use crate::model::{CatalogNode, StyleRecord};

    #[test]
    fn test_empty_tree_yields_synthetic_standard() {
        let doc = SnapshotDrawing::from_data(DrawingData::default());
        let txn = doc.begin().unwrap();
        let names = style_names(&*txn, PartKind::Pipe, &DiagnosticsLog::disabled());
        assert_eq!(names, vec![FALLBACK_STYLE.to_string()]);
    }

    #[test]
    fn test_style_names_and_resolution() {
        let doc = SnapshotDrawing::from_data(DrawingData {
            pipe_styles: CatalogNode::StyleCollection {
                name: "Plan".to_string(),
                entries: vec![
                    StyleRecord {
                        id: 7,
                        name: "Length Only".to_string(),
                        kind: "PipeLabelStyle".to_string(),
                    },
                    StyleRecord {
                        id: 8,
                        name: "Name Only".to_string(),
                        kind: "PipeLabelStyle".to_string(),
                    },
                ],
            },
            ..DrawingData::default()
        });
        let txn = doc.begin().unwrap();
        let names = style_names(&*txn, PartKind::Pipe, &DiagnosticsLog::disabled());
        assert_eq!(
            names,
            vec!["Length Only".to_string(), "Name Only".to_string()]
        );
        assert_eq!(resolve_style(&*txn, PartKind::Pipe, "Name Only").unwrap(), 8);
        assert!(resolve_style(&*txn, PartKind::Pipe, "Missing").is_err());
        assert!(resolve_style(&*txn, PartKind::Structure, "Name Only").is_err());
    }
}
