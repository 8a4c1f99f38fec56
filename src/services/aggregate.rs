//! Family aggregation over a network
//!
//! Enumerates a network's pipes and structures, buckets them by part family,
//! and derives everything a grid row needs: counts, available styles, the
//! persisted new-style selection, and the union of styles that members'
//! existing labels already carry. Each aggregation pass runs in one read
//! transaction and is rebuilt from scratch on every network change.

use crate::host::{HostDocument, PartId};
use crate::logging::DiagnosticsLog;
use crate::model::{FamilyRow, PartKind, SelectionStore};
use crate::services::catalog::style_names;
use anyhow::Result;
use std::collections::HashMap;

/// Names of the pipe networks in the drawing.
pub fn network_names(doc: &dyn HostDocument, log: &DiagnosticsLog) -> Result<Vec<String>> {
    let txn = doc.begin()?;
    let names = txn.network_names()?;
    txn.commit()?;
    log.log(&format!("found {} networks", names.len()));
    Ok(names)
}

/// Name of the network owning a picked part, if any.
pub fn owning_network(doc: &dyn HostDocument, part: PartId) -> Result<Option<String>> {
    let txn = doc.begin()?;
    let owner = txn.owning_network(part)?;
    txn.commit()?;
    Ok(owner)
}

/// Build family rows for the named network.
///
/// Buckets preserve first-encounter order. Families are keyed by name and
/// part kind; a pipe family and a structure family may share a name without
/// colliding. The persisted selection is kept only while it still names an
/// available style, otherwise the first available style is substituted.
pub fn load_family_rows(
    doc: &dyn HostDocument,
    network: &str,
    selections: &SelectionStore,
    log: &DiagnosticsLog,
) -> Result<Vec<FamilyRow>> {
    log.log(&format!("loading part families for network '{}'", network));
    let txn = doc.begin()?;

    let pipe_styles = style_names(&*txn, PartKind::Pipe, log);
    let structure_styles = style_names(&*txn, PartKind::Structure, log);

    let parts = txn.parts_of(network)?;
    log.log(&format!("network '{}' has {} parts", network, parts.len()));

    let mut rows: Vec<FamilyRow> = Vec::new();
    let mut index: HashMap<(String, PartKind), usize> = HashMap::new();

    for part in parts {
        if part.family.is_empty() {
            log.log(&format!("part {} has no family name, skipping", part.id));
            continue;
        }

        let key = (part.family.clone(), part.kind);
        let row_idx = match index.get(&key) {
            Some(&idx) => idx,
            None => {
                let styles = match part.kind {
                    PartKind::Pipe => pipe_styles.clone(),
                    PartKind::Structure => structure_styles.clone(),
                };
                let saved = selections.get(&part.family);
                let selected = match saved {
                    Some(s) if styles.iter().any(|n| n == s) => s.to_string(),
                    _ => styles.first().cloned().unwrap_or_default(),
                };
                log.log(&format!(
                    "new {} family '{}', selection '{}'",
                    part.kind.label(),
                    part.family,
                    selected
                ));
                rows.push(FamilyRow::new(&part.family, part.kind, styles, selected));
                index.insert(key, rows.len() - 1);
                rows.len() - 1
            }
        };

        rows[row_idx].count += 1;
        rows[row_idx].members.push(part.id);
    }

    // Second pass: union of styles carried by each family's existing labels.
    for row in &mut rows {
        let mut union = Vec::new();
        for &part in &row.members {
            for label in txn.labels_of(part)? {
                union.push(txn.style_name(label.style)?);
            }
        }
        row.set_current_styles(union);
    }

    txn.commit()?;
    log.log(&format!(
        "loaded {} families for network '{}'",
        rows.len(),
        network
    ));
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::snapshot::{DrawingData, NetworkData, SnapshotDrawing};
    use crate::host::{LabelRecord, PartRecord};
    use crate::model::{CatalogNode, StyleRecord, ALL_STYLES, NO_LABEL, SELECT_STYLE};

    fn pipe(id: u64, family: &str) -> PartRecord {
        PartRecord {
            id,
            kind: PartKind::Pipe,
            family: family.to_string(),
        }
    }

    fn pipe_styles() -> CatalogNode {
        CatalogNode::StyleCollection {
            name: "Plan".to_string(),
            entries: vec![
                StyleRecord {
                    id: 100,
                    name: "X".to_string(),
                    kind: "PipeLabelStyle".to_string(),
                },
                StyleRecord {
                    id: 101,
                    name: "Y".to_string(),
                    kind: "PipeLabelStyle".to_string(),
                },
            ],
        }
    }

    fn doc_with(parts: Vec<PartRecord>, labels: Vec<LabelRecord>) -> SnapshotDrawing {
        SnapshotDrawing::from_data(DrawingData {
            networks: vec![NetworkData {
                name: "Storm".to_string(),
                parts,
            }],
            labels,
            pipe_styles: pipe_styles(),
            structure_styles: CatalogNode::empty(),
        })
    }

    #[test]
    fn test_buckets_by_family_with_counts() {
        let doc = doc_with(
            vec![
                pipe(1, "F1"),
                pipe(2, "F1"),
                pipe(3, "F2"),
                pipe(4, "F1"),
                pipe(5, "F2"),
            ],
            Vec::new(),
        );
        let rows = load_family_rows(
            &doc,
            "Storm",
            &SelectionStore::new(),
            &DiagnosticsLog::disabled(),
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "F1");
        assert_eq!(rows[0].count, 3);
        assert_eq!(rows[1].name, "F2");
        assert_eq!(rows[1].count, 2);
    }

    #[test]
    fn test_saved_selection_survives_when_valid() {
        let doc = doc_with(vec![pipe(1, "F1"), pipe(2, "F2")], Vec::new());
        let mut selections = SelectionStore::new();
        selections.set("F1", "Y");
        selections.set("F2", "Gone");

        let rows = load_family_rows(&doc, "Storm", &selections, &DiagnosticsLog::disabled())
            .unwrap();
        assert_eq!(rows[0].selected_style, "Y");
        // Stale saved style falls back to the first available one.
        assert_eq!(rows[1].selected_style, "X");
    }

    #[test]
    fn test_current_union_single_style_preselected() {
        let doc = doc_with(
            vec![pipe(1, "F1"), pipe(2, "F1")],
            vec![
                LabelRecord {
                    id: 1,
                    part: 1,
                    style: 100,
                },
                LabelRecord {
                    id: 2,
                    part: 2,
                    style: 100,
                },
            ],
        );
        let rows = load_family_rows(
            &doc,
            "Storm",
            &SelectionStore::new(),
            &DiagnosticsLog::disabled(),
        )
        .unwrap();
        assert_eq!(rows[0].current_styles, vec!["X".to_string()]);
        assert_eq!(rows[0].current.choice.as_deref(), Some("X"));
    }

    #[test]
    fn test_current_union_multiple_styles_offers_all_styles() {
        let doc = doc_with(
            vec![pipe(1, "F1"), pipe(2, "F1")],
            vec![
                LabelRecord {
                    id: 1,
                    part: 1,
                    style: 100,
                },
                LabelRecord {
                    id: 2,
                    part: 2,
                    style: 101,
                },
            ],
        );
        let rows = load_family_rows(
            &doc,
            "Storm",
            &SelectionStore::new(),
            &DiagnosticsLog::disabled(),
        )
        .unwrap();
        assert_eq!(
            rows[0].current.options,
            vec![
                SELECT_STYLE.to_string(),
                ALL_STYLES.to_string(),
                "X".to_string(),
                "Y".to_string(),
            ]
        );
        assert_eq!(rows[0].current.choice, None);
    }

    #[test]
    fn test_unlabeled_family_shows_no_label() {
        let doc = doc_with(vec![pipe(1, "F1")], Vec::new());
        let rows = load_family_rows(
            &doc,
            "Storm",
            &SelectionStore::new(),
            &DiagnosticsLog::disabled(),
        )
        .unwrap();
        assert_eq!(rows[0].current.choice.as_deref(), Some(NO_LABEL));
    }

    #[test]
    fn test_owning_network_of_picked_part() {
        let doc = doc_with(vec![pipe(1, "F1")], Vec::new());
        assert_eq!(
            owning_network(&doc, 1).unwrap(),
            Some("Storm".to_string())
        );
        assert_eq!(owning_network(&doc, 99).unwrap(), None);
    }
}
