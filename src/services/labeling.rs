//! Label application
//!
//! Turns a family row's selections into concrete label edits and plays them
//! against the host. Each part is edited inside its own short transaction;
//! any failure aborts that transaction (no partial commit) and re-signals the
//! error to the caller, which abandons the whole operation. Bulk passes hold
//! the document write lock for their duration.

use crate::host::{DocumentLock, HostDocument, PartId};
use crate::logging::DiagnosticsLog;
use crate::model::{FamilyRow, PartKind, ALL_STYLES, NO_LABEL};
use crate::services::catalog::resolve_style;
use anyhow::Result;

/// One label edit derived from a family row's two selectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelEdit {
    /// Attach a brand-new label
    Create { style: String },
    /// Rewrite every existing label on the part
    ReplaceAll { style: String },
    /// Rewrite only labels currently carrying `from`
    ReplaceMatching { from: String, to: String },
    /// Erase labels currently carrying `style`
    DeleteMatching { style: String },
}

/// Counts of what an apply pass actually did
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub created: usize,
    pub restyled: usize,
    pub erased: usize,
}

impl ApplyOutcome {
    pub fn merge(&mut self, other: ApplyOutcome) {
        self.created += other.created;
        self.restyled += other.restyled;
        self.erased += other.erased;
    }

    pub fn total(&self) -> usize {
        self.created + self.restyled + self.erased
    }
}

/// Derive the apply edit for a row, or `None` when the row should be skipped.
///
/// Skipped rows: no new style chosen, or the current-style selector still on
/// its placeholder (the user never resolved a multi-style family).
pub fn edit_for_row(row: &FamilyRow) -> Option<LabelEdit> {
    if row.selected_style.is_empty() {
        return None;
    }
    let current = row.current.choice.as_deref()?;
    let style = row.selected_style.clone();
    Some(match current {
        NO_LABEL => LabelEdit::Create { style },
        ALL_STYLES => LabelEdit::ReplaceAll { style },
        from => LabelEdit::ReplaceMatching {
            from: from.to_string(),
            to: style,
        },
    })
}

/// Apply one edit to one part inside a single host transaction.
pub fn apply_to_part(
    doc: &dyn HostDocument,
    part: PartId,
    kind: PartKind,
    edit: &LabelEdit,
    offset: f64,
) -> Result<ApplyOutcome> {
    let mut txn = doc.begin()?;
    let mut outcome = ApplyOutcome::default();

    match edit {
        LabelEdit::Create { style } => {
            let style_id = resolve_style(&*txn, kind, style)?;
            txn.create_label(part, style_id, offset)?;
            outcome.created += 1;
        }
        LabelEdit::ReplaceAll { style } => {
            let style_id = resolve_style(&*txn, kind, style)?;
            for label in txn.labels_of(part)? {
                txn.set_label_style(label.id, style_id)?;
                outcome.restyled += 1;
            }
        }
        LabelEdit::ReplaceMatching { from, to } => {
            let to_id = resolve_style(&*txn, kind, to)?;
            for label in txn.labels_of(part)? {
                if txn.style_name(label.style)? == *from {
                    txn.set_label_style(label.id, to_id)?;
                    outcome.restyled += 1;
                }
            }
        }
        LabelEdit::DeleteMatching { style } => {
            for label in txn.labels_of(part)? {
                if txn.style_name(label.style)? == *style {
                    txn.erase_label(label.id)?;
                    outcome.erased += 1;
                }
            }
        }
    }

    txn.commit()?;
    Ok(outcome)
}

/// Apply a row's edit to every member of the family.
pub fn apply_to_family(
    doc: &dyn HostDocument,
    row: &FamilyRow,
    offset: f64,
    log: &DiagnosticsLog,
) -> Result<ApplyOutcome> {
    let mut outcome = ApplyOutcome::default();
    let Some(edit) = edit_for_row(row) else {
        log.log(&format!("family '{}' skipped, nothing to apply", row.name));
        return Ok(outcome);
    };
    log.log(&format!(
        "applying {:?} to family '{}' ({} members)",
        edit, row.name, row.count
    ));
    for &part in &row.members {
        outcome.merge(apply_to_part(doc, part, row.kind, &edit, offset)?);
    }
    Ok(outcome)
}

/// Bulk-apply every included row under the document write lock.
pub fn apply_rows(
    doc: &dyn HostDocument,
    rows: &[FamilyRow],
    offset: f64,
    log: &DiagnosticsLog,
) -> Result<ApplyOutcome> {
    let _lock = DocumentLock::acquire(doc)?;
    let mut outcome = ApplyOutcome::default();
    for row in rows.iter().filter(|r| r.included) {
        outcome.merge(apply_to_family(doc, row, offset, log)?);
    }
    log.log(&format!(
        "apply finished: {} created, {} restyled, {} erased",
        outcome.created, outcome.restyled, outcome.erased
    ));
    Ok(outcome)
}

/// Delete the labels of one family that carry the row's chosen current style.
///
/// Only meaningful when the current-style selector names one concrete style;
/// sentinel choices are rejected as a no-op.
pub fn delete_family_labels(
    doc: &dyn HostDocument,
    row: &FamilyRow,
    log: &DiagnosticsLog,
) -> Result<ApplyOutcome> {
    let mut outcome = ApplyOutcome::default();
    let Some(choice) = row.current.choice.as_deref() else {
        return Ok(outcome);
    };
    if choice == NO_LABEL || choice == ALL_STYLES {
        return Ok(outcome);
    }

    let _lock = DocumentLock::acquire(doc)?;
    let edit = LabelEdit::DeleteMatching {
        style: choice.to_string(),
    };
    log.log(&format!(
        "deleting '{}' labels from family '{}'",
        choice, row.name
    ));
    for &part in &row.members {
        outcome.merge(apply_to_part(doc, part, row.kind, &edit, 0.0)?);
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::snapshot::{DrawingData, NetworkData, SnapshotDrawing};
    use crate::host::{LabelRecord, PartRecord, Transaction};
    use crate::model::{CatalogNode, SelectionStore, StyleRecord};
    use crate::services::aggregate::load_family_rows;

    fn doc_with_labels() -> SnapshotDrawing {
        SnapshotDrawing::from_data(DrawingData {
            networks: vec![NetworkData {
                name: "Storm".to_string(),
                parts: vec![
                    PartRecord {
                        id: 1,
                        kind: PartKind::Pipe,
                        family: "F1".to_string(),
                    },
                    PartRecord {
                        id: 2,
                        kind: PartKind::Pipe,
                        family: "F1".to_string(),
                    },
                    PartRecord {
                        id: 3,
                        kind: PartKind::Pipe,
                        family: "F2".to_string(),
                    },
                ],
            }],
            labels: vec![
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
                LabelRecord {
                    id: 3,
                    part: 3,
                    style: 100,
                },
            ],
            pipe_styles: CatalogNode::StyleCollection {
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
                    StyleRecord {
                        id: 102,
                        name: "Z".to_string(),
                        kind: "PipeLabelStyle".to_string(),
                    },
                ],
            },
            structure_styles: CatalogNode::empty(),
        })
    }

    fn styles_of(doc: &SnapshotDrawing, part: u64) -> Vec<String> {
        let txn = doc.begin().unwrap();
        txn.labels_of(part)
            .unwrap()
            .iter()
            .map(|l| txn.style_name(l.style).unwrap())
            .collect()
    }

    fn f1_row(doc: &SnapshotDrawing) -> FamilyRow {
        load_family_rows(
            doc,
            "Storm",
            &SelectionStore::new(),
            &DiagnosticsLog::disabled(),
        )
        .unwrap()
        .into_iter()
        .find(|r| r.name == "F1")
        .unwrap()
    }

    #[test]
    fn test_replace_matching_leaves_other_styles_untouched() {
        let doc = doc_with_labels();
        let mut row = f1_row(&doc);
        // F1 members carry X and Y; replace only the X label with Z.
        row.selected_style = "Z".to_string();
        row.current.choice = Some("X".to_string());

        let outcome =
            apply_to_family(&doc, &row, 0.5, &DiagnosticsLog::disabled()).unwrap();
        assert_eq!(outcome.restyled, 1);
        assert_eq!(styles_of(&doc, 1), vec!["Z".to_string()]);
        assert_eq!(styles_of(&doc, 2), vec!["Y".to_string()]);
        // F2 is a different family; its X label is untouched.
        assert_eq!(styles_of(&doc, 3), vec!["X".to_string()]);
    }

    #[test]
    fn test_replace_all_rewrites_every_label() {
        let doc = doc_with_labels();
        let mut row = f1_row(&doc);
        row.selected_style = "Z".to_string();
        row.current.choice = Some(ALL_STYLES.to_string());

        let outcome =
            apply_to_family(&doc, &row, 0.5, &DiagnosticsLog::disabled()).unwrap();
        assert_eq!(outcome.restyled, 2);
        assert_eq!(styles_of(&doc, 1), vec!["Z".to_string()]);
        assert_eq!(styles_of(&doc, 2), vec!["Z".to_string()]);
    }

    #[test]
    fn test_create_new_labels_for_unlabeled_family() {
        let doc = doc_with_labels();
        let mut rows = load_family_rows(
            &doc,
            "Storm",
            &SelectionStore::new(),
            &DiagnosticsLog::disabled(),
        )
        .unwrap();
        for row in &mut rows {
            row.selected_style = "X".to_string();
            row.current.choice = Some(NO_LABEL.to_string());
        }
        let row = rows.into_iter().find(|r| r.name == "F1").unwrap();

        let outcome =
            apply_to_family(&doc, &row, 0.5, &DiagnosticsLog::disabled()).unwrap();
        assert_eq!(outcome.created, 2);
        assert_eq!(styles_of(&doc, 1).len(), 2);
    }

    #[test]
    fn test_unresolved_placeholder_row_is_skipped() {
        let doc = doc_with_labels();
        let row = f1_row(&doc);
        // F1 carries two distinct styles, so the selector defaults to the
        // placeholder and the row must not be applied.
        assert_eq!(row.current.choice, None);
        assert_eq!(edit_for_row(&row), None);

        let outcome = apply_rows(&doc, &[row], 0.5, &DiagnosticsLog::disabled()).unwrap();
        assert_eq!(outcome.total(), 0);
    }

    #[test]
    fn test_unknown_style_aborts_and_leaves_drawing_unchanged() {
        let doc = doc_with_labels();
        let mut row = f1_row(&doc);
        row.selected_style = "Missing".to_string();
        row.current.choice = Some(ALL_STYLES.to_string());

        let result = apply_rows(&doc, &[row], 0.5, &DiagnosticsLog::disabled());
        assert!(result.is_err());
        assert_eq!(styles_of(&doc, 1), vec!["X".to_string()]);
        assert_eq!(styles_of(&doc, 2), vec!["Y".to_string()]);
        // The write lock was released on the error path.
        assert!(!doc.is_locked());
    }

    #[test]
    fn test_delete_matching_erases_only_named_style() {
        let doc = doc_with_labels();
        let mut row = f1_row(&doc);
        row.current.choice = Some("X".to_string());

        let outcome =
            delete_family_labels(&doc, &row, &DiagnosticsLog::disabled()).unwrap();
        assert_eq!(outcome.erased, 1);
        assert!(styles_of(&doc, 1).is_empty());
        assert_eq!(styles_of(&doc, 2), vec!["Y".to_string()]);
    }

    #[test]
    fn test_delete_rejects_sentinel_choices() {
        let doc = doc_with_labels();
        let mut row = f1_row(&doc);
        row.current.choice = Some(ALL_STYLES.to_string());
        let outcome =
            delete_family_labels(&doc, &row, &DiagnosticsLog::disabled()).unwrap();
        assert_eq!(outcome.total(), 0);
    }
}
