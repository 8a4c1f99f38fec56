//! Part family rows shown in the grid
//!
//! One row per part family in the selected network. The row carries two
//! independent style axes: the new style the user wants to apply, and the
//! set of styles the family's existing labels already carry. The second
//! axis is read-only and recomputed from host data on every rebuild.

use crate::host::PartId;
use serde::{Deserialize, Serialize};

/// Sentinel offered when no member of the family carries a label yet
pub const NO_LABEL: &str = "No Label";
/// Sentinel meaning "replace labels regardless of their current style"
pub const ALL_STYLES: &str = "All Styles";
/// Placeholder forcing an explicit choice when members disagree
pub const SELECT_STYLE: &str = "Select Style...";

/// Kind of network part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    Pipe,
    Structure,
}

impl PartKind {
    pub fn label(&self) -> &'static str {
        match self {
            PartKind::Pipe => "Pipe",
            PartKind::Structure => "Structure",
        }
    }
}

/// Derived selector over the styles existing labels currently carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentStyleSelector {
    /// Options offered to the user, sentinels included
    pub options: Vec<String>,
    /// Pre-selected option, `None` while the placeholder is showing
    pub choice: Option<String>,
}

impl CurrentStyleSelector {
    /// Build the selector from the union of styles carried by a family's
    /// labels.
    ///
    /// No styles at all means the family is unlabeled. A single style is
    /// pre-selected. Two or more distinct styles offer "All Styles" plus each
    /// individual style, with no default so the user must choose.
    pub fn from_union(union: &[String]) -> Self {
        match union.len() {
            0 => Self {
                options: vec![NO_LABEL.to_string()],
                choice: Some(NO_LABEL.to_string()),
            },
            1 => Self {
                options: vec![union[0].clone()],
                choice: Some(union[0].clone()),
            },
            _ => {
                let mut options = vec![SELECT_STYLE.to_string(), ALL_STYLES.to_string()];
                options.extend(union.iter().cloned());
                Self {
                    options,
                    choice: None,
                }
            }
        }
    }

    /// Text shown in the grid's current-style column.
    pub fn summary(&self) -> &str {
        self.choice.as_deref().unwrap_or(SELECT_STYLE)
    }
}

/// One family of pipes or structures within the selected network
#[derive(Debug, Clone)]
pub struct FamilyRow {
    pub name: String,
    pub kind: PartKind,
    pub count: usize,
    /// Member parts, in encounter order
    pub members: Vec<PartId>,
    /// Style names available for this part kind
    pub styles: Vec<String>,
    /// The new style to apply, persisted to the sidecar
    pub selected_style: String,
    /// Distinct styles existing labels carry, sorted
    pub current_styles: Vec<String>,
    pub current: CurrentStyleSelector,
    /// Whether Apply should touch this family
    pub included: bool,
}

impl FamilyRow {
    pub fn new(name: &str, kind: PartKind, styles: Vec<String>, selected_style: String) -> Self {
        Self {
            name: name.to_string(),
            kind,
            count: 0,
            members: Vec::new(),
            styles,
            selected_style,
            current_styles: Vec::new(),
            current: CurrentStyleSelector::from_union(&[]),
            included: true,
        }
    }

    /// Record the union of current label styles and rebuild the selector.
    pub fn set_current_styles(&mut self, mut union: Vec<String>) {
        union.sort();
        union.dedup();
        self.current = CurrentStyleSelector::from_union(&union);
        self.current_styles = union;
    }

    /// Whether the user has made (or been given) a current-style choice.
    pub fn current_resolved(&self) -> bool {
        self.current.choice.is_some()
    }
}
