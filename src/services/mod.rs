//! Drawing services
//!
//! This module contains the operations performed against the host document:
//! - Style catalog walking and name resolution
//! - Family aggregation per network
//! - Label creation, restyling, and deletion

pub mod aggregate;
pub mod catalog;
pub mod labeling;

pub use aggregate::{load_family_rows, network_names, owning_network};
pub use catalog::{resolve_style, style_names, FALLBACK_STYLE};
pub use labeling::{
    apply_rows, apply_to_family, apply_to_part, delete_family_labels, edit_for_row, ApplyOutcome,
    LabelEdit,
};
