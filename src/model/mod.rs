//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `DomainState` - drawing data (networks, family rows, selections)
//! - `CatalogNode` / `StyleEntry` - label style catalog tree
//! - `SelectionStore` - sidecar-persisted family → style map
//! - `ModalStack` - modal overlay management

pub mod catalog;
pub mod domain;
pub mod family;
pub mod modal;
pub mod selections;

// Re-export commonly used types
pub use catalog::{CatalogNode, StyleEntry, StyleId, StyleRecord};
pub use family::{CurrentStyleSelector, FamilyRow, PartKind, ALL_STYLES, NO_LABEL, SELECT_STYLE};
pub use selections::{sidecar_path, SelectionStore};
