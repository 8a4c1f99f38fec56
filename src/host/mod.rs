//! Host document abstraction
//!
//! The CAD host owns the drawing: its entity graph, label entities, style
//! collections, transaction manager, and document lock. This crate only ever
//! talks to it through the traits below, so the rest of the code is written
//! against a capability surface it depends on but does not define.
//!
//! Transactions and the document write lock are scoped resources. A
//! transaction is a guard object: mutations stage against it and become
//! visible only on `commit`; dropping it without committing aborts. The
//! write lock is wrapped in [`DocumentLock`], which releases on every exit
//! path.

pub mod snapshot;

use crate::model::{CatalogNode, PartKind, StyleId};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use snapshot::SnapshotDrawing;

/// Opaque part identifier assigned by the host document.
pub type PartId = u64;
/// Opaque label entity identifier assigned by the host document.
pub type LabelId = u64;

/// A pipe or structure as reported by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartRecord {
    pub id: PartId,
    pub kind: PartKind,
    /// Part family the member belongs to
    pub family: String,
}

/// A label entity attached to a part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub id: LabelId,
    pub part: PartId,
    pub style: StyleId,
}

/// One short-lived host transaction
///
/// Reads observe the staged state of this transaction. Dropping the
/// transaction without calling [`Transaction::commit`] aborts it and
/// discards every staged mutation.
pub trait Transaction {
    /// Names of the pipe networks in the drawing, skipping unnamed ones.
    fn network_names(&self) -> Result<Vec<String>>;

    /// Pipe and structure members of the named network.
    fn parts_of(&self, network: &str) -> Result<Vec<PartRecord>>;

    /// Name of the network owning `part`, if any.
    fn owning_network(&self, part: PartId) -> Result<Option<String>>;

    /// The style collection tree for the given part kind.
    fn style_tree(&self, kind: PartKind) -> Result<CatalogNode>;

    /// Resolve a style id back to its name.
    fn style_name(&self, style: StyleId) -> Result<String>;

    /// Labels currently attached to `part`.
    fn labels_of(&self, part: PartId) -> Result<Vec<LabelRecord>>;

    /// Create a new label on `part` at the default offset along the part.
    fn create_label(&mut self, part: PartId, style: StyleId, offset: f64) -> Result<LabelId>;

    /// Rewrite the style reference of an existing label.
    fn set_label_style(&mut self, label: LabelId, style: StyleId) -> Result<()>;

    /// Erase a label entity.
    fn erase_label(&mut self, label: LabelId) -> Result<()>;

    /// Commit staged mutations back to the document.
    fn commit(self: Box<Self>) -> Result<()>;
}

/// An open drawing document
pub trait HostDocument {
    /// Path of the drawing file, if the document has been saved.
    fn drawing_path(&self) -> Option<PathBuf>;

    /// Start a transaction. At most one may be open at a time.
    fn begin(&self) -> Result<Box<dyn Transaction + '_>>;

    /// Acquire the document write lock; fails if already held.
    fn try_lock(&self) -> Result<()>;

    /// Release the document write lock.
    fn unlock(&self);

    /// Ask the editor for a user-picked part. `None` when nothing was picked.
    fn pick_part(&self) -> Result<Option<PartId>>;
}

/// RAII guard over the host's document write lock
pub struct DocumentLock<'a> {
    doc: &'a dyn HostDocument,
}

impl<'a> DocumentLock<'a> {
    /// Acquire the write lock, serializing this app's edits against other
    /// writers of the same document.
    pub fn acquire(doc: &'a dyn HostDocument) -> Result<Self> {
        doc.try_lock()?;
        Ok(Self { doc })
    }
}

impl Drop for DocumentLock<'_> {
    fn drop(&mut self) {
        self.doc.unlock();
    }
}
