//! Drawing snapshot document
//!
//! An in-memory [`HostDocument`] deserialized from a JSON drawing snapshot:
//! networks with their parts, existing labels, and one style collection tree
//! per part kind. Transactions stage against a copy of the drawing data and
//! swap it back on commit, so an aborted transaction leaves the document
//! untouched.

use super::{HostDocument, LabelId, LabelRecord, PartId, PartRecord, Transaction};
use crate::model::{CatalogNode, PartKind, StyleId};
use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

/// One pipe network and its members
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkData {
    pub name: String,
    #[serde(default)]
    pub parts: Vec<PartRecord>,
}

/// Complete drawing contents as stored in a snapshot file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingData {
    #[serde(default)]
    pub networks: Vec<NetworkData>,
    #[serde(default)]
    pub labels: Vec<LabelRecord>,
    #[serde(default = "CatalogNode::empty")]
    pub pipe_styles: CatalogNode,
    #[serde(default = "CatalogNode::empty")]
    pub structure_styles: CatalogNode,
}

impl Default for DrawingData {
    fn default() -> Self {
        Self {
            networks: Vec::new(),
            labels: Vec::new(),
            pipe_styles: CatalogNode::empty(),
            structure_styles: CatalogNode::empty(),
        }
    }
}

/// Snapshot-backed host document
pub struct SnapshotDrawing {
    path: Option<PathBuf>,
    data: RefCell<DrawingData>,
    locked: Cell<bool>,
    txn_open: Cell<bool>,
    picks: RefCell<VecDeque<PartId>>,
}

impl SnapshotDrawing {
    /// Load a drawing snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read drawing {}: {}", path.display(), e))?;
        let mut doc = Self::from_json(&contents)?;
        doc.path = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Parse a drawing snapshot from JSON text.
    pub fn from_json(contents: &str) -> Result<Self> {
        let data: DrawingData = serde_json::from_str(contents)
            .map_err(|e| anyhow!("failed to parse drawing snapshot: {}", e))?;
        Ok(Self::from_data(data))
    }

    pub fn from_data(data: DrawingData) -> Self {
        Self {
            path: None,
            data: RefCell::new(data),
            locked: Cell::new(false),
            txn_open: Cell::new(false),
            picks: RefCell::new(VecDeque::new()),
        }
    }

    /// Queue a part to be returned by the next editor pick.
    pub fn queue_pick(&self, part: PartId) {
        self.picks.borrow_mut().push_back(part);
    }

    /// Whether the document write lock is currently held.
    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }
}

impl HostDocument for SnapshotDrawing {
    fn drawing_path(&self) -> Option<PathBuf> {
        self.path.clone()
    }

    fn begin(&self) -> Result<Box<dyn Transaction + '_>> {
        if self.txn_open.get() {
            bail!("a transaction is already open on this document");
        }
        self.txn_open.set(true);
        let staged = self.data.borrow().clone();
        Ok(Box::new(SnapshotTransaction { doc: self, staged }))
    }

    fn try_lock(&self) -> Result<()> {
        if self.locked.get() {
            bail!("document is already write-locked");
        }
        self.locked.set(true);
        Ok(())
    }

    fn unlock(&self) {
        self.locked.set(false);
    }

    fn pick_part(&self) -> Result<Option<PartId>> {
        Ok(self.picks.borrow_mut().pop_front())
    }
}

/// Transaction over a [`SnapshotDrawing`]
struct SnapshotTransaction<'a> {
    doc: &'a SnapshotDrawing,
    staged: DrawingData,
}

impl SnapshotTransaction<'_> {
    fn find_part(&self, part: PartId) -> Option<&PartRecord> {
        self.staged
            .networks
            .iter()
            .flat_map(|n| n.parts.iter())
            .find(|p| p.id == part)
    }

    fn style_exists(&self, style: StyleId) -> bool {
        self.staged
            .pipe_styles
            .flatten()
            .iter()
            .chain(self.staged.structure_styles.flatten().iter())
            .any(|e| e.id == style)
    }

    fn next_label_id(&self) -> LabelId {
        self.staged
            .labels
            .iter()
            .map(|l| l.id)
            .max()
            .map_or(1, |id| id + 1)
    }
}

impl Transaction for SnapshotTransaction<'_> {
    fn network_names(&self) -> Result<Vec<String>> {
        Ok(self
            .staged
            .networks
            .iter()
            .filter(|n| !n.name.is_empty())
            .map(|n| n.name.clone())
            .collect())
    }

    fn parts_of(&self, network: &str) -> Result<Vec<PartRecord>> {
        self.staged
            .networks
            .iter()
            .find(|n| n.name == network)
            .map(|n| n.parts.clone())
            .ok_or_else(|| anyhow!("no network named '{}'", network))
    }

    fn owning_network(&self, part: PartId) -> Result<Option<String>> {
        Ok(self
            .staged
            .networks
            .iter()
            .find(|n| n.parts.iter().any(|p| p.id == part))
            .map(|n| n.name.clone()))
    }

    fn style_tree(&self, kind: PartKind) -> Result<CatalogNode> {
        Ok(match kind {
            PartKind::Pipe => self.staged.pipe_styles.clone(),
            PartKind::Structure => self.staged.structure_styles.clone(),
        })
    }

    fn style_name(&self, style: StyleId) -> Result<String> {
        self.staged
            .pipe_styles
            .flatten()
            .into_iter()
            .chain(self.staged.structure_styles.flatten())
            .find(|e| e.id == style)
            .map(|e| e.name)
            .ok_or_else(|| anyhow!("unknown style id {}", style))
    }

    fn labels_of(&self, part: PartId) -> Result<Vec<LabelRecord>> {
        Ok(self
            .staged
            .labels
            .iter()
            .filter(|l| l.part == part)
            .cloned()
            .collect())
    }

    fn create_label(&mut self, part: PartId, style: StyleId, _offset: f64) -> Result<LabelId> {
        if self.find_part(part).is_none() {
            bail!("no part with id {}", part);
        }
        if !self.style_exists(style) {
            bail!("unknown style id {}", style);
        }
        let id = self.next_label_id();
        self.staged.labels.push(LabelRecord { id, part, style });
        Ok(id)
    }

    fn set_label_style(&mut self, label: LabelId, style: StyleId) -> Result<()> {
        if !self.style_exists(style) {
            bail!("unknown style id {}", style);
        }
        let rec = self
            .staged
            .labels
            .iter_mut()
            .find(|l| l.id == label)
            .ok_or_else(|| anyhow!("no label with id {}", label))?;
        rec.style = style;
        Ok(())
    }

    fn erase_label(&mut self, label: LabelId) -> Result<()> {
        let before = self.staged.labels.len();
        self.staged.labels.retain(|l| l.id != label);
        if self.staged.labels.len() == before {
            bail!("no label with id {}", label);
        }
        Ok(())
    }

    fn commit(self: Box<Self>) -> Result<()> {
        self.doc.data.replace(self.staged.clone());
        Ok(())
    }
}

impl Drop for SnapshotTransaction<'_> {
    fn drop(&mut self) {
        // Abort semantics: staged data is simply discarded.
        self.doc.txn_open.set(false);
    }
}
