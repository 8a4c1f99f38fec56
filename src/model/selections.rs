//! Persisted family → style selections
//!
//! Selections live in a plain-text sidecar file next to the drawing: one
//! `family=style` pair per line, loaded when the app opens and written back
//! wholesale before styles are applied.

use anyhow::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of the sidecar file stored beside the drawing
pub const SIDECAR_EXTENSION: &str = "labelconfig";

/// In-memory map of family name to chosen label style name
#[derive(Debug, Default, Clone)]
pub struct SelectionStore {
    selections: BTreeMap<String, String>,
}

/// Sidecar path for a drawing: same location, `labelconfig` extension.
pub fn sidecar_path(drawing_path: &Path) -> PathBuf {
    drawing_path.with_extension(SIDECAR_EXTENSION)
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load selections from the sidecar next to `drawing_path`.
    ///
    /// A missing sidecar is not an error and yields an empty store. Lines
    /// that do not split into exactly one key and one value are skipped.
    pub fn load(drawing_path: &Path) -> Self {
        let mut store = Self::new();
        let path = sidecar_path(drawing_path);
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return store,
        };
        for line in contents.lines() {
            let parts: Vec<&str> = line.split('=').collect();
            if parts.len() == 2 {
                store
                    .selections
                    .insert(parts[0].to_string(), parts[1].to_string());
            }
        }
        store
    }

    /// Write all selections to the sidecar, overwriting any previous file.
    pub fn save(&self, drawing_path: &Path) -> Result<()> {
        let mut out = String::new();
        for (family, style) in &self.selections {
            out.push_str(family);
            out.push('=');
            out.push_str(style);
            out.push('\n');
        }
        fs::write(sidecar_path(drawing_path), out)?;
        Ok(())
    }

    pub fn get(&self, family: &str) -> Option<&str> {
        self.selections.get(family).map(|s| s.as_str())
    }

    pub fn set(&mut self, family: &str, style: &str) {
        self.selections
            .insert(family.to_string(), style.to_string());
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_drawing(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("netlabeler-test-{}-{}.dwg", name, std::process::id()))
    }

    #[test]
    fn test_sidecar_path_replaces_extension() {
        let path = sidecar_path(Path::new("/plans/site.dwg"));
        assert_eq!(path, PathBuf::from("/plans/site.labelconfig"));
    }

    #[test]
    fn test_missing_sidecar_yields_empty_store() {
        let store = SelectionStore::load(Path::new("/nonexistent/nowhere.dwg"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let drawing = temp_drawing("malformed");
        fs::write(sidecar_path(&drawing), "A=Standard\nB=C=D\n").unwrap();

        let store = SelectionStore::load(&drawing);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("A"), Some("Standard"));
        assert_eq!(store.get("B"), None);

        let _ = fs::remove_file(sidecar_path(&drawing));
    }

    #[test]
    fn test_save_load_round_trip() {
        let drawing = temp_drawing("roundtrip");
        let mut store = SelectionStore::new();
        store.set("12 inch PVC", "Length Only");
        store.set("Concrete Manhole", "Name Only");
        store.save(&drawing).unwrap();

        let loaded = SelectionStore::load(&drawing);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("12 inch PVC"), Some("Length Only"));
        assert_eq!(loaded.get("Concrete Manhole"), Some("Name Only"));

        let _ = fs::remove_file(sidecar_path(&drawing));
    }

    #[test]
    fn test_set_overwrites_existing_key() {
        let mut store = SelectionStore::new();
        store.set("F1", "Old");
        store.set("F1", "New");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("F1"), Some("New"));
    }
}
