//! Domain state - drawing data separate from UI concerns

use super::family::FamilyRow;
use super::selections::SelectionStore;

/// Domain state for the currently open drawing
#[derive(Default)]
pub struct DomainState {
    /// Names of pipe networks discovered in the drawing
    pub networks: Vec<String>,

    /// Index into `networks` of the selected network, if any
    pub selected_network: Option<usize>,

    /// Family rows for the selected network, rebuilt on every selection
    pub rows: Vec<FamilyRow>,

    /// Persisted family → style selections
    pub selections: SelectionStore,
}

impl DomainState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_network_name(&self) -> Option<&str> {
        self.selected_network
            .and_then(|i| self.networks.get(i))
            .map(|s| s.as_str())
    }
}
