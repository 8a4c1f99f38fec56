//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit the application
    Quit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to the next family row
    NextRow,
    /// Move to the previous family row
    PrevRow,
    /// Select the next network and rebuild the grid
    NextNetwork,
    /// Select the previous network and rebuild the grid
    PrevNetwork,

    // ─────────────────────────────────────────────────────────────────────────
    // Family Grid
    // ─────────────────────────────────────────────────────────────────────────
    /// Toggle the inclusion checkbox of the selected row
    ToggleInclude,
    /// Include every row
    IncludeAll,
    /// Exclude every row
    ExcludeAll,
    /// Open the new-style picker for the selected row
    OpenStylePicker,
    /// Open the current-style picker for the selected row
    OpenCurrentPicker,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Confirm the top modal (picker choice)
    ConfirmModal,
    /// Close the top modal
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing Operations
    // ─────────────────────────────────────────────────────────────────────────
    /// Persist selections and bulk-apply styles to included families
    Apply,
    /// Delete the selected row's labels carrying its chosen current style
    DeleteLabels,
    /// Pick a part in the drawing and load its owning network
    PickFromDrawing,
    /// Reload networks and the family grid from the drawing
    Reload,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::Quit => write!(f, "Quit"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::NextNetwork => write!(f, "NextNetwork"),
            Action::PrevNetwork => write!(f, "PrevNetwork"),
            Action::ToggleInclude => write!(f, "ToggleInclude"),
            Action::IncludeAll => write!(f, "IncludeAll"),
            Action::ExcludeAll => write!(f, "ExcludeAll"),
            Action::OpenStylePicker => write!(f, "OpenStylePicker"),
            Action::OpenCurrentPicker => write!(f, "OpenCurrentPicker"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::Apply => write!(f, "Apply"),
            Action::DeleteLabels => write!(f, "DeleteLabels"),
            Action::PickFromDrawing => write!(f, "PickFromDrawing"),
            Action::Reload => write!(f, "Reload"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_match_variants() {
        assert_eq!(Action::Apply.to_string(), "Apply");
        assert_eq!(Action::PickFromDrawing.to_string(), "PickFromDrawing");
        assert_eq!(Action::Resize(80, 24).to_string(), "Resize(80, 24)");
    }
}
