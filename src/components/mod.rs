//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering
//! logic. Components communicate through Actions rather than direct state
//! mutation.

pub mod family_grid;
pub mod layout;
pub mod message_dialog;
pub mod network_list;
pub mod style_picker;

pub use family_grid::FamilyGridComponent;
pub use layout::{calculate_main_layout, centered_popup};
pub use message_dialog::MessageDialog;
pub use network_list::NetworkListComponent;
pub use style_picker::StylePickerComponent;
