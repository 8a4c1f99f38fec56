//! Modal stack for managing overlays
//!
//! Dialogs and pickers are kept on an enum-based stack instead of a pile of
//! boolean flags. Only the top modal receives input.

/// Severity of a message dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Which selector a style picker is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerTarget {
    /// The new style to apply to the row
    NewStyle,
    /// The current-style filter for the row
    CurrentStyle,
}

/// A modal overlay displayed on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Message dialog; fatal ones close the app when dismissed
    Message {
        title: String,
        body: String,
        severity: Severity,
        fatal: bool,
    },
    /// Style picker for the family row at `row`
    StylePicker { row: usize, target: PickerTarget },
}

impl Modal {
    pub fn info(title: &str, body: &str) -> Self {
        Modal::Message {
            title: title.to_string(),
            body: body.to_string(),
            severity: Severity::Info,
            fatal: false,
        }
    }

    pub fn error(title: &str, body: &str) -> Self {
        Modal::Message {
            title: title.to_string(),
            body: body.to_string(),
            severity: Severity::Error,
            fatal: false,
        }
    }

    pub fn fatal(title: &str, body: &str) -> Self {
        Modal::Message {
            title: title.to_string(),
            body: body.to_string(),
            severity: Severity::Error,
            fatal: true,
        }
    }
}

/// A stack of modal overlays
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
