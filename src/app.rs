//! Root application component
//!
//! The App struct implements the Component trait, acting as the root
//! component that delegates event handling and rendering to child
//! components. It owns the host document, the diagnostics log, and the
//! domain state; business logic lives in the services layer.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, FamilyGridComponent, MessageDialog, NetworkListComponent,
    StylePickerComponent,
};
use crate::config::Config;
use crate::host::HostDocument;
use crate::logging::DiagnosticsLog;
use crate::model::domain::DomainState;
use crate::model::modal::{Modal, PickerTarget};
use crate::model::{SelectionStore, SELECT_STYLE};
use crate::services;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Main application state - coordinates between components
pub struct App {
    /// Domain state (networks, family rows, selections)
    pub domain: DomainState,

    /// Modal overlay stack
    pub modals: crate::model::modal::ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// The open drawing, behind the host capability surface
    doc: Box<dyn HostDocument>,

    /// Diagnostics log, constructed by the composition root
    log: DiagnosticsLog,

    config: Config,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub network_list: NetworkListComponent,
    pub grid: FamilyGridComponent,
    pub style_picker: StylePickerComponent,
    pub message: MessageDialog,
}

impl App {
    pub fn new(doc: Box<dyn HostDocument>, config: Config, log: DiagnosticsLog) -> Self {
        Self {
            domain: DomainState::new(),
            modals: crate::model::modal::ModalStack::new(),
            should_quit: false,
            doc,
            log,
            config,
            network_list: NetworkListComponent::new(),
            grid: FamilyGridComponent::new(),
            style_picker: StylePickerComponent::new(),
            message: MessageDialog::new(),
        }
    }

    /// Load saved selections and the network list; pick the first network.
    pub fn init(&mut self) -> Result<()> {
        self.log.log("initializing main window");

        if let Some(path) = self.doc.drawing_path() {
            self.domain.selections = SelectionStore::load(&path);
            self.log.log(&format!(
                "loaded {} saved label style selections",
                self.domain.selections.len()
            ));
        }

        self.load_networks();
        Ok(())
    }

    fn load_networks(&mut self) {
        match services::network_names(&*self.doc, &self.log) {
            Ok(networks) => {
                if networks.is_empty() {
                    self.domain.networks.clear();
                    self.domain.selected_network = None;
                    self.domain.rows.clear();
                    self.grid.set_row_count(0);
                    self.show_modal(Modal::info(
                        "No Networks",
                        "No pipe networks found in the current drawing.",
                    ));
                    return;
                }
                self.domain.networks = networks;
                self.domain.selected_network = Some(0);
                self.rebuild_rows();
            }
            Err(e) => {
                self.log.error("error loading networks", &e);
                self.show_modal(Modal::fatal(
                    "Initialization Error",
                    &format!("Error loading networks: {:#}", e),
                ));
            }
        }
    }

    /// Rebuild the family grid for the selected network.
    fn rebuild_rows(&mut self) {
        let Some(network) = self.domain.selected_network_name().map(String::from) else {
            self.domain.rows.clear();
            self.grid.set_row_count(0);
            return;
        };

        match services::load_family_rows(&*self.doc, &network, &self.domain.selections, &self.log)
        {
            Ok(rows) => {
                self.grid.set_row_count(rows.len());
                self.domain.rows = rows;
            }
            Err(e) => {
                self.log.error("error loading part families", &e);
                self.domain.rows.clear();
                self.grid.set_row_count(0);
                self.show_modal(Modal::error(
                    "Error",
                    &format!("Error loading part families: {:#}", e),
                ));
            }
        }
    }

    fn show_modal(&mut self, modal: Modal) {
        if let Modal::Message {
            title,
            body,
            severity,
            ..
        } = &modal
        {
            self.message.show(title, body, *severity);
        }
        self.modals.push(modal);
    }

    fn cycle_network(&mut self, forward: bool) {
        let count = self.domain.networks.len();
        if count == 0 {
            return;
        }
        let current = self.domain.selected_network.unwrap_or(0);
        let next = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        self.domain.selected_network = Some(next);
        self.rebuild_rows();
    }

    fn open_style_picker(&mut self) {
        let row_idx = self.grid.selected;
        let Some(row) = self.domain.rows.get(row_idx) else {
            return;
        };
        self.style_picker.open(
            "Select Label Style",
            &row.styles,
            Some(row.selected_style.as_str()),
        );
        self.modals.push(Modal::StylePicker {
            row: row_idx,
            target: PickerTarget::NewStyle,
        });
    }

    fn open_current_picker(&mut self) {
        let row_idx = self.grid.selected;
        let Some(row) = self.domain.rows.get(row_idx) else {
            return;
        };
        if row.current.options.len() < 2 {
            // Nothing to choose: the axis is fixed at "No Label" or the one
            // style the family already carries.
            return;
        }
        self.style_picker.open(
            "Current Style",
            &row.current.options,
            row.current.choice.as_deref(),
        );
        self.modals.push(Modal::StylePicker {
            row: row_idx,
            target: PickerTarget::CurrentStyle,
        });
    }

    fn confirm_picker(&mut self, row_idx: usize, target: PickerTarget) {
        let Some(chosen) = self.style_picker.chosen().map(String::from) else {
            return;
        };
        let Some(row) = self.domain.rows.get_mut(row_idx) else {
            return;
        };
        match target {
            PickerTarget::NewStyle => {
                self.log
                    .log(&format!("family '{}': new style '{}'", row.name, chosen));
                row.selected_style = chosen;
            }
            PickerTarget::CurrentStyle => {
                row.current.choice = if chosen == SELECT_STYLE {
                    None
                } else {
                    Some(chosen)
                };
            }
        }
    }

    fn apply(&mut self) {
        if self.domain.rows.is_empty() {
            self.show_modal(Modal::info("Nothing To Apply", "No part families loaded."));
            return;
        }

        // Persist selections before touching any label.
        let rows = self.domain.rows.clone();
        for row in &rows {
            if !row.selected_style.is_empty() {
                self.domain.selections.set(&row.name, &row.selected_style);
            }
        }
        if let Some(path) = self.doc.drawing_path() {
            if let Err(e) = self.domain.selections.save(&path) {
                self.log.error("error saving label style selections", &e);
                self.show_modal(Modal::error(
                    "Error",
                    &format!("Error saving label style selections: {:#}", e),
                ));
                return;
            }
            self.log.log("saved label style selections to sidecar");
        }

        match services::apply_rows(&*self.doc, &rows, self.config.label_offset, &self.log) {
            Ok(outcome) => {
                self.rebuild_rows();
                self.show_modal(Modal::info(
                    "Success",
                    &format!(
                        "Applied label styles: {} created, {} restyled.",
                        outcome.created, outcome.restyled
                    ),
                ));
            }
            Err(e) => {
                self.log.error("error applying label styles", &e);
                self.show_modal(Modal::error(
                    "Error",
                    &format!("Error applying label styles: {:#}", e),
                ));
            }
        }
    }

    fn delete_labels(&mut self) {
        let Some(row) = self.domain.rows.get(self.grid.selected).cloned() else {
            return;
        };
        match services::delete_family_labels(&*self.doc, &row, &self.log) {
            Ok(outcome) if outcome.erased > 0 => {
                self.rebuild_rows();
                self.show_modal(Modal::info(
                    "Labels Deleted",
                    &format!("Erased {} label(s) from family '{}'.", outcome.erased, row.name),
                ));
            }
            Ok(_) => {
                self.show_modal(Modal::info(
                    "Nothing Deleted",
                    "Choose a single current style for the family first.",
                ));
            }
            Err(e) => {
                self.log.error("error deleting labels", &e);
                self.show_modal(Modal::error(
                    "Error",
                    &format!("Error deleting labels: {:#}", e),
                ));
            }
        }
    }

    fn pick_from_drawing(&mut self) {
        match self.doc.pick_part() {
            Ok(Some(part)) => match services::owning_network(&*self.doc, part) {
                Ok(Some(name)) => {
                    if let Some(idx) = self.domain.networks.iter().position(|n| *n == name) {
                        self.log
                            .log(&format!("picked part {} in network '{}'", part, name));
                        self.domain.selected_network = Some(idx);
                        self.rebuild_rows();
                    } else {
                        self.show_modal(Modal::info(
                            "Unknown Network",
                            &format!("Network '{}' is not in the network list.", name),
                        ));
                    }
                }
                Ok(None) => {
                    self.show_modal(Modal::info(
                        "No Network",
                        "The picked part does not belong to a pipe network.",
                    ));
                }
                Err(e) => {
                    self.log.error("error locating picked part", &e);
                    self.show_modal(Modal::error(
                        "Error",
                        &format!("Error during selection: {:#}", e),
                    ));
                }
            },
            Ok(None) => {
                self.show_modal(Modal::info("Selection", "Nothing was picked."));
            }
            Err(e) => {
                self.log.error("error picking from drawing", &e);
                self.show_modal(Modal::error(
                    "Error",
                    &format!("Error during selection: {:#}", e),
                ));
            }
        }
    }

    fn help_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(" ↑/↓ ", Style::default().fg(Color::Cyan)),
            Span::raw("Row  "),
            Span::styled(" ←/→ ", Style::default().fg(Color::Cyan)),
            Span::raw("Network  "),
            Span::styled(" Space ", Style::default().fg(Color::Yellow)),
            Span::raw("Include  "),
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Style  "),
            Span::styled(" c ", Style::default().fg(Color::Yellow)),
            Span::raw("Current  "),
            Span::styled(" a ", Style::default().fg(Color::Green)),
            Span::raw("Apply  "),
            Span::styled(" d ", Style::default().fg(Color::Red)),
            Span::raw("Delete  "),
            Span::styled(" p ", Style::default().fg(Color::Cyan)),
            Span::raw("Pick  "),
            Span::styled(" q ", Style::default().fg(Color::Yellow)),
            Span::raw("Quit"),
        ])
    }
}

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.modals.top() {
            Some(Modal::Message { .. }) => self.message.handle_key_event(key),
            Some(Modal::StylePicker { .. }) => self.style_picker.handle_key_event(key),
            None => self.grid.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if !matches!(action, Action::Tick | Action::Resize(_, _)) {
            self.log.log(&format!("action: {}", action));
        }
        match action {
            Action::Tick | Action::Resize(_, _) => {}
            Action::Quit => self.should_quit = true,
            Action::NextRow | Action::PrevRow => {
                self.grid.update(action)?;
            }
            Action::NextNetwork => self.cycle_network(true),
            Action::PrevNetwork => self.cycle_network(false),
            Action::ToggleInclude => {
                let idx = self.grid.selected;
                if let Some(row) = self.domain.rows.get_mut(idx) {
                    row.included = !row.included;
                }
            }
            Action::IncludeAll => {
                for row in &mut self.domain.rows {
                    row.included = true;
                }
            }
            Action::ExcludeAll => {
                for row in &mut self.domain.rows {
                    row.included = false;
                }
            }
            Action::OpenStylePicker => self.open_style_picker(),
            Action::OpenCurrentPicker => self.open_current_picker(),
            Action::ConfirmModal => {
                if let Some(Modal::StylePicker { row, target }) = self.modals.pop() {
                    self.confirm_picker(row, target);
                }
            }
            Action::CloseModal => {
                if let Some(Modal::Message { fatal: true, .. }) = self.modals.pop() {
                    self.log.log("fatal dialog dismissed, closing");
                    self.should_quit = true;
                }
            }
            Action::Apply => self.apply(),
            Action::DeleteLabels => self.delete_labels(),
            Action::PickFromDrawing => self.pick_from_drawing(),
            Action::Reload => {
                self.log.log("reloading drawing data");
                self.load_networks();
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_main_layout(area);

        let drawing = self
            .doc
            .drawing_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unsaved drawing>".to_string());
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                " netlabeler ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(drawing),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, layout.header);

        self.network_list.draw(
            frame,
            layout.networks,
            &self.domain.networks,
            self.domain.selected_network,
        );
        self.grid.draw(frame, layout.grid, &self.domain.rows);

        let help = Paragraph::new(self.help_line())
            .alignment(ratatui::layout::Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, layout.help);

        match self.modals.top() {
            Some(Modal::Message { .. }) => self.message.draw(frame, area)?,
            Some(Modal::StylePicker { .. }) => self.style_picker.draw(frame, area)?,
            None => {}
        }

        Ok(())
    }
}
