//! Application State: Formsammlung, aktive Sessions, History.

use super::draw::DrawController;
use super::edit::EditController;
use super::history::{EditHistory, Snapshot};
use super::CommandLog;
use crate::core::{ShapeCollection, ShapeId, ShapeSnapshot};
use crate::shared::EditorOptions;

/// Laufende Edit-Session samt Rückgabeort der entnommenen Form.
pub struct EditSlot {
    /// Controller, der die Form während der Session besitzt
    pub controller: EditController,
    /// Position der Form in der Sammlung vor der Entnahme
    pub index: usize,
    /// Zustand der Sammlung vor Beginn der Session
    pub before: Snapshot,
    /// Zustand der Form vor Beginn der Session
    pub original: ShapeSnapshot,
}

/// Hauptzustand des Editors
pub struct PlotState {
    /// Fertige Formen (ohne die gerade bearbeitete)
    pub shapes: ShapeCollection,
    /// Zeichen-Controller des zuletzt gewählten Formtyps
    pub draw: Option<DrawController>,
    /// Aktive Edit-Session
    pub edit: Option<EditSlot>,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Undo/Redo-History (Snapshot-basiert)
    pub history: EditHistory,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
}

impl PlotState {
    /// Erstellt einen leeren State mit Standard-Optionen.
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen leeren State mit den gegebenen Optionen.
    pub fn with_options(options: EditorOptions) -> Self {
        Self {
            shapes: ShapeCollection::new(),
            draw: None,
            edit: None,
            command_log: CommandLog::new(),
            history: EditHistory::new_with_capacity(options.history_depth),
            options,
        }
    }

    /// `true`, solange eine Form gezeichnet wird.
    pub fn is_drawing(&self) -> bool {
        self.draw.as_ref().is_some_and(DrawController::is_active)
    }

    /// ID der gerade bearbeiteten Form.
    pub fn editing_shape_id(&self) -> Option<ShapeId> {
        self.edit.as_ref().map(|slot| slot.controller.shape().id())
    }

    /// Zuletzt in die Sammlung aufgenommene Form.
    pub fn last_shape_id(&self) -> Option<ShapeId> {
        self.shapes.ids().last().copied()
    }

    /// Gibt zurück, ob ein Undo-Schritt verfügbar ist.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Gibt zurück, ob ein Redo-Schritt verfügbar ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Erstellt einen Undo-Snapshot des aktuellen Zustands.
    pub fn record_undo_snapshot(&mut self) {
        let snap = Snapshot::from_state(self);
        self.history.record_snapshot(snap);
    }

    /// Snapshots aller Formen, die bearbeitete an ihrer Sammlungsposition.
    pub fn shape_snapshots(&self) -> Vec<ShapeSnapshot> {
        let mut snapshots = self.shapes.snapshots();
        if let Some(slot) = self.edit.as_ref() {
            let index = slot.index.min(snapshots.len());
            snapshots.insert(index, slot.controller.shape().snapshot());
        }
        snapshots
    }
}

impl Default for PlotState {
    fn default() -> Self {
        Self::new()
    }
}
