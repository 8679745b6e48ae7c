use crate::app::PlotState;
use crate::core::{ShapeCollection, ShapeSnapshot};

/// Snapshot reduziert auf die für Undo/Redo relevanten Teile.
///
/// Formen werden als `ShapeSnapshot` abgelegt und beim Anwenden neu
/// aufgebaut. IDs bleiben dabei erhalten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Alle Formen der Sammlung in Reihenfolge
    pub shapes: Vec<ShapeSnapshot>,
}

impl Snapshot {
    /// Erstellt einen Snapshot der Formsammlung.
    pub fn from_state(state: &PlotState) -> Self {
        Self {
            shapes: state.shapes.snapshots(),
        }
    }

    /// Stellt die Formsammlung aus dem Snapshot wieder her.
    pub fn apply_to(self, state: &mut PlotState) {
        state.shapes = ShapeCollection::from_snapshots(&self.shapes);
    }

    /// Anzahl Formen im Snapshot.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// `true` ohne Formen.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Einfacher Undo/Redo-Manager mit Snapshotting.
#[derive(Default)]
pub struct EditHistory {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_depth: usize,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Legt einen vorab erstellten Snapshot ab. Ein fertiger Snapshot vermeidet
    /// gleichzeitige Borrows auf den gesamten `PlotState`.
    pub fn record_snapshot(&mut self, snap: Snapshot) {
        if self.max_depth == 0 {
            return;
        }
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(snap);
        self.redo_stack.clear();
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Holt den letzten Undo-Eintrag und legt `current` auf den Redo-Stack.
    pub fn pop_undo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        let prev = self.undo_stack.pop()?;
        if self.redo_stack.len() >= self.max_depth {
            self.redo_stack.remove(0);
        }
        self.redo_stack.push(current);
        Some(prev)
    }

    /// Holt den letzten Redo-Eintrag und legt `current` auf den Undo-Stack.
    pub fn pop_redo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(current);
        Some(next)
    }
}
