//! Handler für Operationen auf der Formsammlung und die Optionen.

use crate::app::PlotState;
use crate::core::{Representation, ShapeId};
use crate::shared::EditorOptions;

/// Entfernt eine Form aus der Sammlung.
pub fn delete(state: &mut PlotState, shape_id: ShapeId) {
    if !state.shapes.contains(shape_id) {
        log::warn!("Löschen: Form {} existiert nicht", shape_id);
        return;
    }
    state.record_undo_snapshot();
    state.shapes.remove(shape_id);
    log::info!("Form {} gelöscht", shape_id);
}

/// Wandelt eine Primitive-Form in die Retained-Darstellung um.
pub fn convert_to_retained(state: &mut PlotState, shape_id: ShapeId) {
    let is_primitive = state
        .shapes
        .get(shape_id)
        .is_some_and(|shape| shape.representation() == Representation::Primitive);
    if !is_primitive {
        log::debug!("Form {} ist bereits Retained oder fehlt", shape_id);
        return;
    }
    state.record_undo_snapshot();
    if let Some(shape) = state.shapes.get_mut(shape_id) {
        shape.convert_to_retained();
        log::info!("Form {} in Retained-Darstellung umgewandelt", shape_id);
    }
}

/// Übernimmt neue Laufzeit-Optionen.
///
/// Ein inaktiver Zeichen-Controller wird verworfen, damit der nächste Start
/// die neuen Werte verwendet.
pub fn apply_options(state: &mut PlotState, options: EditorOptions) {
    state.options = options;
    if !state.is_drawing() {
        state.draw = None;
    }
    log::info!("Optionen übernommen");
}
