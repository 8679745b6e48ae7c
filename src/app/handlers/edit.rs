//! Handler für Edit-Sessions.
//!
//! Die bearbeitete Form wird der Sammlung entnommen und beim Beenden an
//! derselben Position zurückgelegt.

use crate::app::edit::{DeleteOutcome, EditController};
use crate::app::history::Snapshot;
use crate::app::state::EditSlot;
use crate::app::PlotState;
use crate::core::ShapeId;
use crate::scene::SceneHost;
use glam::DVec3;

/// Startet die Bearbeitung einer Form.
pub fn begin(
    state: &mut PlotState,
    host: &mut dyn SceneHost,
    shape_id: ShapeId,
) -> anyhow::Result<()> {
    let before = Snapshot::from_state(state);
    let Some((index, shape)) = state.shapes.take(shape_id) else {
        anyhow::bail!("Form {} existiert nicht", shape_id);
    };
    let original = shape.snapshot();
    let mut controller = EditController::new(shape, &state.options);
    let activated = controller.activate(host).map(|_| ());
    if let Err(err) = activated {
        state.shapes.restore(index, controller.into_shape());
        return Err(err);
    }
    log::debug!(
        "Edit-Session für Form {} an Position {} (Rezept {})",
        shape_id,
        index,
        controller.recipe_name()
    );
    state.edit = Some(EditSlot {
        controller,
        index,
        before,
        original,
    });
    Ok(())
}

/// Beendet die Bearbeitung und legt die Form zurück.
///
/// Hat sich die Form verändert, wird der Zustand vor der Session als
/// Undo-Schritt abgelegt.
pub fn end(state: &mut PlotState, host: &mut dyn SceneHost) {
    let Some(mut slot) = state.edit.take() else {
        log::debug!("EndEdit ohne aktive Bearbeitung");
        return;
    };
    slot.controller.disable(host);
    let shape = slot.controller.into_shape();
    let changed = shape.snapshot() != slot.original;
    state.shapes.restore(slot.index, shape);
    if changed {
        state.history.record_snapshot(slot.before);
        log::info!("Bearbeitung als Undo-Schritt erfasst");
    }
}

/// Ersetzt die Kontrollpunkte der bearbeiteten Form.
pub fn set_positions(
    state: &mut PlotState,
    host: &mut dyn SceneHost,
    positions: Vec<DVec3>,
) -> anyhow::Result<()> {
    let Some(slot) = state.edit.as_mut() else {
        anyhow::bail!("Punkte setzen ohne aktive Bearbeitung");
    };
    slot.controller.set_positions(host, positions)?;
    Ok(())
}

/// Löscht einen Kontrollpunkt der bearbeiteten Form.
pub fn remove_point(
    state: &mut PlotState,
    host: &mut dyn SceneHost,
    index: usize,
) -> anyhow::Result<()> {
    let Some(slot) = state.edit.as_mut() else {
        anyhow::bail!("Punkt löschen ohne aktive Bearbeitung");
    };
    match slot.controller.remove_control_point(host, index)? {
        DeleteOutcome::Removed => {}
        DeleteOutcome::BelowMinimum { min } => {
            log::debug!("Punkt {} bleibt erhalten (Minimum {})", index, min);
        }
    }
    Ok(())
}
