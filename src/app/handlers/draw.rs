//! Handler für den Zeichen-Lifecycle und das Pointer-Routing.

use crate::app::draw::{DrawController, DrawOutcome};
use crate::app::pointer::PointerEvent;
use crate::app::PlotState;
use crate::core::{Representation, Shape, ShapeAttributes, ShapeKind};
use crate::scene::SceneHost;

/// Startet das Zeichnen. Eine laufende Zeichnung eines anderen Typs wird
/// vorher abgeschlossen bzw. verworfen.
pub fn begin(
    state: &mut PlotState,
    host: &mut dyn SceneHost,
    kind: ShapeKind,
    representation: Representation,
    attributes: ShapeAttributes,
) {
    let finished = match state.draw.as_mut() {
        Some(draw)
            if draw.is_active()
                && (draw.kind() != kind || draw.representation() != representation) =>
        {
            draw.disable(host, false)
        }
        _ => None,
    };
    commit(state, finished);

    let reusable = state
        .draw
        .as_ref()
        .is_some_and(|d| d.kind() == kind && d.representation() == representation);
    if !reusable {
        state.draw = Some(DrawController::new(
            kind,
            representation,
            state.options.clone(),
        ));
    }
    if let Some(draw) = state.draw.as_mut() {
        draw.activate(host, attributes, None);
    }
}

/// Reicht ein Pointer-Event an die Zeichen-Session, sonst an die Edit-Session.
pub fn route_pointer(state: &mut PlotState, host: &mut dyn SceneHost, event: PointerEvent) {
    let outcome = match state.draw.as_mut() {
        Some(draw) if draw.is_active() => draw.handle_pointer(host, event),
        _ => DrawOutcome::Ignored,
    };
    match outcome {
        DrawOutcome::Ignored => {}
        DrawOutcome::Drawing => return,
        DrawOutcome::Finished(shape) => {
            commit(state, Some(shape));
            return;
        }
    }

    match state.edit.as_mut() {
        Some(slot) => {
            if !slot.controller.handle_pointer(host, event) {
                log::trace!("{} nicht verarbeitet", event.name());
            }
        }
        None => log::trace!("{} ohne aktive Session", event.name()),
    }
}

/// Frame-Tick für die Long-Press-Erkennung.
pub fn tick(state: &mut PlotState, host: &mut dyn SceneHost, now_ms: u64) {
    let finished = state
        .draw
        .as_mut()
        .and_then(|draw| draw.tick(host, now_ms).into_finished());
    commit(state, finished);
}

/// Schließt die Zeichnung ab, sofern genug Punkte vorliegen.
pub fn end(state: &mut PlotState, host: &mut dyn SceneHost) {
    let finished = state
        .draw
        .as_mut()
        .and_then(|draw| draw.end_draw(host).into_finished());
    commit(state, finished);
}

/// Beendet die Zeichen-Session.
pub fn cancel(state: &mut PlotState, host: &mut dyn SceneHost, force: bool) {
    let finished = state
        .draw
        .as_mut()
        .and_then(|draw| draw.disable(host, force));
    commit(state, finished);
}

/// Übernimmt eine fertig gezeichnete Form in die Sammlung (mit Undo-Snapshot).
fn commit(state: &mut PlotState, finished: Option<Shape>) {
    let Some(shape) = finished else {
        return;
    };
    state.record_undo_snapshot();
    log::info!(
        "Form {} ({}) übernommen, {} Punkte",
        shape.id(),
        shape.spec().name,
        shape.point_count()
    );
    state.shapes.insert(shape);
}
