//! Mapping von Intents auf mutierende Plot-Commands.

use super::{PlotCommand, PlotIntent, PlotState};
use crate::core::{ShapeAttributes, ShapeId};

/// Übersetzt einen `PlotIntent` in eine Sequenz ausführbarer `PlotCommand`s.
///
/// Sessions schließen sich gegenseitig aus: vor einem neuen Zeichen- oder
/// Bearbeitungsvorgang wird der jeweils andere beendet.
pub fn map_intent_to_commands(state: &PlotState, intent: PlotIntent) -> Vec<PlotCommand> {
    match intent {
        PlotIntent::StartDrawingRequested {
            kind,
            representation,
            config,
            style,
        } => {
            let mut commands = end_edit_if_active(state);
            commands.push(PlotCommand::BeginDraw {
                kind,
                representation,
                attributes: ShapeAttributes { style, config },
            });
            commands
        }
        PlotIntent::Pointer { event } => vec![PlotCommand::RoutePointer { event }],
        PlotIntent::Tick { now_ms } => {
            if state.is_drawing() {
                vec![PlotCommand::TickDraw { now_ms }]
            } else {
                vec![]
            }
        }
        PlotIntent::FinishDrawingRequested => vec![PlotCommand::EndDraw],
        PlotIntent::CancelDrawingRequested { force } => vec![PlotCommand::CancelDraw { force }],
        PlotIntent::EditShapeRequested { shape_id } => {
            let Some(shape_id) = resolve_shape(state, shape_id) else {
                log::warn!("Bearbeitung angefordert, aber keine passende Form vorhanden");
                return vec![];
            };
            if state.editing_shape_id() == Some(shape_id) {
                return vec![];
            }
            let mut commands = finish_draw_if_active(state);
            commands.extend(end_edit_if_active(state));
            commands.push(PlotCommand::BeginEdit { shape_id });
            commands
        }
        PlotIntent::StopEditingRequested => vec![PlotCommand::EndEdit],
        PlotIntent::SetPositionsRequested { positions } => {
            vec![PlotCommand::SetEditPositions { positions }]
        }
        PlotIntent::RemovePointRequested { index } => vec![PlotCommand::RemoveEditPoint { index }],
        PlotIntent::DeleteShapeRequested { shape_id } => {
            let Some(shape_id) = resolve_shape(state, shape_id) else {
                return vec![];
            };
            let mut commands = Vec::new();
            if state.editing_shape_id() == Some(shape_id) {
                commands.push(PlotCommand::EndEdit);
            }
            commands.push(PlotCommand::DeleteShape { shape_id });
            commands
        }
        PlotIntent::ConvertToRetainedRequested { shape_id } => resolve_shape(state, shape_id)
            .map(|shape_id| vec![PlotCommand::ConvertShapeToRetained { shape_id }])
            .unwrap_or_default(),
        PlotIntent::UndoRequested => {
            let mut commands = cancel_draw_if_active(state);
            commands.extend(end_edit_if_active(state));
            commands.push(PlotCommand::Undo);
            commands
        }
        PlotIntent::RedoRequested => {
            let mut commands = cancel_draw_if_active(state);
            commands.extend(end_edit_if_active(state));
            commands.push(PlotCommand::Redo);
            commands
        }
        PlotIntent::OptionsChanged { options } => vec![PlotCommand::ApplyOptions { options }],
    }
}

/// Explizite ID, sonst die bearbeitete oder zuletzt erzeugte Form.
fn resolve_shape(state: &PlotState, shape_id: Option<ShapeId>) -> Option<ShapeId> {
    match shape_id {
        Some(id) if state.shapes.contains(id) || state.editing_shape_id() == Some(id) => Some(id),
        Some(id) => {
            log::warn!("Form {} existiert nicht", id);
            None
        }
        None => state.editing_shape_id().or_else(|| state.last_shape_id()),
    }
}

fn end_edit_if_active(state: &PlotState) -> Vec<PlotCommand> {
    if state.edit.is_some() {
        vec![PlotCommand::EndEdit]
    } else {
        vec![]
    }
}

fn finish_draw_if_active(state: &PlotState) -> Vec<PlotCommand> {
    if state.is_drawing() {
        vec![PlotCommand::CancelDraw { force: false }]
    } else {
        vec![]
    }
}

fn cancel_draw_if_active(state: &PlotState) -> Vec<PlotCommand> {
    if state.is_drawing() {
        vec![PlotCommand::CancelDraw { force: true }]
    } else {
        vec![]
    }
}

#[cfg(test)]
mod tests;
