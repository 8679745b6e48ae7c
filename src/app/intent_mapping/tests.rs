use crate::app::{PlotCommand, PlotIntent, PlotState};
use crate::core::{Representation, Shape, ShapeAttributes, ShapeKind, StyleMap};
use glam::DVec3;

use super::map_intent_to_commands;

fn state_with_point() -> (PlotState, u64) {
    let mut state = PlotState::new();
    let mut shape = Shape::new(
        ShapeKind::Point,
        ShapeAttributes::default(),
        Representation::Retained,
        DVec3::Z,
    );
    shape.set_control_points(vec![DVec3::ZERO]);
    let id = shape.id();
    state.shapes.insert(shape);
    (state, id)
}

#[test]
fn start_drawing_maps_to_begin_draw_with_attributes() {
    let state = PlotState::new();
    let mut style = StyleMap::new();
    style.insert("color".into(), "red".into());

    let commands = map_intent_to_commands(
        &state,
        PlotIntent::StartDrawingRequested {
            kind: ShapeKind::Polygon,
            representation: Representation::Retained,
            config: Default::default(),
            style,
        },
    );

    assert_eq!(commands.len(), 1);
    match &commands[0] {
        PlotCommand::BeginDraw {
            kind, attributes, ..
        } => {
            assert_eq!(*kind, ShapeKind::Polygon);
            assert_eq!(attributes.style["color"], "red");
        }
        other => panic!("unerwarteter Command: {:?}", other),
    }
}

#[test]
fn edit_without_id_targets_last_shape() {
    let (state, id) = state_with_point();

    let commands =
        map_intent_to_commands(&state, PlotIntent::EditShapeRequested { shape_id: None });

    assert_eq!(commands, vec![PlotCommand::BeginEdit { shape_id: id }]);
}

#[test]
fn edit_unknown_shape_maps_to_nothing() {
    let (state, id) = state_with_point();

    let commands = map_intent_to_commands(
        &state,
        PlotIntent::EditShapeRequested {
            shape_id: Some(id + 10_000),
        },
    );

    assert!(commands.is_empty());
}

#[test]
fn tick_without_drawing_maps_to_nothing() {
    let state = PlotState::new();

    let commands = map_intent_to_commands(&state, PlotIntent::Tick { now_ms: 5 });

    assert!(commands.is_empty());
}

#[test]
fn undo_maps_to_single_command_without_sessions() {
    let state = PlotState::new();

    let commands = map_intent_to_commands(&state, PlotIntent::UndoRequested);

    assert_eq!(commands, vec![PlotCommand::Undo]);
}

#[test]
fn delete_without_shapes_maps_to_nothing() {
    let state = PlotState::new();

    let commands =
        map_intent_to_commands(&state, PlotIntent::DeleteShapeRequested { shape_id: None });

    assert!(commands.is_empty());
}
