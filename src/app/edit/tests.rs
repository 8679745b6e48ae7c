use super::*;
use crate::app::pointer::PointerEvent;
use crate::core::{DraggerType, ShapeAttributes, ShapeConfig, ShapeKind};
use crate::scene::{CameraInput, FlatScene, FlatSceneConfig};
use approx::assert_relative_eq;

fn scene() -> FlatScene {
    FlatScene::new(FlatSceneConfig::default())
}

fn shape_with(kind: ShapeKind, attributes: ShapeAttributes, points: Vec<DVec3>) -> Shape {
    let mut shape = Shape::new(kind, attributes, Representation::Retained, DVec3::Z);
    shape.set_control_points(points);
    shape.sync_params();
    shape.refresh_render();
    shape
}

fn triangle() -> Shape {
    shape_with(
        ShapeKind::Polygon,
        ShapeAttributes::default(),
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(100.0, 0.0, 0.0),
            DVec3::new(50.0, 100.0, 0.0),
        ],
    )
}

fn circle() -> Shape {
    shape_with(
        ShapeKind::Circle,
        ShapeAttributes::default(),
        vec![DVec3::ZERO, DVec3::new(100.0, 0.0, 0.0)],
    )
}

fn active(shape: Shape, scene: &mut FlatScene) -> EditController {
    let mut edit = EditController::new(shape, &EditorOptions::default());
    edit.activate(scene).expect("Aktivierung");
    edit
}

/// Greift bei `from`, zieht nach `to` und lässt los.
fn drag(edit: &mut EditController, scene: &mut FlatScene, from: DVec3, to: DVec3) {
    let a = scene.world_to_screen(from);
    let b = scene.world_to_screen(to);
    assert!(
        edit.handle_pointer(scene, PointerEvent::PrimaryDown { screen: a }),
        "kein Dragger bei {:?}",
        from
    );
    edit.handle_pointer(scene, PointerEvent::Move { screen: b });
    edit.handle_pointer(scene, PointerEvent::PrimaryUp { screen: b });
}

fn secondary_at(edit: &mut EditController, scene: &mut FlatScene, at: DVec3) -> bool {
    let screen = scene.world_to_screen(at);
    edit.handle_pointer(scene, PointerEvent::SecondaryClick { screen })
}

fn draggers_of(edit: &EditController, kind: DraggerType) -> Vec<DVec3> {
    edit.draggers()
        .expect("aktive Session")
        .iter()
        .filter(|d| d.kind == kind)
        .map(|d| d.position)
        .collect()
}

#[test]
fn test_aktivierung_baut_polygon_dragger() {
    let mut scene = scene();
    let edit = active(triangle(), &mut scene);

    assert_eq!(draggers_of(&edit, DraggerType::Control), edit.get_positions());
    assert_eq!(draggers_of(&edit, DraggerType::AddMidPoint).len(), 3);
    assert_eq!(draggers_of(&edit, DraggerType::MoveAll).len(), 1);
    assert_eq!(scene.markers().count(), 7);
    assert!(scene.markers().all(|m| !m.surface_pickable));
    assert!(edit.shape().in_progress());
    assert!(edit.shape().is_render_live());
    assert_eq!(scene.notification_names(), vec!["edit.start"]);
}

#[test]
fn test_aktivierung_ist_idempotent() {
    let mut scene = scene();
    let mut edit = active(triangle(), &mut scene);
    edit.activate(&mut scene).expect("zweite Aktivierung");

    assert_eq!(scene.bound_input_count(), 1);
    assert_eq!(scene.notification_names(), vec!["edit.start"]);
    assert_eq!(scene.markers().count(), 7);
}

#[test]
fn test_disable_ist_idempotent_und_raeumt_auf() {
    let mut scene = scene();
    let mut edit = active(triangle(), &mut scene);
    edit.disable(&mut scene);
    edit.disable(&mut scene);

    assert!(!edit.is_active());
    assert_eq!(scene.markers().count(), 0);
    assert_eq!(scene.bound_input_count(), 0);
    assert!(!edit.shape().in_progress());
    assert!(!edit.shape().is_render_live());
    assert_eq!(scene.notification_names(), vec!["edit.start", "edit.stop"]);

    let mut idle = EditController::new(triangle(), &EditorOptions::default());
    let mut fresh = self::scene();
    idle.disable(&mut fresh);
    assert!(fresh.notifications().is_empty());
}

#[test]
fn test_vertex_drag_aktualisiert_mittelpunkte() {
    let mut scene = scene();
    let mut edit = active(triangle(), &mut scene);

    drag(
        &mut edit,
        &mut scene,
        DVec3::new(100.0, 0.0, 0.0),
        DVec3::new(120.0, 20.0, 0.0),
    );

    let points = edit.get_positions();
    assert_relative_eq!(points[1].x, 120.0, epsilon = 1e-6);
    assert_relative_eq!(points[1].y, 20.0, epsilon = 1e-6);
    assert_eq!(draggers_of(&edit, DraggerType::Control), points);
    let mids = draggers_of(&edit, DraggerType::AddMidPoint);
    for (i, mid) in mids.iter().enumerate() {
        let expected = (points[i] + points[(i + 1) % 3]) * 0.5;
        assert_relative_eq!(mid.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(mid.y, expected.y, epsilon = 1e-6);
    }
    assert!(scene.notification_names().contains(&"edit.movePoint"));
}

#[test]
fn test_mittelpunkt_drag_fuegt_punkt_ein() {
    let mut scene = scene();
    let mut edit = active(triangle(), &mut scene);

    drag(
        &mut edit,
        &mut scene,
        DVec3::new(50.0, 0.0, 0.0),
        DVec3::new(50.0, -5.0, 0.0),
    );

    let points = edit.get_positions();
    assert_eq!(points.len(), 4);
    assert_relative_eq!(points[1].x, 50.0, epsilon = 1e-6);
    assert_relative_eq!(points[1].y, -5.0, epsilon = 1e-6);
    assert_eq!(points[2], DVec3::new(100.0, 0.0, 0.0));
    assert_eq!(draggers_of(&edit, DraggerType::Control).len(), 4);
    assert_eq!(draggers_of(&edit, DraggerType::AddMidPoint).len(), 4);
}

#[test]
fn test_loeschen_unter_minimum_verweigert() {
    let mut scene = scene();
    let mut edit = active(triangle(), &mut scene);

    assert!(secondary_at(&mut edit, &mut scene, DVec3::new(100.0, 0.0, 0.0)));

    assert_eq!(edit.get_positions().len(), 3);
    assert_eq!(scene.tooltip(), Some("Mindestens 3 Punkte erforderlich"));
    assert!(!scene.notification_names().contains(&"edit.removePoint"));
    assert_eq!(
        edit.remove_control_point(&mut scene, 0).expect("gültiger Index"),
        DeleteOutcome::BelowMinimum { min: 3 }
    );
}

#[test]
fn test_loeschen_ueber_minimum() {
    let mut scene = scene();
    let square = shape_with(
        ShapeKind::Polygon,
        ShapeAttributes::default(),
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(100.0, 0.0, 0.0),
            DVec3::new(100.0, 100.0, 0.0),
            DVec3::new(0.0, 100.0, 0.0),
        ],
    );
    let mut edit = active(square, &mut scene);

    secondary_at(&mut edit, &mut scene, DVec3::new(100.0, 100.0, 0.0));

    assert_eq!(edit.get_positions().len(), 3);
    assert_eq!(draggers_of(&edit, DraggerType::Control).len(), 3);
    assert!(scene.notification_names().contains(&"edit.removePoint"));
    assert!(edit.remove_control_point(&mut scene, 9).is_err());
}

#[test]
fn test_hover_zeigt_loeschhinweis_nur_ueber_minimum() {
    let mut scene = scene();
    let mut edit = active(triangle(), &mut scene);
    let screen = scene.world_to_screen(DVec3::ZERO);
    edit.handle_pointer(&mut scene, PointerEvent::Move { screen });
    let text = scene.tooltip().expect("Tooltip").to_string();
    assert!(!text.contains("Rechtsklick"));

    edit.set_positions(
        &mut scene,
        vec![
            DVec3::ZERO,
            DVec3::new(100.0, 0.0, 0.0),
            DVec3::new(100.0, 100.0, 0.0),
            DVec3::new(0.0, 100.0, 0.0),
        ],
    )
    .expect("Punkte setzen");
    edit.handle_pointer(&mut scene, PointerEvent::Move { screen });
    assert!(scene.tooltip().expect("Tooltip").contains("Rechtsklick"));
}

#[test]
fn test_kamera_gesperrt_waehrend_drag() {
    let mut scene = scene();
    let mut edit = active(triangle(), &mut scene);
    let screen = scene.world_to_screen(DVec3::ZERO);

    edit.handle_pointer(&mut scene, PointerEvent::PrimaryDown { screen });
    assert!(edit.is_dragging());
    for input in CameraInput::ALL {
        assert!(!scene.camera_input_enabled(input));
    }
    let marker_hidden = scene.markers().any(|m| !m.visible);
    assert!(marker_hidden, "gegriffener Marker ist ausgeblendet");

    edit.handle_pointer(&mut scene, PointerEvent::PrimaryUp { screen });
    assert!(!edit.is_dragging());
    for input in CameraInput::ALL {
        assert!(scene.camera_input_enabled(input));
    }
    assert!(scene.markers().all(|m| m.visible));
}

#[test]
fn test_disable_gibt_kamera_waehrend_drag_frei() {
    let mut scene = scene();
    let mut edit = active(triangle(), &mut scene);
    let screen = scene.world_to_screen(DVec3::ZERO);
    edit.handle_pointer(&mut scene, PointerEvent::PrimaryDown { screen });

    edit.disable(&mut scene);

    for input in CameraInput::ALL {
        assert!(scene.camera_input_enabled(input));
    }
}

#[test]
fn test_kreis_radius_drag() {
    let mut scene = scene();
    let mut edit = active(circle(), &mut scene);

    drag(
        &mut edit,
        &mut scene,
        DVec3::new(100.0, 0.0, 0.0),
        DVec3::new(0.0, 150.0, 0.0),
    );

    let params = edit.shape().params();
    assert_relative_eq!(params.semi_major_axis.expect("Radius"), 150.0, epsilon = 1e-6);
    let handle = draggers_of(&edit, DraggerType::EditAttribute)[0];
    assert_relative_eq!(handle.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(handle.y, 150.0, epsilon = 1e-6);
}

#[test]
fn test_kreis_mittelpunkt_fuehrt_radius_mit() {
    let mut scene = scene();
    let mut edit = active(circle(), &mut scene);

    drag(&mut edit, &mut scene, DVec3::ZERO, DVec3::new(20.0, 10.0, 0.0));

    let handle = draggers_of(&edit, DraggerType::EditAttribute)[0];
    assert_relative_eq!(handle.x, 120.0, epsilon = 1e-6);
    assert_relative_eq!(handle.y, 10.0, epsilon = 1e-6);
    assert_relative_eq!(edit.get_positions()[1].x, 120.0, epsilon = 1e-6);
    assert_relative_eq!(
        edit.shape().params().semi_major_axis.expect("Radius"),
        100.0,
        epsilon = 1e-6
    );
}

#[test]
fn test_fehlerhafter_callback_verwirft_frame() {
    let mut scene = scene();
    let mut edit = active(circle(), &mut scene);
    let handle = scene.world_to_screen(DVec3::new(100.0, 0.0, 0.0));
    let center = scene.world_to_screen(DVec3::ZERO);
    let valid = scene.world_to_screen(DVec3::new(80.0, 0.0, 0.0));

    edit.handle_pointer(&mut scene, PointerEvent::PrimaryDown { screen: handle });
    edit.handle_pointer(&mut scene, PointerEvent::Move { screen: center });
    assert_eq!(edit.shape().params().semi_major_axis, Some(100.0));
    assert_eq!(edit.get_positions()[1], DVec3::new(100.0, 0.0, 0.0));
    assert!(edit.is_dragging(), "Session überlebt den Fehler");

    edit.handle_pointer(&mut scene, PointerEvent::Move { screen: valid });
    edit.handle_pointer(&mut scene, PointerEvent::PrimaryUp { screen: valid });
    assert_relative_eq!(
        edit.shape().params().semi_major_axis.expect("Radius"),
        80.0,
        epsilon = 1e-6
    );
}

#[test]
fn test_extrusionshoehe_per_pixel_delta() {
    let mut scene = scene();
    let attributes = ShapeAttributes {
        config: ShapeConfig {
            extruded: true,
            ..ShapeConfig::default()
        },
        ..ShapeAttributes::default()
    };
    let shape = shape_with(
        ShapeKind::Circle,
        attributes,
        vec![DVec3::ZERO, DVec3::new(100.0, 0.0, 0.0)],
    );
    let mut edit = active(shape, &mut scene);
    let heights = draggers_of(&edit, DraggerType::MoveHeight);
    assert_eq!(heights.len(), 1);

    let start = scene.world_to_screen(heights[0]);
    let end = start - Vec2::new(0.0, 10.0);
    edit.handle_pointer(&mut scene, PointerEvent::PrimaryDown { screen: start });
    edit.handle_pointer(&mut scene, PointerEvent::Move { screen: end });
    edit.handle_pointer(&mut scene, PointerEvent::PrimaryUp { screen: end });

    // 10 px * 1 m/px * 1.5
    assert_relative_eq!(
        edit.shape().params().extruded_height.expect("Höhe"),
        35.0,
        epsilon = 1e-6
    );
}

#[test]
fn test_primitive_form_wird_abgelehnt() {
    let mut scene = scene();
    let mut shape = Shape::new(
        ShapeKind::Polyline,
        ShapeAttributes::default(),
        Representation::Primitive,
        DVec3::Z,
    );
    shape.set_control_points(vec![DVec3::ZERO, DVec3::new(50.0, 0.0, 0.0)]);
    let mut edit = EditController::new(shape, &EditorOptions::default());
    assert!(edit.activate(&mut scene).is_err());
    assert!(!edit.is_active());

    let mut shape = edit.into_shape();
    shape.convert_to_retained();
    let mut edit = EditController::new(shape, &EditorOptions::default());
    assert!(edit.activate(&mut scene).is_ok());
}

#[test]
fn test_leere_form_ist_setup_fehler() {
    let mut scene = scene();
    let shape = Shape::new(
        ShapeKind::Polygon,
        ShapeAttributes::default(),
        Representation::Retained,
        DVec3::Z,
    );
    let mut edit = EditController::new(shape, &EditorOptions::default());

    assert!(edit.activate(&mut scene).is_err());
    assert!(!edit.shape().in_progress());
    assert_eq!(scene.bound_input_count(), 0);
    assert!(scene.notifications().is_empty());
}

#[test]
fn test_set_positions_baut_dragger_neu() {
    let mut scene = scene();
    let mut edit = active(triangle(), &mut scene);
    let points = vec![
        DVec3::new(-50.0, -50.0, 0.0),
        DVec3::new(50.0, -50.0, 0.0),
        DVec3::new(50.0, 50.0, 0.0),
        DVec3::new(-50.0, 50.0, 0.0),
        DVec3::new(-80.0, 0.0, 0.0),
    ];

    edit.set_positions(&mut scene, points.clone()).expect("Punkte setzen");

    assert_eq!(edit.get_positions(), points);
    assert_eq!(draggers_of(&edit, DraggerType::Control), points);
    assert_eq!(scene.markers().count(), 5 + 5 + 1);
    assert!(edit.set_positions(&mut scene, vec![DVec3::ZERO]).is_err());
}

#[test]
fn test_modell_hoehe() {
    let mut scene = scene();
    let shape = shape_with(
        ShapeKind::Model,
        ShapeAttributes::default(),
        vec![DVec3::new(10.0, 10.0, 0.0)],
    );
    let mut edit = active(shape, &mut scene);
    let handle = draggers_of(&edit, DraggerType::MoveHeight)[0];
    let start = scene.world_to_screen(handle);
    let end = start - Vec2::new(0.0, 4.0);

    edit.handle_pointer(&mut scene, PointerEvent::PrimaryDown { screen: start });
    edit.handle_pointer(&mut scene, PointerEvent::Move { screen: end });
    edit.handle_pointer(&mut scene, PointerEvent::PrimaryUp { screen: end });

    assert_relative_eq!(edit.get_positions()[0].z, 6.0, epsilon = 1e-6);
}

#[test]
fn test_pfeil_zeigt_abgeleitete_positionen() {
    let mut scene = scene();
    let shape = shape_with(
        ShapeKind::Arrow,
        ShapeAttributes::default(),
        vec![DVec3::ZERO, DVec3::new(100.0, 0.0, 0.0)],
    );
    let mut edit = active(shape, &mut scene);

    assert_eq!(edit.show_positions().len(), 7);
    assert_eq!(draggers_of(&edit, DraggerType::Control).len(), 2);
    assert!(draggers_of(&edit, DraggerType::AddMidPoint).is_empty());

    drag(
        &mut edit,
        &mut scene,
        DVec3::new(100.0, 0.0, 0.0),
        DVec3::new(0.0, 100.0, 0.0),
    );
    let tip = edit.show_positions()[3];
    assert_relative_eq!(tip.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(tip.y, 100.0, epsilon = 1e-6);
    let rendered = edit.shape().render_geometry().positions;
    assert_relative_eq!(rendered[3].y, 100.0, epsilon = 1e-6);
}

#[test]
fn test_update_draggers_folgt_externer_aenderung() {
    let mut scene = scene();
    let mut edit = active(triangle(), &mut scene);
    let stale: Vec<_> = edit
        .draggers()
        .expect("aktive Session")
        .iter()
        .map(|d| d.id)
        .collect();

    {
        let shape = edit.shape_mut();
        shape
            .geometry_mut()
            .control_points
            .push(DVec3::new(-20.0, 60.0, 0.0));
        shape.refresh_render();
    }
    edit.update_draggers(&mut scene).expect("Neuaufbau");

    assert_eq!(edit.shape().point_count(), 4);
    assert_eq!(
        draggers_of(&edit, DraggerType::Control).len(),
        edit.shape().point_count()
    );
    assert_eq!(draggers_of(&edit, DraggerType::Control), edit.get_positions());
    assert_eq!(draggers_of(&edit, DraggerType::AddMidPoint).len(), 4);
    assert!(stale.iter().all(|id| scene.marker(*id).is_none()));
    assert_eq!(scene.markers().count(), 4 + 4 + 1);
}

#[test]
fn test_update_draggers_ohne_session_ist_noop() {
    let mut scene = scene();
    let mut edit = EditController::new(triangle(), &EditorOptions::default());

    edit.update_draggers(&mut scene).expect("kein Fehler");

    assert!(edit.draggers().is_none());
    assert_eq!(scene.markers().count(), 0);
}

#[test]
fn test_rezept_je_layout() {
    let options = EditorOptions::default();
    assert_eq!(EditController::new(triangle(), &options).recipe_name(), "Polygon");
    assert_eq!(EditController::new(circle(), &options).recipe_name(), "Kreis");
}
