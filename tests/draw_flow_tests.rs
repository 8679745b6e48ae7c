use glam::DVec3;
use scene_plot_editor::scene::CursorStyle;
use scene_plot_editor::{
    DrawController, DrawOutcome, EditController, EditorOptions, FlatScene, FlatSceneConfig,
    PointerEvent, Representation, Shape, ShapeAttributes, ShapeConfig, ShapeKind,
};

fn scene() -> FlatScene {
    FlatScene::new(FlatSceneConfig::default())
}

fn click(draw: &mut DrawController, scene: &mut FlatScene, x: f64, y: f64) -> DrawOutcome {
    let screen = scene.screen_of(x, y);
    draw.handle_pointer(scene, PointerEvent::PrimaryClick { screen })
}

fn double_click(draw: &mut DrawController, scene: &mut FlatScene, x: f64, y: f64) -> DrawOutcome {
    let screen = scene.screen_of(x, y);
    draw.handle_pointer(scene, PointerEvent::DoubleClick { screen })
}

/// Zeichnet eine Form mit der Mindestpunktzahl und schließt per Doppelklick ab.
fn draw_minimal(kind: ShapeKind, scene: &mut FlatScene) -> Shape {
    let mut draw = DrawController::new(kind, Representation::Retained, EditorOptions::default());
    draw.activate(scene, ShapeAttributes::default(), None);

    for i in 0..kind.spec().min_points {
        let (x, y) = (i as f64 * 40.0, (i % 2) as f64 * 30.0 + i as f64 * 5.0);
        if let DrawOutcome::Finished(shape) = click(&mut draw, scene, x, y) {
            return shape;
        }
    }
    double_click(&mut draw, scene, 500.0, 500.0)
        .into_finished()
        .unwrap_or_else(|| panic!("{:?} nicht abgeschlossen", kind))
}

#[test]
fn test_dreieck_zeichnen_per_doppelklick() {
    let mut scene = scene();
    let mut draw = DrawController::new(
        ShapeKind::Polygon,
        Representation::Retained,
        EditorOptions::default(),
    );
    let attributes = ShapeAttributes {
        config: ShapeConfig {
            min_points: Some(3),
            ..Default::default()
        },
        ..Default::default()
    };
    draw.activate(&mut scene, attributes, None);
    assert_eq!(scene.cursor(), CursorStyle::Crosshair);
    assert!(!scene.competing_tools_enabled());

    click(&mut draw, &mut scene, 0.0, 0.0);
    click(&mut draw, &mut scene, 10.0, 0.0);
    click(&mut draw, &mut scene, 5.0, 10.0);
    let shape = double_click(&mut draw, &mut scene, 5.2, 10.1)
        .into_finished()
        .expect("Form abgeschlossen");

    assert_eq!(shape.point_count(), 3);
    assert!(!shape.in_progress());
    assert!(!shape.is_render_live());
    assert!(!draw.is_active());
    assert_eq!(scene.cursor(), CursorStyle::Default);
    assert!(scene.competing_tools_enabled());
    assert_eq!(scene.bound_input_count(), 0);
    assert_eq!(
        scene.notification_names(),
        vec![
            "draw.start",
            "draw.addPoint",
            "draw.addPoint",
            "draw.addPoint",
            "draw.created"
        ]
    );
}

#[test]
fn test_aktivierung_zweimal_bindet_einmal() {
    let mut scene = scene();
    let mut draw = DrawController::new(
        ShapeKind::Polyline,
        Representation::Retained,
        EditorOptions::default(),
    );

    let first = draw.activate(&mut scene, ShapeAttributes::default(), None).id();
    let second = draw.activate(&mut scene, ShapeAttributes::default(), None).id();

    assert_eq!(first, second);
    assert_eq!(scene.bound_input_count(), 1);
    assert_eq!(scene.notification_names(), vec!["draw.start"]);
}

#[test]
fn test_jeder_formtyp_ist_zeichen_und_bearbeitbar() {
    for kind in ShapeKind::ALL {
        let mut scene = scene();
        let shape = draw_minimal(kind, &mut scene);
        assert!(
            shape.point_count() >= kind.spec().min_points,
            "{:?}: {} Punkte",
            kind,
            shape.point_count()
        );

        let mut edit = EditController::new(shape, &EditorOptions::default());
        edit.activate(&mut scene)
            .unwrap_or_else(|err| panic!("{:?} nicht bearbeitbar: {:#}", kind, err));
        assert!(
            edit.draggers().is_some_and(|d| !d.is_empty()),
            "{:?} ohne Dragger",
            kind
        );
        edit.disable(&mut scene);
        assert_eq!(scene.markers().count(), 0, "{:?}: Marker übrig", kind);
        assert_eq!(scene.bound_input_count(), 0, "{:?}: Bindung übrig", kind);
    }
}

#[test]
fn test_punkt_ausserhalb_der_flaeche_nutzt_vorschau() {
    let mut scene = FlatScene::new(FlatSceneConfig {
        surface_extent: Some(50.0),
        ..Default::default()
    });
    let mut draw = DrawController::new(
        ShapeKind::Polyline,
        Representation::Retained,
        EditorOptions::default(),
    );
    draw.activate(&mut scene, ShapeAttributes::default(), None);

    click(&mut draw, &mut scene, 0.0, 0.0);
    let inside = scene.screen_of(30.0, 0.0);
    draw.handle_pointer(&mut scene, PointerEvent::Move { screen: inside });
    click(&mut draw, &mut scene, 200.0, 0.0);

    let points = draw.shape().expect("aktiv").control_points();
    assert_eq!(points, vec![DVec3::ZERO, DVec3::new(30.0, 0.0, 0.0)]);
}
