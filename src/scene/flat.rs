//! Flache Referenz-Szene: orthografische Draufsicht auf eine Ebene.
//!
//! Dient Tests, Benchmarks und dem Replay-Binary als `SceneHost`. Picking
//! trifft die Ebene `z = ground_height`; außerhalb der optionalen
//! Oberflächen-Ausdehnung liefert es `None` (Pick-Fehlschlag).
//! Höhe wird schräg projiziert: erhöhte Punkte erscheinen um
//! `elevation_skew` Pixel pro Welt-Pixel weiter oben.

use super::{
    CameraInput, CursorStyle, HandleMarker, InputBinding, InputOwner, ObjectRef, SceneHost,
};
use crate::core::{DraggerId, PlotEvent};
use glam::{DVec2, DVec3, Vec2};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Orthografische 2D-Kamera über der Ebene mit Pan und Zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatCamera {
    /// Bildmitte in Weltkoordinaten
    pub position: DVec2,
    /// Welteinheiten pro Screen-Pixel
    pub meters_per_pixel: f64,
}

impl FlatCamera {
    /// Kleinster erlaubter Maßstab.
    pub const MPP_MIN: f64 = 0.001;
    /// Größter erlaubter Maßstab.
    pub const MPP_MAX: f64 = 10_000.0;

    /// Erstellt eine Kamera mit Bildmitte und Maßstab.
    pub fn new(position: DVec2, meters_per_pixel: f64) -> Self {
        Self {
            position,
            meters_per_pixel: meters_per_pixel.clamp(Self::MPP_MIN, Self::MPP_MAX),
        }
    }

    /// Verschiebt die Kamera (Pan) in Welteinheiten.
    pub fn pan(&mut self, delta: DVec2) {
        self.position += delta;
    }

    /// Zoomt um `factor` (> 1 vergrößert).
    pub fn zoom_by(&mut self, factor: f64) {
        if factor > 0.0 {
            self.meters_per_pixel =
                (self.meters_per_pixel / factor).clamp(Self::MPP_MIN, Self::MPP_MAX);
        }
    }

    /// Screen → Welt (Screen-Y zeigt nach unten, Welt-Y nach Norden).
    pub fn screen_to_world(&self, screen: Vec2, viewport: Vec2) -> DVec2 {
        let offset = (screen - viewport * 0.5).as_dvec2();
        DVec2::new(
            self.position.x + offset.x * self.meters_per_pixel,
            self.position.y - offset.y * self.meters_per_pixel,
        )
    }

    /// Welt → Screen.
    pub fn world_to_screen(&self, world: DVec2, viewport: Vec2) -> Vec2 {
        let offset = (world - self.position) / self.meters_per_pixel;
        Vec2::new(
            viewport.x * 0.5 + offset.x as f32,
            viewport.y * 0.5 - offset.y as f32,
        )
    }
}

/// Parameter der flachen Szene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatSceneConfig {
    /// Viewport-Größe in Pixeln
    pub viewport: [f32; 2],
    /// Welteinheiten pro Pixel
    pub meters_per_pixel: f64,
    /// Bildmitte in Weltkoordinaten
    pub center: [f64; 2],
    /// Höhe der Ebene
    pub ground_height: f64,
    /// Halbe Kantenlänge der pickbaren Fläche um den Ursprung (`None` = unbegrenzt)
    pub surface_extent: Option<f64>,
    /// Pick-Radius für Dragger-Marker in Pixeln
    pub pick_radius_px: f32,
    /// Schräge der Höhenprojektion (Screen-Pixel nach oben pro Höhen-Pixel)
    pub elevation_skew: f32,
}

impl Default for FlatSceneConfig {
    fn default() -> Self {
        Self {
            viewport: [800.0, 600.0],
            meters_per_pixel: 1.0,
            center: [0.0, 0.0],
            ground_height: 0.0,
            surface_extent: None,
            pick_radius_px: 8.0,
            elevation_skew: 0.5,
        }
    }
}

/// Referenz-Implementierung von [`SceneHost`] ohne Renderer.
#[derive(Debug)]
pub struct FlatScene {
    config: FlatSceneConfig,
    camera: FlatCamera,
    markers: IndexMap<DraggerId, HandleMarker>,
    camera_inputs: HashMap<CameraInput, bool>,
    cursor: CursorStyle,
    competing_tools_enabled: bool,
    bindings: Vec<(InputBinding, InputOwner)>,
    next_binding: u64,
    tooltip: Option<(Vec2, String)>,
    notifications: Vec<PlotEvent>,
}

impl FlatScene {
    /// Erstellt eine Szene aus ihrer Konfiguration.
    pub fn new(config: FlatSceneConfig) -> Self {
        let camera = FlatCamera::new(
            DVec2::new(config.center[0], config.center[1]),
            config.meters_per_pixel,
        );
        Self {
            config,
            camera,
            markers: IndexMap::new(),
            camera_inputs: CameraInput::ALL.iter().map(|i| (*i, true)).collect(),
            cursor: CursorStyle::Default,
            competing_tools_enabled: true,
            bindings: Vec::new(),
            next_binding: 1,
            tooltip: None,
            notifications: Vec::new(),
        }
    }

    /// Kamera der Szene.
    pub fn camera(&self) -> &FlatCamera {
        &self.camera
    }

    /// Mutable Kamera (Pan/Zoom).
    pub fn camera_mut(&mut self) -> &mut FlatCamera {
        &mut self.camera
    }

    /// Bildschirmpunkt einer Weltposition (Höhe schräg projiziert).
    pub fn world_to_screen(&self, world: DVec3) -> Vec2 {
        let ground = self
            .camera
            .world_to_screen(world.truncate(), self.viewport_size());
        let lift = (world.z - self.config.ground_height) / self.camera.meters_per_pixel;
        ground - Vec2::new(0.0, lift as f32 * self.config.elevation_skew)
    }

    /// Bildschirmpunkt aus Welt-XY auf Bodenhöhe (Kurzform für Tests und Szenarien).
    pub fn screen_of(&self, x: f64, y: f64) -> Vec2 {
        self.world_to_screen(DVec3::new(x, y, self.config.ground_height))
    }

    /// Alle Dragger-Marker.
    pub fn markers(&self) -> impl Iterator<Item = &HandleMarker> {
        self.markers.values()
    }

    /// Ein Marker per Dragger-ID.
    pub fn marker(&self, id: DraggerId) -> Option<&HandleMarker> {
        self.markers.get(&id)
    }

    /// Aktueller Cursor.
    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    /// `true`, wenn konkurrierende Plugins aktiv sind.
    pub fn competing_tools_enabled(&self) -> bool {
        self.competing_tools_enabled
    }

    /// Anzahl aktuell gehaltener Pointer-Bindungen.
    pub fn bound_input_count(&self) -> usize {
        self.bindings.len()
    }

    /// Aktuell sichtbarer Tooltip-Text.
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_ref().map(|(_, text)| text.as_str())
    }

    /// Alle bisher gefeuerten Events.
    pub fn notifications(&self) -> &[PlotEvent] {
        &self.notifications
    }

    /// Namen aller bisher gefeuerten Events.
    pub fn notification_names(&self) -> Vec<&'static str> {
        self.notifications.iter().map(PlotEvent::name).collect()
    }

    /// Entnimmt alle bisher gefeuerten Events.
    pub fn take_notifications(&mut self) -> Vec<PlotEvent> {
        std::mem::take(&mut self.notifications)
    }

    fn on_surface(&self, world: DVec2) -> bool {
        match self.config.surface_extent {
            Some(extent) => world.x.abs() <= extent && world.y.abs() <= extent,
            None => true,
        }
    }
}

impl SceneHost for FlatScene {
    fn pick_surface_position(&self, screen: Vec2) -> Option<DVec3> {
        let world = self.camera.screen_to_world(screen, self.viewport_size());
        if !self.on_surface(world) {
            return None;
        }
        Some(world.extend(self.config.ground_height))
    }

    fn pick_object(&self, screen: Vec2) -> Option<ObjectRef> {
        let radius = self.config.pick_radius_px;
        self.markers
            .values()
            .filter(|m| m.visible)
            .map(|m| (m.id, self.world_to_screen(m.position).distance(screen)))
            .filter(|(_, d)| *d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| ObjectRef::Dragger(id))
    }

    fn pixel_size_at_distance(
        &self,
        _center: DVec3,
        _bounding_radius: f64,
        _viewport_width: f32,
        _viewport_height: f32,
    ) -> f64 {
        self.camera.meters_per_pixel
    }

    fn viewport_size(&self) -> Vec2 {
        Vec2::from(self.config.viewport)
    }

    fn set_camera_input(&mut self, input: CameraInput, enabled: bool) {
        self.camera_inputs.insert(input, enabled);
    }

    fn camera_input_enabled(&self, input: CameraInput) -> bool {
        self.camera_inputs.get(&input).copied().unwrap_or(true)
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursor = cursor;
    }

    fn set_competing_tools_enabled(&mut self, enabled: bool) {
        self.competing_tools_enabled = enabled;
    }

    fn bind_input(&mut self, owner: InputOwner) -> InputBinding {
        let binding = InputBinding(self.next_binding);
        self.next_binding += 1;
        self.bindings.push((binding, owner));
        binding
    }

    fn unbind_input(&mut self, binding: InputBinding) {
        self.bindings.retain(|(b, _)| *b != binding);
    }

    fn show_tooltip(&mut self, screen: Vec2, text: &str) {
        self.tooltip = Some((screen, text.to_string()));
    }

    fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }

    fn upsert_marker(&mut self, marker: HandleMarker) {
        self.markers.insert(marker.id, marker);
    }

    fn remove_marker(&mut self, id: DraggerId) {
        self.markers.shift_remove(&id);
    }

    fn notify(&mut self, event: PlotEvent) {
        log::debug!("Event: {}", event.name());
        self.notifications.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_screen_world_hin_und_zurueck() {
        let scene = FlatScene::new(FlatSceneConfig {
            meters_per_pixel: 0.5,
            center: [100.0, 50.0],
            ..FlatSceneConfig::default()
        });
        let screen = scene.screen_of(110.0, 40.0);
        assert_relative_eq!(screen.x, 420.0);
        assert_relative_eq!(screen.y, 320.0);

        let world = scene.pick_surface_position(screen).expect("Treffer");
        assert_relative_eq!(world.x, 110.0);
        assert_relative_eq!(world.y, 40.0);
    }

    #[test]
    fn test_pick_ausserhalb_der_flaeche_liefert_none() {
        let scene = FlatScene::new(FlatSceneConfig {
            surface_extent: Some(50.0),
            ..FlatSceneConfig::default()
        });
        assert!(scene.pick_surface_position(scene.screen_of(10.0, 10.0)).is_some());
        assert!(scene.pick_surface_position(scene.screen_of(60.0, 0.0)).is_none());
    }

    #[test]
    fn test_pick_object_ignoriert_unsichtbare_marker() {
        let mut scene = FlatScene::new(FlatSceneConfig::default());
        let marker = HandleMarker {
            id: 42,
            position: DVec3::new(10.0, 0.0, 0.0),
            color: [1.0; 4],
            pixel_size: 10.0,
            visible: true,
            surface_pickable: false,
        };
        scene.upsert_marker(marker.clone());
        let screen = scene.screen_of(12.0, 0.0);
        assert_eq!(scene.pick_object(screen), Some(ObjectRef::Dragger(42)));

        scene.upsert_marker(HandleMarker {
            visible: false,
            ..marker
        });
        assert_eq!(scene.pick_object(screen), None);
    }

    #[test]
    fn test_erhoehte_punkte_liegen_weiter_oben() {
        let scene = FlatScene::new(FlatSceneConfig::default());
        let ground = scene.world_to_screen(DVec3::ZERO);
        let raised = scene.world_to_screen(DVec3::new(0.0, 0.0, 20.0));
        assert_relative_eq!(ground.y - raised.y, 10.0);
        assert_relative_eq!(ground.x, raised.x);
    }

    #[test]
    fn test_zoom_aendert_massstab() {
        let mut camera = FlatCamera::new(DVec2::ZERO, 1.0);
        camera.zoom_by(2.0);
        assert_relative_eq!(camera.meters_per_pixel, 0.5);
        camera.pan(DVec2::new(3.0, 4.0));
        assert_relative_eq!(camera.position.y, 4.0);
    }
}
