//! Schnittstelle zum Renderer: Picking, Kamera-Eingaben, Overlay, Events.
//!
//! Der Editor-Kern besitzt keinen Renderer. Alle Zugriffe auf Szene, Kamera
//! und Bildschirm laufen über [`SceneHost`], das pro Aufruf als
//! `&mut dyn SceneHost` übergeben wird.

mod camera_lock;
mod flat;

pub use camera_lock::CameraInputLock;
pub use flat::{FlatCamera, FlatScene, FlatSceneConfig};

use crate::core::{DraggerId, PlotEvent, ShapeId};
use glam::{DVec3, Vec2};
use serde::{Deserialize, Serialize};

/// Ergebnis eines Objekt-Picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRef {
    /// Ein Dragger-Marker
    Dragger(DraggerId),
    /// Eine gezeichnete Form
    Shape(ShapeId),
    /// Beliebiges anderes Szenenobjekt
    Other(u64),
}

/// Kamera-Eingabekanäle, die während eines Drags gesperrt werden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraInput {
    /// Drehen
    Rotate,
    /// Neigen
    Tilt,
    /// Verschieben
    Translate,
    /// Alle übrigen Eingaben
    AllInputs,
}

impl CameraInput {
    /// Alle Kanäle in fester Reihenfolge.
    pub const ALL: [CameraInput; 4] = [
        CameraInput::Rotate,
        CameraInput::Tilt,
        CameraInput::Translate,
        CameraInput::AllInputs,
    ];
}

/// Cursor-Darstellung im Viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorStyle {
    /// Standard-Cursor
    #[default]
    Default,
    /// Fadenkreuz während des Zeichnens
    Crosshair,
}

/// Wer eine Eingabe-Bindung hält.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOwner {
    /// Zeichen-Session
    Draw,
    /// Bearbeitungs-Session
    Edit,
}

/// Handle einer registrierten Pointer-Bindung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputBinding(pub u64);

/// Darstellung eines Dragger-Markers im Viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleMarker {
    /// ID des Draggers (Pick-Ergebnis)
    pub id: DraggerId,
    /// Weltposition
    pub position: DVec3,
    /// RGBA-Farbe
    pub color: [f32; 4],
    /// Größe in Screen-Pixeln
    pub pixel_size: f32,
    /// Sichtbar und pickbar
    pub visible: bool,
    /// Nimmt am Oberflächen-Picking teil
    pub surface_pickable: bool,
}

/// Fähigkeiten, die der Editor vom Renderer konsumiert.
pub trait SceneHost {
    // ── Picking ─────────────────────────────────────────────────

    /// Weltposition auf der Oberfläche unter einem Bildschirmpunkt.
    fn pick_surface_position(&self, screen: Vec2) -> Option<DVec3>;

    /// Objekt unter einem Bildschirmpunkt.
    fn pick_object(&self, screen: Vec2) -> Option<ObjectRef>;

    /// Welteinheiten pro Pixel für eine Kugel um `center`.
    fn pixel_size_at_distance(
        &self,
        center: DVec3,
        bounding_radius: f64,
        viewport_width: f32,
        viewport_height: f32,
    ) -> f64;

    /// Viewport-Größe in Pixeln.
    fn viewport_size(&self) -> Vec2;

    /// Hoch-Achse an einer Weltposition.
    fn up_axis(&self, _position: DVec3) -> DVec3 {
        DVec3::Z
    }

    // ── Kamera ──────────────────────────────────────────────────

    /// Aktiviert oder sperrt einen Kamera-Eingabekanal.
    fn set_camera_input(&mut self, input: CameraInput, enabled: bool);

    /// Aktueller Zustand eines Kamera-Eingabekanals.
    fn camera_input_enabled(&self, input: CameraInput) -> bool;

    // ── Interaktion ─────────────────────────────────────────────

    /// Setzt den Cursor.
    fn set_cursor(&mut self, cursor: CursorStyle);

    /// Schaltet konkurrierende Interaktions-Plugins an oder aus.
    fn set_competing_tools_enabled(&mut self, enabled: bool);

    /// Registriert eine Pointer-Bindung.
    fn bind_input(&mut self, owner: InputOwner) -> InputBinding;

    /// Gibt eine Pointer-Bindung frei.
    fn unbind_input(&mut self, binding: InputBinding);

    // ── Overlay ─────────────────────────────────────────────────

    /// Zeigt einen Tooltip an einem Bildschirmpunkt.
    fn show_tooltip(&mut self, screen: Vec2, text: &str);

    /// Blendet den Tooltip aus.
    fn hide_tooltip(&mut self);

    /// Legt einen Dragger-Marker an oder aktualisiert ihn.
    fn upsert_marker(&mut self, marker: HandleMarker);

    /// Entfernt einen Dragger-Marker.
    fn remove_marker(&mut self, id: DraggerId);

    // ── Benachrichtigungen ──────────────────────────────────────

    /// Feuert ein Lifecycle-Event an UI-Kollaborateure.
    fn notify(&mut self, event: PlotEvent);
}
