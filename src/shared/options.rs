//! Zentrale Konfiguration für den Scene-Plot-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::{DraggerPalette, DraggerType};
use serde::{Deserialize, Serialize};

// ── Zeichnen ────────────────────────────────────────────────────────

/// Dauer (ms) eines Long-Press, der auf Touch-Geräten das Zeichnen beendet.
pub const LONG_PRESS_MS: u64 = 800;
/// Bewegung (Screen-Pixel), ab der ein laufender Long-Press verworfen wird.
pub const LONG_PRESS_MOVE_TOLERANCE_PX: f32 = 10.0;
/// Toleranz je Achse (Welteinheiten), unter der zwei Endpunkte als Duplikat gelten.
pub const DUPLICATE_POINT_TOLERANCE: f64 = 1.0;
/// Höhen-Offset (Welteinheiten) für Punkte bei gesetztem `add_height`.
pub const ADD_HEIGHT_OFFSET: f64 = 1.0;

// ── Bearbeiten ──────────────────────────────────────────────────────

/// Faktor auf die Pixelgröße beim Höhen-Drag (Meter pro Pixel × Faktor).
pub const HEIGHT_DRAG_FACTOR: f64 = 1.5;
/// Darstellungsgröße der Dragger in Screen-Pixeln.
pub const DRAGGER_PIXEL_SIZE: f32 = 10.0;
/// Farbe normaler Kontrollpunkt-Dragger (RGBA: Weiß).
pub const DRAGGER_COLOR_CONTROL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
/// Farbe des Verschiebe-Alles-Draggers (RGBA: Grün).
pub const DRAGGER_COLOR_MOVE_ALL: [f32; 4] = [0.2, 0.9, 0.2, 1.0];
/// Farbe der Mittelpunkt-Dragger (RGBA: halbtransparentes Weiß).
pub const DRAGGER_COLOR_ADD_MID_POINT: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
/// Farbe der Höhen-Dragger (RGBA: Blau).
pub const DRAGGER_COLOR_MOVE_HEIGHT: [f32; 4] = [0.2, 0.7, 1.0, 1.0];
/// Farbe der Attribut-Dragger, z.B. Radius (RGBA: Orange).
pub const DRAGGER_COLOR_EDIT_ATTRIBUTE: [f32; 4] = [1.0, 0.5, 0.1, 1.0];

// ── History ─────────────────────────────────────────────────────────

/// Maximale Anzahl Undo-Schritte.
pub const HISTORY_DEPTH: usize = 200;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `scene_plot_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorOptions {
    // ── Zeichnen ────────────────────────────────────────────────
    /// Long-Press-Dauer in Millisekunden
    pub long_press_ms: u64,
    /// Bewegungstoleranz des Long-Press in Screen-Pixeln
    pub long_press_move_tolerance_px: f32,
    /// Duplikat-Toleranz je Achse für den Doppelklick-Abschluss
    pub duplicate_point_tolerance: f64,
    /// Höhen-Offset bei `add_height`
    #[serde(default = "default_add_height_offset")]
    pub add_height_offset: f64,

    // ── Bearbeiten ──────────────────────────────────────────────
    /// Faktor für die Umrechnung Pixel → Höhe beim Höhen-Drag
    pub height_drag_factor: f64,
    /// Dragger-Größe in Screen-Pixeln
    pub dragger_pixel_size: f32,
    /// Farbe der Kontrollpunkt-Dragger
    pub dragger_color_control: [f32; 4],
    /// Farbe des Verschiebe-Alles-Draggers
    pub dragger_color_move_all: [f32; 4],
    /// Farbe der Mittelpunkt-Dragger
    pub dragger_color_add_mid_point: [f32; 4],
    /// Farbe der Höhen-Dragger
    pub dragger_color_move_height: [f32; 4],
    /// Farbe der Attribut-Dragger
    pub dragger_color_edit_attribute: [f32; 4],

    // ── History ─────────────────────────────────────────────────
    /// Maximale Undo-Tiefe
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            long_press_ms: LONG_PRESS_MS,
            long_press_move_tolerance_px: LONG_PRESS_MOVE_TOLERANCE_PX,
            duplicate_point_tolerance: DUPLICATE_POINT_TOLERANCE,
            add_height_offset: ADD_HEIGHT_OFFSET,

            height_drag_factor: HEIGHT_DRAG_FACTOR,
            dragger_pixel_size: DRAGGER_PIXEL_SIZE,
            dragger_color_control: DRAGGER_COLOR_CONTROL,
            dragger_color_move_all: DRAGGER_COLOR_MOVE_ALL,
            dragger_color_add_mid_point: DRAGGER_COLOR_ADD_MID_POINT,
            dragger_color_move_height: DRAGGER_COLOR_MOVE_HEIGHT,
            dragger_color_edit_attribute: DRAGGER_COLOR_EDIT_ATTRIBUTE,

            history_depth: HISTORY_DEPTH,
        }
    }
}

/// Serde-Default für `add_height_offset` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_add_height_offset() -> f64 {
    ADD_HEIGHT_OFFSET
}

/// Serde-Default für `history_depth`.
fn default_history_depth() -> usize {
    HISTORY_DEPTH
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("scene_plot_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("scene_plot_editor.toml")
    }

    /// Liefert die Standardfarbe für einen Dragger-Typ.
    pub fn dragger_color(&self, kind: DraggerType) -> [f32; 4] {
        match kind {
            DraggerType::Control => self.dragger_color_control,
            DraggerType::MoveAll => self.dragger_color_move_all,
            DraggerType::AddMidPoint => self.dragger_color_add_mid_point,
            DraggerType::MoveHeight => self.dragger_color_move_height,
            DraggerType::EditAttribute => self.dragger_color_edit_attribute,
        }
    }

    /// Baut die Dragger-Farbtabelle für eine Edit-Session.
    pub fn dragger_palette(&self) -> DraggerPalette {
        DraggerPalette {
            control: self.dragger_color(DraggerType::Control),
            move_all: self.dragger_color(DraggerType::MoveAll),
            add_mid_point: self.dragger_color(DraggerType::AddMidPoint),
            move_height: self.dragger_color(DraggerType::MoveHeight),
            edit_attribute: self.dragger_color(DraggerType::EditAttribute),
            pixel_size: self.dragger_pixel_size,
        }
    }
}
