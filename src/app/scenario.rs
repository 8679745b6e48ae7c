//! Replay-Szenarien: Szenenparameter plus geordnete Intent-Liste aus TOML.

use super::{PlotController, PlotState};
use crate::app::PlotIntent;
use crate::core::{PlotEvent, ShapeId, ShapeSnapshot};
use crate::scene::{FlatScene, FlatSceneConfig};
use crate::shared::EditorOptions;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ein abspielbares Szenario.
///
/// ```toml
/// [scene]
/// meters_per_pixel = 1.0
///
/// [[steps]]
/// intent = "StartDrawingRequested"
/// kind = "Polygon"
///
/// [[steps]]
/// intent = "Pointer"
/// event = { type = "PrimaryClick", screen = [400.0, 300.0] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Parameter der flachen Referenzszene
    pub scene: FlatSceneConfig,
    /// Intents in Abspielreihenfolge
    pub steps: Vec<PlotIntent>,
}

/// Ergebnis eines Replays.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Alle Formen nach dem letzten Schritt
    pub shapes: Vec<ShapeSnapshot>,
    /// Alle Lifecycle-Events in Reihenfolge
    pub events: Vec<PlotEvent>,
    /// Anzahl ausgeführter Commands
    pub commands: usize,
    /// Zeichnung am Ende noch offen
    pub drawing: bool,
    /// Am Ende noch bearbeitete Form
    pub editing: Option<ShapeId>,
    /// Undo-Schritt verfügbar
    pub can_undo: bool,
    /// Redo-Schritt verfügbar
    pub can_redo: bool,
}

impl Scenario {
    /// Lädt ein Szenario aus einer TOML-Datei.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Szenario {} nicht lesbar", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Szenario {} ungültig", path.display()))
    }

    /// Parst ein Szenario aus TOML-Text.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let scenario: Self = toml::from_str(text)?;
        log::debug!("Szenario mit {} Schritten geladen", scenario.steps.len());
        Ok(scenario)
    }

    /// Spielt alle Schritte gegen eine frische `FlatScene` ab.
    ///
    /// Der erste fehlschlagende Schritt bricht das Replay ab.
    pub fn run(self, options: EditorOptions) -> anyhow::Result<ReplayReport> {
        let mut scene = FlatScene::new(self.scene);
        let mut state = PlotState::with_options(options);
        let mut controller = PlotController::new();

        for (number, step) in self.steps.into_iter().enumerate() {
            log::debug!("Schritt {}: {:?}", number + 1, step);
            controller
                .handle_intent(&mut state, &mut scene, step)
                .with_context(|| format!("Schritt {} fehlgeschlagen", number + 1))?;
        }

        let report = ReplayReport {
            shapes: state.shape_snapshots(),
            events: scene.take_notifications(),
            commands: state.command_log.len(),
            drawing: state.is_drawing(),
            editing: state.editing_shape_id(),
            can_undo: state.can_undo(),
            can_redo: state.can_redo(),
        };
        log::info!(
            "Replay abgeschlossen: {} Formen, {} Events",
            report.shapes.len(),
            report.events.len()
        );
        Ok(report)
    }
}
