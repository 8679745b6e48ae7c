use crate::app::pointer::PointerEvent;
use crate::core::{Representation, ShapeConfig, ShapeId, ShapeKind, StyleMap};
use crate::shared::EditorOptions;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Eingaben aus UI, Host oder Replay-Szenario ohne eigene Mutationslogik.
///
/// Formen ohne explizite ID beziehen sich auf die zuletzt erzeugte Form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "intent")]
pub enum PlotIntent {
    /// Zeichnen einer neuen Form beginnen
    StartDrawingRequested {
        kind: ShapeKind,
        #[serde(default)]
        representation: Representation,
        #[serde(default)]
        config: ShapeConfig,
        #[serde(default)]
        style: StyleMap,
    },
    /// Pointer- oder Touch-Eingabe im Viewport
    Pointer { event: PointerEvent },
    /// Frame-Tick (Zeitstempel in ms)
    Tick { now_ms: u64 },
    /// Laufende Zeichnung abschließen
    FinishDrawingRequested,
    /// Laufende Zeichnung beenden, unvollständige Formen werden verworfen
    CancelDrawingRequested {
        #[serde(default)]
        force: bool,
    },
    /// Form zur Bearbeitung öffnen
    EditShapeRequested {
        #[serde(default)]
        shape_id: Option<ShapeId>,
    },
    /// Bearbeitung beenden
    StopEditingRequested,
    /// Alle Kontrollpunkte der bearbeiteten Form ersetzen
    SetPositionsRequested { positions: Vec<DVec3> },
    /// Kontrollpunkt der bearbeiteten Form löschen
    RemovePointRequested { index: usize },
    /// Form löschen
    DeleteShapeRequested {
        #[serde(default)]
        shape_id: Option<ShapeId>,
    },
    /// Primitive-Form in Retained-Darstellung umwandeln
    ConvertToRetainedRequested {
        #[serde(default)]
        shape_id: Option<ShapeId>,
    },
    /// Letzte Operation rückgängig machen
    UndoRequested,
    /// Rückgängig gemachte Operation wiederholen
    RedoRequested,
    /// Laufzeit-Optionen ersetzen
    OptionsChanged { options: Box<EditorOptions> },
}
