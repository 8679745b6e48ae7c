use crate::app::pointer::PointerEvent;
use crate::core::{Representation, ShapeAttributes, ShapeId, ShapeKind};
use crate::shared::EditorOptions;
use glam::DVec3;

/// Mutierende Commands, ausgeführt vom `PlotController`.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotCommand {
    /// Zeichen-Session für einen Formtyp starten
    BeginDraw {
        kind: ShapeKind,
        representation: Representation,
        attributes: ShapeAttributes,
    },
    /// Pointer-Event an die aktive Session weiterreichen
    RoutePointer { event: PointerEvent },
    /// Long-Press-Timer der Zeichen-Session prüfen
    TickDraw { now_ms: u64 },
    /// Zeichnung abschließen (ohne Wirkung unter der Mindestpunktzahl)
    EndDraw,
    /// Zeichen-Session beenden
    CancelDraw { force: bool },
    /// Edit-Session für eine Form starten
    BeginEdit { shape_id: ShapeId },
    /// Edit-Session beenden und Form zurücklegen
    EndEdit,
    /// Kontrollpunkte der bearbeiteten Form ersetzen
    SetEditPositions { positions: Vec<DVec3> },
    /// Kontrollpunkt der bearbeiteten Form löschen
    RemoveEditPoint { index: usize },
    /// Form aus der Sammlung entfernen
    DeleteShape { shape_id: ShapeId },
    /// Primitive-Form umwandeln
    ConvertShapeToRetained { shape_id: ShapeId },
    /// Undo ausführen
    Undo,
    /// Redo ausführen
    Redo,
    /// Laufzeit-Optionen übernehmen
    ApplyOptions { options: Box<EditorOptions> },
}
