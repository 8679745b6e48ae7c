//! Benachrichtigungen an UI-/Tooltip-Kollaborateure.
//!
//! Der Kern feuert diese Events nur, er interpretiert sie nicht.

use super::dragger::DraggerType;
use super::shape::ShapeId;
use glam::DVec3;
use serde::Serialize;

/// Lifecycle-Event beim Zeichnen oder Bearbeiten.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event")]
pub enum PlotEvent {
    /// Zeichnen gestartet
    #[serde(rename = "draw.start")]
    DrawStart { shape_id: ShapeId },
    /// Punkt beim Zeichnen festgelegt
    #[serde(rename = "draw.addPoint")]
    DrawAddPoint { shape_id: ShapeId, position: DVec3 },
    /// Letzten Punkt beim Zeichnen zurückgenommen
    #[serde(rename = "draw.removePoint")]
    DrawRemovePoint { shape_id: ShapeId },
    /// Vorschaupunkt bewegt (vollständige Punktliste)
    #[serde(rename = "draw.mouseMove")]
    DrawMouseMove {
        shape_id: ShapeId,
        positions: Vec<DVec3>,
    },
    /// Form fertig gezeichnet
    #[serde(rename = "draw.created")]
    DrawCreated { shape_id: ShapeId },
    /// Bearbeitung gestartet
    #[serde(rename = "edit.start")]
    EditStart { shape_id: ShapeId },
    /// Dragger losgelassen
    #[serde(rename = "edit.movePoint")]
    EditMovePoint {
        shape_id: ShapeId,
        dragger: DraggerType,
        index: usize,
        position: DVec3,
    },
    /// Kontrollpunkt gelöscht
    #[serde(rename = "edit.removePoint")]
    EditRemovePoint { shape_id: ShapeId, index: usize },
    /// Bearbeitung beendet
    #[serde(rename = "edit.stop")]
    EditStop { shape_id: ShapeId },
}

impl PlotEvent {
    /// Event-Name, wie ihn Kollaborateure abonnieren.
    pub fn name(&self) -> &'static str {
        match self {
            PlotEvent::DrawStart { .. } => "draw.start",
            PlotEvent::DrawAddPoint { .. } => "draw.addPoint",
            PlotEvent::DrawRemovePoint { .. } => "draw.removePoint",
            PlotEvent::DrawMouseMove { .. } => "draw.mouseMove",
            PlotEvent::DrawCreated { .. } => "draw.created",
            PlotEvent::EditStart { .. } => "edit.start",
            PlotEvent::EditMovePoint { .. } => "edit.movePoint",
            PlotEvent::EditRemovePoint { .. } => "edit.removePoint",
            PlotEvent::EditStop { .. } => "edit.stop",
        }
    }

    /// Betroffene Form.
    pub fn shape_id(&self) -> ShapeId {
        match self {
            PlotEvent::DrawStart { shape_id }
            | PlotEvent::DrawAddPoint { shape_id, .. }
            | PlotEvent::DrawRemovePoint { shape_id }
            | PlotEvent::DrawMouseMove { shape_id, .. }
            | PlotEvent::DrawCreated { shape_id }
            | PlotEvent::EditStart { shape_id }
            | PlotEvent::EditMovePoint { shape_id, .. }
            | PlotEvent::EditRemovePoint { shape_id, .. }
            | PlotEvent::EditStop { shape_id } => *shape_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_tag_entspricht_event_namen() {
        let event = PlotEvent::EditRemovePoint {
            shape_id: 7,
            index: 2,
        };
        let json = serde_json::to_value(&event).expect("Serialisierung");
        assert_eq!(json["event"], event.name());
        assert_eq!(json["index"], 2);
        assert_eq!(event.shape_id(), 7);
    }
}
