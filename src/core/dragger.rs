//! Dragger: ziehbare Anfasser für Kontrollpunkte und abgeleitete Größen.
//!
//! Dragger gehören ausschließlich der Edit-Session ([`DraggerCollection`]).
//! Verknüpfungen (z.B. Mittelpunkt → Achsen-Dragger) sind Slot-Indizes in
//! dieselbe Collection, keine gegenseitigen Referenzen.

use super::derivation::DeriveFn;
use super::shape::{next_object_id, ShapeGeometry};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Eindeutige ID eines Draggers (Picking-Ziel).
pub type DraggerId = u64;

/// Semantischer Typ eines Draggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraggerType {
    /// Verschiebt genau einen Kontrollpunkt
    Control,
    /// Verschiebt alle Kontrollpunkte um dasselbe Delta
    MoveAll,
    /// Fügt beim Ziehen einen neuen Punkt zwischen zwei Kontrollpunkten ein
    AddMidPoint,
    /// Verändert nur die Höhe entlang der Hoch-Achse
    MoveHeight,
    /// Verändert einen abgeleiteten Parameter (Radius, Halbachse, Maße)
    EditAttribute,
}

/// Callback eines Draggers: (Kontext, Slot des Draggers, Position).
///
/// Fehler werden von der Drag-Pipeline abgefangen und der Frame verworfen.
pub type DragHandler = Rc<dyn Fn(&mut DragContext<'_>, usize, DVec3) -> anyhow::Result<()>>;

/// Darstellungsstil eines Draggers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraggerStyle {
    /// RGBA-Farbe
    pub color: [f32; 4],
    /// Größe in Screen-Pixeln
    pub pixel_size: f32,
}

/// Farbtabelle je Dragger-Typ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraggerPalette {
    /// Farbe für `Control`
    pub control: [f32; 4],
    /// Farbe für `MoveAll`
    pub move_all: [f32; 4],
    /// Farbe für `AddMidPoint`
    pub add_mid_point: [f32; 4],
    /// Farbe für `MoveHeight`
    pub move_height: [f32; 4],
    /// Farbe für `EditAttribute`
    pub edit_attribute: [f32; 4],
    /// Einheitliche Größe in Screen-Pixeln
    pub pixel_size: f32,
}

impl DraggerPalette {
    /// Stil für einen Dragger-Typ.
    pub fn style_for(&self, kind: DraggerType) -> DraggerStyle {
        let color = match kind {
            DraggerType::Control => self.control,
            DraggerType::MoveAll => self.move_all,
            DraggerType::AddMidPoint => self.add_mid_point,
            DraggerType::MoveHeight => self.move_height,
            DraggerType::EditAttribute => self.edit_attribute,
        };
        DraggerStyle {
            color,
            pixel_size: self.pixel_size,
        }
    }
}

/// Ein einzelner Anfasser.
#[derive(Clone)]
pub struct Dragger {
    /// Eindeutige ID (Picking)
    pub id: DraggerId,
    /// Aktuelle Weltposition
    pub position: DVec3,
    /// Semantischer Typ
    pub kind: DraggerType,
    /// Index in die Kontrollpunkte (Bedeutung je Typ)
    pub index: usize,
    /// Slots verknüpfter Dragger, die beim Ziehen mitgeführt werden
    pub linked: Vec<usize>,
    /// Hover-Tooltip
    pub tooltip: String,
    /// Darstellungsstil
    pub style: DraggerStyle,
    /// Eigener Marker sichtbar (während des Ziehens ausgeblendet)
    pub marker_visible: bool,
    /// Nimmt am normalen Oberflächen-Picking teil (für Dragger immer `false`)
    pub surface_pickable: bool,
    on_drag_start: Option<DragHandler>,
    on_drag: Option<DragHandler>,
    on_drag_end: Option<DragHandler>,
}

impl Dragger {
    /// Callback beim Greifen.
    pub fn on_drag_start(&self) -> Option<DragHandler> {
        self.on_drag_start.clone()
    }

    /// Callback pro Bewegung.
    pub fn on_drag(&self) -> Option<DragHandler> {
        self.on_drag.clone()
    }

    /// Callback beim Loslassen.
    pub fn on_drag_end(&self) -> Option<DragHandler> {
        self.on_drag_end.clone()
    }
}

impl fmt::Debug for Dragger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dragger")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("kind", &self.kind)
            .field("index", &self.index)
            .field("linked", &self.linked)
            .field("marker_visible", &self.marker_visible)
            .finish_non_exhaustive()
    }
}

/// Bauparameter für [`create_dragger`].
pub struct DraggerOptions {
    /// Startposition
    pub position: DVec3,
    /// Semantischer Typ
    pub kind: DraggerType,
    /// Index in die Kontrollpunkte
    pub index: usize,
    /// Verknüpfte Dragger-Slots
    pub linked: Vec<usize>,
    /// Hover-Tooltip
    pub tooltip: String,
    /// Callback beim Greifen
    pub on_drag_start: Option<DragHandler>,
    /// Callback pro Bewegung
    pub on_drag: Option<DragHandler>,
    /// Callback beim Loslassen
    pub on_drag_end: Option<DragHandler>,
}

impl DraggerOptions {
    /// Minimaloptionen: Typ und Position, ohne Callbacks.
    pub fn new(kind: DraggerType, position: DVec3) -> Self {
        Self {
            position,
            kind,
            index: 0,
            linked: Vec::new(),
            tooltip: String::new(),
            on_drag_start: None,
            on_drag: None,
            on_drag_end: None,
        }
    }

    /// Setzt den Kontrollpunkt-Index.
    pub fn index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Setzt den Tooltip.
    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    /// Setzt verknüpfte Dragger-Slots.
    pub fn linked(mut self, linked: Vec<usize>) -> Self {
        self.linked = linked;
        self
    }

    /// Setzt den Greif-Callback.
    pub fn on_drag_start(mut self, handler: DragHandler) -> Self {
        self.on_drag_start = Some(handler);
        self
    }

    /// Setzt den Bewegungs-Callback.
    pub fn on_drag(mut self, handler: DragHandler) -> Self {
        self.on_drag = Some(handler);
        self
    }

    /// Setzt den Loslass-Callback.
    pub fn on_drag_end(mut self, handler: DragHandler) -> Self {
        self.on_drag_end = Some(handler);
        self
    }
}

/// Alle Dragger einer Edit-Session.
#[derive(Debug, Clone)]
pub struct DraggerCollection {
    draggers: Vec<Dragger>,
    palette: DraggerPalette,
}

impl DraggerCollection {
    /// Leere Collection mit gegebener Farbtabelle.
    pub fn new(palette: DraggerPalette) -> Self {
        Self {
            draggers: Vec::new(),
            palette,
        }
    }

    /// Anzahl Dragger.
    pub fn len(&self) -> usize {
        self.draggers.len()
    }

    /// `true` ohne Dragger.
    pub fn is_empty(&self) -> bool {
        self.draggers.is_empty()
    }

    /// Dragger an Slot.
    pub fn get(&self, slot: usize) -> Option<&Dragger> {
        self.draggers.get(slot)
    }

    /// Mutabler Dragger an Slot.
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Dragger> {
        self.draggers.get_mut(slot)
    }

    /// Slot eines Draggers per ID.
    pub fn slot_of(&self, id: DraggerId) -> Option<usize> {
        self.draggers.iter().position(|d| d.id == id)
    }

    /// Alle Dragger in Slot-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &Dragger> {
        self.draggers.iter()
    }

    /// Mutabler Iterator über alle Dragger.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Dragger> {
        self.draggers.iter_mut()
    }

    /// Anzahl Dragger eines Typs.
    pub fn count_of(&self, kind: DraggerType) -> usize {
        self.draggers.iter().filter(|d| d.kind == kind).count()
    }

    /// Ändert den Typ eines Draggers und passt den Stil an.
    pub fn retype(&mut self, slot: usize, kind: DraggerType) {
        let style = self.palette.style_for(kind);
        if let Some(dragger) = self.draggers.get_mut(slot) {
            dragger.kind = kind;
            dragger.style = style;
        }
    }

    /// Entfernt alle Dragger und gibt ihre IDs zurück.
    pub fn clear(&mut self) -> Vec<DraggerId> {
        self.draggers.drain(..).map(|d| d.id).collect()
    }
}

/// Erstellt einen Dragger und fügt ihn der Collection hinzu.
///
/// Vergibt ID und typabhängigen Stil und schließt den Dragger vom
/// Oberflächen-Picking aus. Gibt den Slot des neuen Draggers zurück.
pub fn create_dragger(collection: &mut DraggerCollection, options: DraggerOptions) -> usize {
    let dragger = Dragger {
        id: next_object_id(),
        position: options.position,
        kind: options.kind,
        index: options.index,
        linked: options.linked,
        tooltip: options.tooltip,
        style: collection.palette.style_for(options.kind),
        marker_visible: true,
        surface_pickable: false,
        on_drag_start: options.on_drag_start,
        on_drag: options.on_drag,
        on_drag_end: options.on_drag_end,
    };
    collection.draggers.push(dragger);
    collection.draggers.len() - 1
}

/// Kontext, den Drag-Callbacks sehen.
pub struct DragContext<'a> {
    /// Geometrie der bearbeiteten Form
    pub geometry: &'a mut ShapeGeometry,
    /// Alle Dragger der Session
    pub draggers: &'a mut DraggerCollection,
    /// Minimale Punktzahl der Form
    pub min_points: usize,
    /// Maximale Punktzahl der Form
    pub max_points: usize,
    /// Ableitungsfunktion der Form
    pub derive: DeriveFn,
    /// Position des Draggers vor dieser Bewegung
    pub previous: DVec3,
    rebuild_requested: bool,
}

impl<'a> DragContext<'a> {
    /// Baut einen Kontext für einen Callback-Aufruf.
    pub fn new(
        geometry: &'a mut ShapeGeometry,
        draggers: &'a mut DraggerCollection,
        min_points: usize,
        max_points: usize,
        derive: DeriveFn,
        previous: DVec3,
    ) -> Self {
        Self {
            geometry,
            draggers,
            min_points,
            max_points,
            derive,
            previous,
            rebuild_requested: false,
        }
    }

    /// Fordert einen kompletten Dragger-Neuaufbau nach dem Drag an.
    pub fn request_rebuild(&mut self) {
        self.rebuild_requested = true;
    }

    /// `true`, wenn ein Neuaufbau angefordert wurde.
    pub fn rebuild_requested(&self) -> bool {
        self.rebuild_requested
    }

    /// Aktuelle Darstellungspunkte der Form.
    pub fn display_positions(&self) -> Vec<DVec3> {
        (self.derive)(
            &self.geometry.control_points,
            &self.geometry.params,
            self.geometry.up,
        )
    }

    /// Dragger an Slot oder Fehler.
    pub fn dragger(&self, slot: usize) -> anyhow::Result<&Dragger> {
        self.draggers
            .get(slot)
            .ok_or_else(|| anyhow::anyhow!("Dragger-Slot {} existiert nicht", slot))
    }

    /// Kontrollpunkt-Index des Draggers an Slot, geprüft gegen die Punktliste.
    pub fn control_index(&self, slot: usize) -> anyhow::Result<usize> {
        let index = self.dragger(slot)?.index;
        if index >= self.geometry.control_points.len() {
            anyhow::bail!(
                "Dragger-Index {} außerhalb der Kontrollpunkte ({})",
                index,
                self.geometry.control_points.len()
            );
        }
        Ok(index)
    }

    /// Setzt die Position eines Draggers.
    pub fn place(&mut self, slot: usize, position: DVec3) -> anyhow::Result<()> {
        let dragger = self
            .draggers
            .get_mut(slot)
            .ok_or_else(|| anyhow::anyhow!("Dragger-Slot {} existiert nicht", slot))?;
        dragger.position = position;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> DraggerPalette {
        DraggerPalette {
            control: [1.0, 1.0, 1.0, 1.0],
            move_all: [0.0, 1.0, 0.0, 1.0],
            add_mid_point: [1.0, 1.0, 1.0, 0.5],
            move_height: [0.0, 0.0, 1.0, 1.0],
            edit_attribute: [1.0, 0.5, 0.0, 1.0],
            pixel_size: 10.0,
        }
    }

    #[test]
    fn test_create_dragger_vergibt_stil_und_picking_ausschluss() {
        let mut draggers = DraggerCollection::new(palette());
        let a = create_dragger(
            &mut draggers,
            DraggerOptions::new(DraggerType::Control, DVec3::ZERO).tooltip("A"),
        );
        let b = create_dragger(
            &mut draggers,
            DraggerOptions::new(DraggerType::AddMidPoint, DVec3::X).index(3),
        );

        let da = draggers.get(a).expect("Slot a");
        let db = draggers.get(b).expect("Slot b");
        assert_ne!(da.id, db.id);
        assert_eq!(da.style.color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(db.style.color[3], 0.5);
        assert_eq!(db.index, 3);
        assert!(!da.surface_pickable && !db.surface_pickable);
        assert_eq!(draggers.slot_of(db.id), Some(b));
    }

    #[test]
    fn test_retype_passt_farbe_an() {
        let mut draggers = DraggerCollection::new(palette());
        let slot = create_dragger(
            &mut draggers,
            DraggerOptions::new(DraggerType::AddMidPoint, DVec3::ZERO),
        );
        draggers.retype(slot, DraggerType::Control);
        let dragger = draggers.get(slot).expect("Slot");
        assert_eq!(dragger.kind, DraggerType::Control);
        assert_eq!(dragger.style.color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_context_control_index_prueft_grenzen() {
        let mut geometry = ShapeGeometry::new(vec![DVec3::ZERO], DVec3::Z);
        let mut draggers = DraggerCollection::new(palette());
        let slot = create_dragger(
            &mut draggers,
            DraggerOptions::new(DraggerType::Control, DVec3::ZERO).index(5),
        );
        let ctx = DragContext::new(
            &mut geometry,
            &mut draggers,
            1,
            1,
            crate::core::derivation::identity,
            DVec3::ZERO,
        );
        assert!(ctx.control_index(slot).is_err());
        assert!(ctx.dragger(99).is_err());
    }
}
