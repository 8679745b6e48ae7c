//! Form-Datenmodell: Kontrollpunkte, Parameter, Attribute und Render-Bindung.

use super::derivation::centroid;
use super::property::Property;
use super::shape_kind::{ShapeKind, ShapeSpec};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Eindeutige ID einer Form.
pub type ShapeId = u64;

/// Freie Stil-Attribute (Farbe, Material, ...), vom Kern nicht interpretiert.
pub type StyleMap = serde_json::Map<String, serde_json::Value>;

/// Geteilte, veränderliche Geometrie einer Form.
///
/// Berechnete Render-Properties halten einen Klon dieses `Rc` und lesen
/// pro Frame den aktuellen Stand.
pub type SharedGeometry = Rc<RefCell<ShapeGeometry>>;

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Vergibt eine prozessweit eindeutige Objekt-ID (Formen und Dragger).
pub fn next_object_id() -> u64 {
    NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Stellt sicher, dass künftige IDs größer als `id` sind (nach Wiederherstellung).
pub fn reserve_object_id(id: u64) {
    NEXT_OBJECT_ID.fetch_max(id.saturating_add(1), Ordering::Relaxed);
}

/// Formparameter, die nicht in den Kontrollpunkten stecken.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryParams {
    /// Große Halbachse (Kreis: Radius)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semi_major_axis: Option<f64>,
    /// Kleine Halbachse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semi_minor_axis: Option<f64>,
    /// Absolute Höhe (Wasseroberfläche)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Extrusionshöhe relativ zur Grundfläche
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extruded_height: Option<f64>,
    /// Länge (Zylinder)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Kantenlängen (Quader)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<DVec3>,
    /// Radien je Achse (Ellipsoid)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radii: Option<DVec3>,
    /// Breite (Korridor, Linienvolumen)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Eckenzahl (regelmäßiges Polygon)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sides: Option<u32>,
    /// Drehwinkel in der lokalen Ebene (Radiant)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

/// Geometrischer Zustand einer Form.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeGeometry {
    /// Geordnete Kontrollpunkte (Reihenfolge ist signifikant)
    pub control_points: Vec<DVec3>,
    /// Zusätzliche Formparameter
    pub params: GeometryParams,
    /// Hoch-Achse der Szene am Ort der Form
    pub up: DVec3,
}

impl ShapeGeometry {
    /// Erstellt eine Geometrie ohne Parameter.
    pub fn new(control_points: Vec<DVec3>, up: DVec3) -> Self {
        Self {
            control_points,
            params: GeometryParams::default(),
            up,
        }
    }
}

/// Formspezifische Konfiguration (überschreibt die Typ-Defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Minimale Punktzahl
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_points: Option<usize>,
    /// Maximale Punktzahl
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_points: Option<usize>,
    /// Punkte beim Zeichnen um einen festen Betrag anheben
    pub add_height: bool,
    /// Grundfläche extrudieren (Höhen-Dragger im Bearbeitungsmodus)
    pub extruded: bool,
    /// Eckenzahl für regelmäßige Polygone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sides: Option<u32>,
}

/// Attribute einer Form: Stil + Konfiguration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeAttributes {
    /// Stil-Attribute, unverändert an den Renderer durchgereicht
    pub style: StyleMap,
    /// Punktgrenzen und Verhaltensschalter
    pub config: ShapeConfig,
}

/// Darstellungsart einer Form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Representation {
    /// Retained-Objekt mit pro Frame berechneten Attributen
    #[default]
    Retained,
    /// Gebündelte Primitive, bei jeder Punktänderung neu aufgebaut
    Primitive,
}

/// Was der Renderer pro Frame zeichnet.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayGeometry {
    /// Darstellungspunkte (abgeleitet aus den Kontrollpunkten)
    pub positions: Vec<DVec3>,
    /// Formparameter zum Zeitpunkt der Auswertung
    pub params: GeometryParams,
}

impl DisplayGeometry {
    fn derive(spec: &ShapeSpec, geometry: &ShapeGeometry) -> Self {
        Self {
            positions: (spec.derive)(&geometry.control_points, &geometry.params, geometry.up),
            params: geometry.params.clone(),
        }
    }
}

/// Gebündelte Primitive-Geometrie mit Revisionszähler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimitiveBatch {
    /// Darstellungspunkte des letzten Neuaufbaus
    pub positions: Vec<DVec3>,
    /// Formparameter des letzten Neuaufbaus
    pub params: GeometryParams,
    /// Zahl der bisherigen Neuaufbauten
    pub revision: u64,
}

/// Verbindung der Form zum Renderer.
#[derive(Debug, Clone)]
pub enum RenderBinding {
    /// Retained-Objekt, Geometrie als (ggf. berechnete) Property
    Retained(Property<DisplayGeometry>),
    /// Primitive-Batch
    Primitive(PrimitiveBatch),
}

/// Eine gezeichnete oder in Arbeit befindliche Form.
#[derive(Debug)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    geometry: SharedGeometry,
    /// Stil und Konfiguration
    pub attributes: ShapeAttributes,
    in_progress: bool,
    render: RenderBinding,
}

impl Shape {
    /// Erstellt eine leere Form mit neuer ID.
    pub fn new(
        kind: ShapeKind,
        attributes: ShapeAttributes,
        representation: Representation,
        up: DVec3,
    ) -> Self {
        Self::with_geometry(
            next_object_id(),
            kind,
            attributes,
            representation,
            ShapeGeometry::new(Vec::new(), up),
        )
    }

    fn with_geometry(
        id: ShapeId,
        kind: ShapeKind,
        attributes: ShapeAttributes,
        representation: Representation,
        geometry: ShapeGeometry,
    ) -> Self {
        let render = match representation {
            Representation::Retained => {
                RenderBinding::Retained(Property::Constant(DisplayGeometry::derive(
                    kind.spec(),
                    &geometry,
                )))
            }
            Representation::Primitive => RenderBinding::Primitive(PrimitiveBatch::default()),
        };
        let mut shape = Self {
            id,
            kind,
            geometry: Rc::new(RefCell::new(geometry)),
            attributes,
            in_progress: false,
            render,
        };
        shape.refresh_render();
        shape
    }

    /// Stellt eine Form aus einem Snapshot wieder her (gleiche ID).
    pub fn from_snapshot(snapshot: &ShapeSnapshot) -> Self {
        reserve_object_id(snapshot.id);
        let geometry = ShapeGeometry {
            control_points: snapshot.control_points.clone(),
            params: snapshot.params.clone(),
            up: snapshot.up,
        };
        Self::with_geometry(
            snapshot.id,
            snapshot.kind,
            snapshot.attributes.clone(),
            snapshot.representation,
            geometry,
        )
    }

    /// Eindeutige ID.
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Formtyp.
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Regel-Datensatz des Formtyps.
    pub fn spec(&self) -> &'static ShapeSpec {
        self.kind.spec()
    }

    /// Aktuelle Darstellungsart.
    pub fn representation(&self) -> Representation {
        match self.render {
            RenderBinding::Retained(_) => Representation::Retained,
            RenderBinding::Primitive(_) => Representation::Primitive,
        }
    }

    /// `true` während Zeichnen oder Bearbeiten.
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    pub(crate) fn set_in_progress(&mut self, in_progress: bool) {
        self.in_progress = in_progress;
    }

    /// Minimale Punktzahl (Konfiguration vor Typ-Default).
    pub fn min_points(&self) -> usize {
        self.attributes
            .config
            .min_points
            .unwrap_or(self.spec().min_points)
            .max(1)
    }

    /// Maximale Punktzahl (Konfiguration vor Typ-Default).
    pub fn max_points(&self) -> usize {
        self.attributes
            .config
            .max_points
            .unwrap_or(self.spec().max_points)
            .max(self.min_points())
    }

    /// Kopie der Kontrollpunkte.
    pub fn control_points(&self) -> Vec<DVec3> {
        self.geometry.borrow().control_points.clone()
    }

    /// Anzahl der Kontrollpunkte.
    pub fn point_count(&self) -> usize {
        self.geometry.borrow().control_points.len()
    }

    /// Kopie der Formparameter.
    pub fn params(&self) -> GeometryParams {
        self.geometry.borrow().params.clone()
    }

    /// Hoch-Achse am Ort der Form.
    pub fn up(&self) -> DVec3 {
        self.geometry.borrow().up
    }

    /// Lesezugriff auf die Geometrie.
    pub fn geometry(&self) -> Ref<'_, ShapeGeometry> {
        self.geometry.borrow()
    }

    /// Schreibzugriff auf die Geometrie.
    ///
    /// Nach Änderungen muss der Aufrufer [`Shape::refresh_render`] auslösen,
    /// damit Primitive-Formen neu aufgebaut werden.
    pub fn geometry_mut(&mut self) -> RefMut<'_, ShapeGeometry> {
        self.geometry.borrow_mut()
    }

    /// Ersetzt alle Kontrollpunkte und baut die Darstellung nach.
    pub fn set_control_points(&mut self, points: Vec<DVec3>) {
        self.geometry.borrow_mut().control_points = points;
        self.refresh_render();
    }

    /// Führt den Live-Update-Hook des Formtyps aus.
    pub fn sync_params(&mut self) {
        let sync = self.spec().sync_params;
        sync(&mut self.geometry.borrow_mut(), &self.attributes.config);
    }

    /// Darstellungspunkte aus dem aktuellen Geometriezustand.
    pub fn display_positions(&self) -> Vec<DVec3> {
        DisplayGeometry::derive(self.spec(), &self.geometry.borrow()).positions
    }

    /// Schwerpunkt der Darstellungspunkte.
    pub fn display_centroid(&self) -> Option<DVec3> {
        centroid(&self.display_positions())
    }

    /// Was der Renderer in diesem Frame zeichnen würde.
    pub fn render_geometry(&self) -> DisplayGeometry {
        match &self.render {
            RenderBinding::Retained(property) => property.value(),
            RenderBinding::Primitive(batch) => DisplayGeometry {
                positions: batch.positions.clone(),
                params: batch.params.clone(),
            },
        }
    }

    /// Render-Bindung (für Renderer-Adapter).
    pub fn render_binding(&self) -> &RenderBinding {
        &self.render
    }

    /// `true`, wenn die Darstellung pro Frame neu berechnet wird.
    pub fn is_render_live(&self) -> bool {
        matches!(&self.render, RenderBinding::Retained(p) if p.is_computed())
    }

    /// Bindet die Retained-Darstellung an eine pro Frame ausgewertete Closure.
    ///
    /// Für Primitive-Formen ohne Wirkung: diese werden bei jeder Änderung
    /// über [`Shape::refresh_render`] neu aufgebaut.
    pub fn bind_live_render(&mut self) {
        if let RenderBinding::Retained(property) = &mut self.render {
            if property.is_computed() {
                return;
            }
            let geometry = Rc::clone(&self.geometry);
            let spec = self.kind.spec();
            *property =
                Property::computed(move || DisplayGeometry::derive(spec, &geometry.borrow()));
        }
    }

    /// Reduziert die berechnete Darstellung auf statische Daten.
    pub fn freeze_render(&mut self) {
        if let RenderBinding::Retained(property) = &mut self.render {
            property.freeze();
            return;
        }
        self.refresh_render();
    }

    /// Baut die Darstellung nach einer Änderung nach.
    ///
    /// Retained + live: nichts zu tun. Retained + statisch: Wert neu setzen.
    /// Primitive: Batch komplett neu aufbauen.
    pub fn refresh_render(&mut self) {
        let spec = self.kind.spec();
        match &mut self.render {
            RenderBinding::Retained(property) => {
                if !property.is_computed() {
                    *property =
                        Property::Constant(DisplayGeometry::derive(spec, &self.geometry.borrow()));
                }
            }
            RenderBinding::Primitive(batch) => {
                let display = DisplayGeometry::derive(spec, &self.geometry.borrow());
                batch.positions = display.positions;
                batch.params = display.params;
                batch.revision += 1;
            }
        }
    }

    /// Wandelt eine Primitive-Form in ein Retained-Objekt um (für Vertex-Editing).
    pub fn convert_to_retained(&mut self) {
        if let RenderBinding::Primitive(_) = self.render {
            let display = DisplayGeometry::derive(self.spec(), &self.geometry.borrow());
            self.render = RenderBinding::Retained(Property::Constant(display));
            log::info!("Form {} in Retained-Darstellung umgewandelt", self.id);
        }
    }

    /// Serialisierbarer Zustand der Form.
    pub fn snapshot(&self) -> ShapeSnapshot {
        let geometry = self.geometry.borrow();
        ShapeSnapshot {
            id: self.id,
            kind: self.kind,
            representation: self.representation(),
            control_points: geometry.control_points.clone(),
            params: geometry.params.clone(),
            up: geometry.up,
            attributes: self.attributes.clone(),
            display_points: DisplayGeometry::derive(self.spec(), &geometry).positions,
        }
    }
}

/// Serialisierbarer Zustand einer Form (History, Replay-Ausgabe).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSnapshot {
    /// ID der Form
    pub id: ShapeId,
    /// Formtyp
    pub kind: ShapeKind,
    /// Darstellungsart
    #[serde(default)]
    pub representation: Representation,
    /// Kontrollpunkte
    pub control_points: Vec<DVec3>,
    /// Formparameter
    #[serde(default)]
    pub params: GeometryParams,
    /// Hoch-Achse
    pub up: DVec3,
    /// Stil und Konfiguration
    #[serde(default)]
    pub attributes: ShapeAttributes,
    /// Abgeleitete Darstellungspunkte (nur Ausgabe)
    #[serde(default)]
    pub display_points: Vec<DVec3>,
}
