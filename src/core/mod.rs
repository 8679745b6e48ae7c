//! Core-Domänentypen: Formen, Formtypen, Ableitungen, Dragger, Properties.

/// Geordnete Formsammlung
pub mod collection;
/// Reine Ableitungsfunktionen Kontrollpunkte → Darstellungspunkte
pub mod derivation;
/// Dragger-Primitive und Fabrik
pub mod dragger;
/// Lifecycle-Benachrichtigungen
pub mod notification;
/// Pro Frame berechnete Werte
pub mod property;
/// Form-Datenmodell
pub mod shape;
/// Formtyp-Tabelle
pub mod shape_kind;

pub use collection::ShapeCollection;
pub use derivation::{centroid, horizontal_distance, midpoint, DeriveFn, LocalFrame};
pub use dragger::{
    create_dragger, DragContext, DragHandler, Dragger, DraggerCollection, DraggerId,
    DraggerOptions, DraggerPalette, DraggerStyle, DraggerType,
};
pub use notification::PlotEvent;
pub use property::Property;
pub use shape::{
    DisplayGeometry, GeometryParams, PrimitiveBatch, RenderBinding, Representation, Shape,
    ShapeAttributes, ShapeConfig, ShapeGeometry, ShapeId, ShapeSnapshot, SharedGeometry,
    StyleMap,
};
pub use shape_kind::{EditLayout, ShapeKind, ShapeSpec, UNLIMITED_POINTS};
