//! EditRecipe-Trait: deklarative Dragger-Layouts je Formtyp.
//!
//! Ein Rezept legt beim Aktivieren (und bei jedem Neuaufbau) die Dragger
//! einer Form an und hängt die passenden Drag-Callbacks an. Die gemeinsame
//! Drag-Pipeline im `EditController` ruft diese Callbacks auf.

use super::recipes::{BoxRecipe, EllipseRecipe, EllipsoidRecipe, ModelRecipe, VertexRecipe};
use crate::core::{DraggerCollection, EditLayout, ShapeGeometry};
use glam::DVec3;

/// Tooltip eines normalen Kontrollpunkts.
pub const TOOLTIP_CONTROL: &str = "Ziehen verschiebt den Punkt";
/// Tooltip eines Mittelpunkt-Draggers.
pub const TOOLTIP_ADD_MID_POINT: &str = "Ziehen fügt einen neuen Punkt ein";
/// Tooltip des Verschiebe-Alles-Draggers.
pub const TOOLTIP_MOVE_ALL: &str = "Ziehen verschiebt die ganze Form";
/// Tooltip eines Höhen-Draggers.
pub const TOOLTIP_MOVE_HEIGHT: &str = "Ziehen ändert die Höhe";
/// Tooltip eines Radius-/Halbachsen-Draggers.
pub const TOOLTIP_RADIUS: &str = "Ziehen ändert den Radius";
/// Tooltip eines Maß-Draggers.
pub const TOOLTIP_DIMENSIONS: &str = "Ziehen ändert die Maße";

/// Mindestwert für Radien, Halbachsen und Maße.
pub const MIN_EXTENT: f64 = 1e-6;

/// Punktgrenzen der bearbeiteten Form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointLimits {
    /// Minimale Punktzahl
    pub min: usize,
    /// Maximale Punktzahl
    pub max: usize,
}

/// Schnittstelle aller Edit-Rezepte.
pub trait EditRecipe {
    /// Anzeigename für Logs
    fn name(&self) -> &str;

    /// Legt alle Dragger für den aktuellen Zustand an.
    ///
    /// `display` sind die abgeleiteten Darstellungspunkte. Fehlende oder
    /// ungültige Basisgeometrie ist ein Setup-Fehler.
    fn bind_draggers(
        &self,
        geometry: &ShapeGeometry,
        display: &[DVec3],
        limits: PointLimits,
        draggers: &mut DraggerCollection,
    ) -> anyhow::Result<()>;

    /// Schreibt beim Beenden der Session endgültige Parameterwerte fest.
    fn finish(&self, _geometry: &mut ShapeGeometry) {}
}

/// Liefert das Rezept für ein Dragger-Layout.
pub fn recipe_for(layout: EditLayout) -> Box<dyn EditRecipe> {
    match layout {
        EditLayout::Point => Box::new(VertexRecipe::point()),
        EditLayout::Model => Box::new(ModelRecipe),
        EditLayout::Polyline => Box::new(VertexRecipe::polyline()),
        EditLayout::Polygon => Box::new(VertexRecipe::polygon()),
        EditLayout::Water => Box::new(VertexRecipe::water()),
        EditLayout::VideoFusion => Box::new(VertexRecipe::corners("Videofläche")),
        EditLayout::Rectangle => Box::new(VertexRecipe::corners("Rechteck")),
        EditLayout::Circle => Box::new(EllipseRecipe::circle()),
        EditLayout::Ellipse => Box::new(EllipseRecipe::ellipse()),
        EditLayout::Cylinder => Box::new(EllipseRecipe::cylinder()),
        EditLayout::Box => Box::new(BoxRecipe),
        EditLayout::Ellipsoid => Box::new(EllipsoidRecipe),
    }
}

/// Verlangt mindestens `count` Kontrollpunkte.
pub(crate) fn require_points(
    geometry: &ShapeGeometry,
    count: usize,
    what: &str,
) -> anyhow::Result<()> {
    if geometry.control_points.len() < count {
        anyhow::bail!(
            "{}: {} Kontrollpunkte erforderlich, {} vorhanden",
            what,
            count,
            geometry.control_points.len()
        );
    }
    if geometry.control_points.iter().any(|p| !p.is_finite()) {
        anyhow::bail!("{}: ungültige Kontrollpunkte", what);
    }
    Ok(())
}
