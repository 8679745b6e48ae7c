//! Tabelle aller Formtypen: Punktgrenzen, Ableitung, Parameter-Sync, Edit-Layout.
//!
//! Draw- und Edit-Controller verzweigen nie auf einen konkreten Formtyp,
//! sondern lesen ausschließlich den zugehörigen [`ShapeSpec`].

use super::derivation::{
    self, box_footprint, cylinder_footprint, ellipse_boundary, ellipsoid_equator,
    horizontal_distance, identity, rectangle_corners, regular_polygon, sector_outline,
    smooth_curve, straight_arrow, DeriveFn, LocalFrame,
};
use super::shape::{ShapeConfig, ShapeGeometry};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use self::EditLayout as L;

/// Unbegrenzte Punktzahl.
pub const UNLIMITED_POINTS: usize = usize::MAX;
/// Standardbreite eines Korridors (Welteinheiten).
pub const DEFAULT_CORRIDOR_WIDTH: f64 = 10.0;
/// Standardhöhe von Wand und Extrusionskörpern (Welteinheiten).
pub const DEFAULT_EXTRUDED_HEIGHT: f64 = 20.0;
/// Verhältnis Neben- zu Hauptachse einer frisch gezeichneten Ellipse.
pub const ELLIPSE_MINOR_RATIO: f64 = 0.5;

/// Hook, der abgeleitete Parameter nach jeder Punktänderung nachzieht.
pub type SyncParamsFn = fn(&mut ShapeGeometry, &ShapeConfig);

/// Diskriminante aller unterstützten Formen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Einzelner Punkt
    Point,
    /// Platziertes 3D-Modell
    Model,
    /// Offene Linie
    Polyline,
    /// Geglättete Kurve durch die Kontrollpunkte
    Curve,
    /// Korridor mit Breite
    Corridor,
    /// Wand mit Höhe
    Wall,
    /// Extrudiertes Profil entlang einer Linie
    PolylineVolume,
    /// Geschlossenes Polygon
    Polygon,
    /// Rechteck aus zwei Ecken
    Rectangle,
    /// Kreis (Mittelpunkt + Randpunkt)
    Circle,
    /// Ellipse (Mittelpunkt + Hauptachsenpunkt)
    Ellipse,
    /// Zylinder
    Cylinder,
    /// Quader
    Box,
    /// Ellipsoid
    Ellipsoid,
    /// Gerader Pfeil
    Arrow,
    /// Kreissektor
    Sector,
    /// Regelmäßiges Polygon
    RegularPolygon,
    /// Wasserfläche
    Water,
    /// Video-Projektionsviereck
    VideoFusion,
}

/// Welches Dragger-Layout der Edit-Controller für eine Form aufbaut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditLayout {
    /// Ein einzelner Control-Dragger
    Point,
    /// Control + Höhen-Dragger
    Model,
    /// Vertices + Mittelpunkte + MoveAll, offen
    Polyline,
    /// Vertices + Mittelpunkte + MoveAll, geschlossen
    Polygon,
    /// Vertices + Mittelpunkte + Höhen-Dragger für die Wasseroberfläche
    Water,
    /// Vier feste Ecken + MoveAll
    VideoFusion,
    /// Zwei Ecken + MoveAll
    Rectangle,
    /// Mittelpunkt + Radius (+ Extrusionshöhe)
    Circle,
    /// Mittelpunkt + Haupt-/Nebenachse (+ Extrusionshöhe)
    Ellipse,
    /// Mittelpunkt + Radius + Länge
    Cylinder,
    /// Mittelpunkt + Ecke + Höhe
    Box,
    /// Mittelpunkt + drei Radien
    Ellipsoid,
}

/// Datensatz mit allen formspezifischen Regeln.
#[derive(Debug, Clone, Copy)]
pub struct ShapeSpec {
    /// Anzeigename für Logs und Tooltips
    pub name: &'static str,
    /// Minimale Anzahl Kontrollpunkte einer fertigen Form
    pub min_points: usize,
    /// Maximale Anzahl Kontrollpunkte ([`UNLIMITED_POINTS`] = unbegrenzt)
    pub max_points: usize,
    /// Ableitung Kontrollpunkte → Darstellungspunkte
    pub derive: DeriveFn,
    /// Live-Update-Hook während des Zeichnens und beim Abschluss
    pub sync_params: SyncParamsFn,
    /// Dragger-Layout im Bearbeitungsmodus
    pub edit_layout: EditLayout,
}

const fn spec(
    name: &'static str,
    min_points: usize,
    max_points: usize,
    derive: DeriveFn,
    sync_params: SyncParamsFn,
    edit_layout: EditLayout,
) -> ShapeSpec {
    ShapeSpec {
        name,
        min_points,
        max_points,
        derive,
        sync_params,
        edit_layout,
    }
}

static POINT: ShapeSpec = spec("Punkt", 1, 1, identity, no_sync, L::Point);
static MODEL: ShapeSpec = spec("Modell", 1, 1, identity, no_sync, L::Model);
static POLYLINE: ShapeSpec = spec("Linie", 2, UNLIMITED_POINTS, identity, no_sync, L::Polyline);
static CURVE: ShapeSpec = spec("Kurve", 2, UNLIMITED_POINTS, smooth_curve, no_sync, L::Polyline);
static CORRIDOR: ShapeSpec = spec("Korridor", 2, UNLIMITED_POINTS, identity, sync_corridor, L::Polyline);
static WALL: ShapeSpec = spec("Wand", 2, UNLIMITED_POINTS, identity, sync_extrusion, L::Polyline);
static POLYLINE_VOLUME: ShapeSpec = spec(
    "Linienvolumen",
    2,
    UNLIMITED_POINTS,
    identity,
    sync_corridor,
    L::Polyline,
);
static POLYGON: ShapeSpec = spec("Polygon", 3, UNLIMITED_POINTS, identity, sync_extrusion, L::Polygon);
static RECTANGLE: ShapeSpec = spec("Rechteck", 2, 2, rectangle_corners, sync_extrusion, L::Rectangle);
static CIRCLE: ShapeSpec = spec("Kreis", 2, 2, ellipse_boundary, sync_circle, L::Circle);
static ELLIPSE: ShapeSpec = spec("Ellipse", 2, 2, ellipse_boundary, sync_ellipse, L::Ellipse);
static CYLINDER: ShapeSpec = spec("Zylinder", 2, 2, cylinder_footprint, sync_cylinder, L::Cylinder);
static BOX: ShapeSpec = spec("Quader", 2, 2, box_footprint, sync_box, L::Box);
static ELLIPSOID: ShapeSpec = spec("Ellipsoid", 2, 2, ellipsoid_equator, sync_ellipsoid, L::Ellipsoid);
static ARROW: ShapeSpec = spec("Pfeil", 2, 2, straight_arrow, no_sync, L::Polygon);
static SECTOR: ShapeSpec = spec("Sektor", 3, 3, sector_outline, no_sync, L::Polygon);
static REGULAR_POLYGON: ShapeSpec = spec(
    "Regelmäßiges Polygon",
    2,
    2,
    regular_polygon,
    sync_regular_polygon,
    L::Polygon,
);
static WATER: ShapeSpec = spec("Wasser", 3, UNLIMITED_POINTS, identity, sync_water, L::Water);
static VIDEO_FUSION: ShapeSpec = spec("Videofläche", 4, 4, identity, no_sync, L::VideoFusion);

impl ShapeKind {
    /// Alle Formtypen in Deklarationsreihenfolge.
    pub const ALL: [ShapeKind; 19] = [
        ShapeKind::Point,
        ShapeKind::Model,
        ShapeKind::Polyline,
        ShapeKind::Curve,
        ShapeKind::Corridor,
        ShapeKind::Wall,
        ShapeKind::PolylineVolume,
        ShapeKind::Polygon,
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Ellipse,
        ShapeKind::Cylinder,
        ShapeKind::Box,
        ShapeKind::Ellipsoid,
        ShapeKind::Arrow,
        ShapeKind::Sector,
        ShapeKind::RegularPolygon,
        ShapeKind::Water,
        ShapeKind::VideoFusion,
    ];

    /// Liefert den Regel-Datensatz dieses Formtyps.
    pub fn spec(self) -> &'static ShapeSpec {
        match self {
            ShapeKind::Point => &POINT,
            ShapeKind::Model => &MODEL,
            ShapeKind::Polyline => &POLYLINE,
            ShapeKind::Curve => &CURVE,
            ShapeKind::Corridor => &CORRIDOR,
            ShapeKind::Wall => &WALL,
            ShapeKind::PolylineVolume => &POLYLINE_VOLUME,
            ShapeKind::Polygon => &POLYGON,
            ShapeKind::Rectangle => &RECTANGLE,
            ShapeKind::Circle => &CIRCLE,
            ShapeKind::Ellipse => &ELLIPSE,
            ShapeKind::Cylinder => &CYLINDER,
            ShapeKind::Box => &BOX,
            ShapeKind::Ellipsoid => &ELLIPSOID,
            ShapeKind::Arrow => &ARROW,
            ShapeKind::Sector => &SECTOR,
            ShapeKind::RegularPolygon => &REGULAR_POLYGON,
            ShapeKind::Water => &WATER,
            ShapeKind::VideoFusion => &VIDEO_FUSION,
        }
    }

    /// Gibt `true` zurück, wenn die Darstellung von den Kontrollpunkten abweicht.
    pub fn has_derived_geometry(self) -> bool {
        matches!(
            self,
            ShapeKind::Curve
                | ShapeKind::Rectangle
                | ShapeKind::Circle
                | ShapeKind::Ellipse
                | ShapeKind::Cylinder
                | ShapeKind::Box
                | ShapeKind::Ellipsoid
                | ShapeKind::Arrow
                | ShapeKind::Sector
                | ShapeKind::RegularPolygon
        )
    }
}

// ── Parameter-Sync ──────────────────────────────────────────────────

fn no_sync(_geometry: &mut ShapeGeometry, _config: &ShapeConfig) {}

fn sync_extrusion(geometry: &mut ShapeGeometry, config: &ShapeConfig) {
    if config.extruded && geometry.params.extruded_height.is_none() {
        geometry.params.extruded_height = Some(DEFAULT_EXTRUDED_HEIGHT);
    }
}

fn sync_corridor(geometry: &mut ShapeGeometry, config: &ShapeConfig) {
    if geometry.params.width.is_none() {
        geometry.params.width = Some(DEFAULT_CORRIDOR_WIDTH);
    }
    sync_extrusion(geometry, config);
}

/// Radius aus Mittelpunkt und Randpunkt.
fn edge_radius(geometry: &ShapeGeometry) -> Option<f64> {
    match geometry.control_points.as_slice() {
        [center, edge, ..] => Some(horizontal_distance(*center, *edge, geometry.up)),
        _ => None,
    }
}

/// Winkel des Randpunkts in der lokalen Ebene.
fn edge_angle(geometry: &ShapeGeometry) -> Option<f64> {
    match geometry.control_points.as_slice() {
        [center, edge, ..] => {
            let local = LocalFrame::new(*center, geometry.up).to_plane(*edge);
            Some(local.y.atan2(local.x))
        }
        _ => None,
    }
}

fn sync_circle(geometry: &mut ShapeGeometry, config: &ShapeConfig) {
    if let Some(r) = edge_radius(geometry) {
        geometry.params.semi_major_axis = Some(r);
        geometry.params.semi_minor_axis = Some(r);
        geometry.params.rotation = edge_angle(geometry);
    }
    sync_extrusion(geometry, config);
}

fn sync_ellipse(geometry: &mut ShapeGeometry, config: &ShapeConfig) {
    if let Some(r) = edge_radius(geometry) {
        geometry.params.semi_major_axis = Some(r);
        geometry.params.semi_minor_axis = Some(r * ELLIPSE_MINOR_RATIO);
        geometry.params.rotation = edge_angle(geometry);
    }
    sync_extrusion(geometry, config);
}

fn sync_cylinder(geometry: &mut ShapeGeometry, _config: &ShapeConfig) {
    if let Some(r) = edge_radius(geometry) {
        geometry.params.semi_major_axis = Some(r);
        geometry.params.semi_minor_axis = Some(r);
        geometry.params.rotation = edge_angle(geometry);
        if geometry.params.length.is_none() && r > 0.0 {
            geometry.params.length = Some(r * 2.0);
        }
    }
}

fn sync_box(geometry: &mut ShapeGeometry, _config: &ShapeConfig) {
    if let [center, corner, ..] = geometry.control_points.as_slice() {
        let local = LocalFrame::new(*center, geometry.up).to_plane(*corner);
        let height = geometry
            .params
            .dimensions
            .map(|d| d.z)
            .unwrap_or(DEFAULT_EXTRUDED_HEIGHT);
        geometry.params.dimensions = Some(DVec3::new(
            local.x.abs() * 2.0,
            local.y.abs() * 2.0,
            height,
        ));
    }
}

fn sync_ellipsoid(geometry: &mut ShapeGeometry, _config: &ShapeConfig) {
    if let Some(r) = edge_radius(geometry) {
        let vertical = geometry.params.radii.map(|v| v.z).unwrap_or(r);
        geometry.params.radii = Some(DVec3::new(r, r, vertical));
    }
}

fn sync_regular_polygon(geometry: &mut ShapeGeometry, config: &ShapeConfig) {
    geometry.params.sides = config
        .sides
        .or(geometry.params.sides)
        .or(Some(derivation::REGULAR_POLYGON_DEFAULT_SIDES));
}

fn sync_water(geometry: &mut ShapeGeometry, _config: &ShapeConfig) {
    if geometry.params.height.is_none() {
        let up = geometry.up;
        geometry.params.height = geometry
            .control_points
            .iter()
            .map(|p| p.dot(up))
            .reduce(f64::max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn geometry(points: &[DVec3]) -> ShapeGeometry {
        ShapeGeometry::new(points.to_vec(), DVec3::Z)
    }

    #[test]
    fn test_punktgrenzen_je_formtyp() {
        assert_eq!(ShapeKind::Point.spec().max_points, 1);
        assert_eq!(ShapeKind::Polygon.spec().min_points, 3);
        assert_eq!(ShapeKind::Polyline.spec().max_points, UNLIMITED_POINTS);
        assert_eq!(ShapeKind::Circle.spec().max_points, 2);
        assert_eq!(ShapeKind::Sector.spec().min_points, 3);
        assert_eq!(ShapeKind::VideoFusion.spec().min_points, 4);
        for kind in ShapeKind::ALL {
            let spec = kind.spec();
            assert!(spec.min_points >= 1, "{:?}", kind);
            assert!(spec.min_points <= spec.max_points, "{:?}", kind);
        }
    }

    #[test]
    fn test_abgeleitete_geometrie_nur_fuer_parametrische_formen() {
        assert!(!ShapeKind::Polygon.has_derived_geometry());
        assert!(!ShapeKind::Polyline.has_derived_geometry());
        assert!(ShapeKind::Circle.has_derived_geometry());
        assert!(ShapeKind::Arrow.has_derived_geometry());
        assert!(ShapeKind::Curve.has_derived_geometry());
    }

    #[test]
    fn test_sync_circle_setzt_radius() {
        let mut g = geometry(&[DVec3::ZERO, DVec3::new(0.0, 100.0, 7.0)]);
        sync_circle(&mut g, &ShapeConfig::default());
        assert_relative_eq!(g.params.semi_major_axis.unwrap_or_default(), 100.0);
        assert_relative_eq!(g.params.semi_minor_axis.unwrap_or_default(), 100.0);
    }

    #[test]
    fn test_sync_box_behaelt_hoehe() {
        let mut g = geometry(&[DVec3::ZERO, DVec3::new(5.0, -3.0, 0.0)]);
        g.params.dimensions = Some(DVec3::new(1.0, 1.0, 42.0));
        sync_box(&mut g, &ShapeConfig::default());
        let dims = g.params.dimensions.unwrap_or_default();
        assert_relative_eq!(dims.x, 10.0);
        assert_relative_eq!(dims.y, 6.0);
        assert_relative_eq!(dims.z, 42.0);
    }

    #[test]
    fn test_sync_regular_polygon_bevorzugt_konfiguration() {
        let mut g = geometry(&[DVec3::ZERO, DVec3::X]);
        let config = ShapeConfig {
            sides: Some(8),
            ..ShapeConfig::default()
        };
        sync_regular_polygon(&mut g, &config);
        assert_eq!(g.params.sides, Some(8));
    }

    #[test]
    fn test_sync_water_nimmt_hoechsten_punkt() {
        let mut g = geometry(&[
            DVec3::new(0.0, 0.0, 2.0),
            DVec3::new(1.0, 0.0, 5.0),
            DVec3::new(0.0, 1.0, 3.0),
        ]);
        sync_water(&mut g, &ShapeConfig::default());
        assert_eq!(g.params.height, Some(5.0));
    }
}
