//! Reine Ableitungsfunktionen: Kontrollpunkte → Darstellungspunkte.
//!
//! Alle Funktionen arbeiten in der lokalen Horizontalebene, die durch die
//! Hoch-Achse der Szene aufgespannt wird. Reichen die Kontrollpunkte für eine
//! Form noch nicht aus (z.B. während des Zeichnens), werden sie unverändert
//! zurückgegeben.

use super::shape::GeometryParams;
use crate::shared::spline_geometry::catmull_rom_chain;
use glam::{DVec2, DVec3};
use std::f64::consts::TAU;

/// Stützpunkte für Kreis-/Ellipsen-Ränder.
pub const ELLIPSE_SAMPLES: usize = 64;
/// Zwischenpunkte pro Catmull-Rom-Segment bei geglätteten Kurven.
pub const CURVE_SAMPLES_PER_SEGMENT: usize = 16;
/// Stützpunkte für den Kreisbogen eines Sektors.
pub const SECTOR_ARC_SAMPLES: usize = 32;
/// Eckenzahl eines regelmäßigen Polygons ohne explizite Konfiguration.
pub const REGULAR_POLYGON_DEFAULT_SIDES: u32 = 6;

/// Signatur aller Ableitungsfunktionen: (Kontrollpunkte, Parameter, Hoch-Achse).
pub type DeriveFn = fn(&[DVec3], &GeometryParams, DVec3) -> Vec<DVec3>;

/// Lokales Koordinatensystem (Ost/Nord/Hoch) an einem Ursprung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    /// Ursprung in Weltkoordinaten
    pub origin: DVec3,
    /// Lokale Ost-Achse
    pub east: DVec3,
    /// Lokale Nord-Achse
    pub north: DVec3,
    /// Lokale Hoch-Achse
    pub up: DVec3,
}

impl LocalFrame {
    /// Baut einen orthonormalen Rahmen aus Ursprung und Hoch-Achse.
    pub fn new(origin: DVec3, up: DVec3) -> Self {
        let up = up.try_normalize().unwrap_or(DVec3::Z);
        let reference = if up.z.abs() < 0.9 { DVec3::Z } else { DVec3::X };
        let north = up.cross(reference).normalize();
        let east = north.cross(up);
        Self {
            origin,
            east,
            north,
            up,
        }
    }

    /// Projiziert einen Weltpunkt in die lokale Horizontalebene.
    pub fn to_plane(&self, point: DVec3) -> DVec2 {
        let d = point - self.origin;
        DVec2::new(d.dot(self.east), d.dot(self.north))
    }

    /// Höhe eines Weltpunkts über dem Ursprung.
    pub fn elevation(&self, point: DVec3) -> f64 {
        (point - self.origin).dot(self.up)
    }

    /// Weltpunkt aus lokalen Koordinaten.
    pub fn to_world(&self, x: f64, y: f64, z: f64) -> DVec3 {
        self.origin + self.east * x + self.north * y + self.up * z
    }
}

/// Horizontaler Abstand zweier Punkte bezüglich der Hoch-Achse.
pub fn horizontal_distance(a: DVec3, b: DVec3, up: DVec3) -> f64 {
    LocalFrame::new(a, up).to_plane(b).length()
}

/// Arithmetischer Mittelpunkt zweier Punkte.
pub fn midpoint(a: DVec3, b: DVec3) -> DVec3 {
    (a + b) * 0.5
}

/// Schwerpunkt einer Punktliste (Mittelwert); `None` bei leerer Liste.
pub fn centroid(points: &[DVec3]) -> Option<DVec3> {
    if points.is_empty() {
        return None;
    }
    let sum: DVec3 = points.iter().copied().sum();
    Some(sum / points.len() as f64)
}

/// Identität: Darstellung entspricht den Kontrollpunkten.
pub fn identity(points: &[DVec3], _params: &GeometryParams, _up: DVec3) -> Vec<DVec3> {
    points.to_vec()
}

/// Ellipsen-/Kreisrand um `points[0]`.
///
/// Halbachsen aus `semi_major_axis`/`semi_minor_axis`, ersatzweise aus dem
/// Abstand zum zweiten Kontrollpunkt.
pub fn ellipse_boundary(points: &[DVec3], params: &GeometryParams, up: DVec3) -> Vec<DVec3> {
    let Some(&center) = points.first() else {
        return Vec::new();
    };
    let fallback = points
        .get(1)
        .map(|p| horizontal_distance(center, *p, up))
        .unwrap_or(0.0);
    let a = params.semi_major_axis.unwrap_or(fallback);
    let b = params.semi_minor_axis.unwrap_or(a);
    if a <= f64::EPSILON {
        return points.to_vec();
    }
    let rotation = params.rotation.unwrap_or(0.0);
    sample_ellipse(LocalFrame::new(center, up), a, b, rotation)
}

/// Rand des Zylinders (Grundkreis, Radius aus `semi_major_axis`).
pub fn cylinder_footprint(points: &[DVec3], params: &GeometryParams, up: DVec3) -> Vec<DVec3> {
    ellipse_boundary(points, params, up)
}

/// Äquator eines Ellipsoids aus `radii.x`/`radii.y`.
pub fn ellipsoid_equator(points: &[DVec3], params: &GeometryParams, up: DVec3) -> Vec<DVec3> {
    let Some(&center) = points.first() else {
        return Vec::new();
    };
    let Some(radii) = params.radii else {
        return points.to_vec();
    };
    if radii.x <= f64::EPSILON || radii.y <= f64::EPSILON {
        return points.to_vec();
    }
    sample_ellipse(LocalFrame::new(center, up), radii.x, radii.y, 0.0)
}

fn sample_ellipse(frame: LocalFrame, a: f64, b: f64, rotation: f64) -> Vec<DVec3> {
    let (sin_r, cos_r) = rotation.sin_cos();
    (0..ELLIPSE_SAMPLES)
        .map(|i| {
            let t = TAU * i as f64 / ELLIPSE_SAMPLES as f64;
            let (x, y) = (a * t.cos(), b * t.sin());
            frame.to_world(x * cos_r - y * sin_r, x * sin_r + y * cos_r, 0.0)
        })
        .collect()
}

/// Rechteck aus zwei gegenüberliegenden Ecken (Höhe der ersten Ecke).
pub fn rectangle_corners(points: &[DVec3], _params: &GeometryParams, up: DVec3) -> Vec<DVec3> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let frame = LocalFrame::new(points[0], up);
    let far = frame.to_plane(points[1]);
    vec![
        frame.to_world(0.0, 0.0, 0.0),
        frame.to_world(far.x, 0.0, 0.0),
        frame.to_world(far.x, far.y, 0.0),
        frame.to_world(0.0, far.y, 0.0),
    ]
}

/// Grundfläche eines Quaders um `points[0]` mit `dimensions.x/y`.
pub fn box_footprint(points: &[DVec3], params: &GeometryParams, up: DVec3) -> Vec<DVec3> {
    let Some(&center) = points.first() else {
        return Vec::new();
    };
    let Some(dims) = params.dimensions else {
        return points.to_vec();
    };
    let frame = LocalFrame::new(center, up);
    let (hx, hy) = (dims.x * 0.5, dims.y * 0.5);
    vec![
        frame.to_world(-hx, -hy, 0.0),
        frame.to_world(hx, -hy, 0.0),
        frame.to_world(hx, hy, 0.0),
        frame.to_world(-hx, hy, 0.0),
    ]
}

/// Gerader Pfeil von `points[0]` (Schaftende) nach `points[1]` (Spitze).
///
/// Schaftbreite 10 %, Kopfbreite 30 %, Kopflänge 30 % der Pfeillänge.
pub fn straight_arrow(points: &[DVec3], _params: &GeometryParams, up: DVec3) -> Vec<DVec3> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let frame = LocalFrame::new(points[0], up);
    let tip = frame.to_plane(points[1]);
    let length = tip.length();
    if length <= f64::EPSILON {
        return points.to_vec();
    }
    let dir = tip / length;
    let side = DVec2::new(-dir.y, dir.x);
    let shaft = length * 0.05;
    let head = length * 0.15;
    let neck = tip - dir * (length * 0.3);

    let outline = [
        side * shaft,
        neck + side * shaft,
        neck + side * head,
        tip,
        neck - side * head,
        neck - side * shaft,
        -side * shaft,
    ];
    outline
        .iter()
        .map(|p| frame.to_world(p.x, p.y, 0.0))
        .collect()
}

/// Kreissektor: Mittelpunkt, Radiuspunkt (Startwinkel), Endwinkel-Punkt.
///
/// Der Bogen läuft gegen den Uhrzeigersinn vom Start- zum Endwinkel.
pub fn sector_outline(points: &[DVec3], _params: &GeometryParams, up: DVec3) -> Vec<DVec3> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let frame = LocalFrame::new(points[0], up);
    let start = frame.to_plane(points[1]);
    let end = frame.to_plane(points[2]);
    let radius = start.length();
    if radius <= f64::EPSILON {
        return points.to_vec();
    }
    let a0 = start.y.atan2(start.x);
    let mut sweep = end.y.atan2(end.x) - a0;
    if sweep <= 0.0 {
        sweep += TAU;
    }

    let mut outline = Vec::with_capacity(SECTOR_ARC_SAMPLES + 2);
    outline.push(frame.origin);
    for i in 0..=SECTOR_ARC_SAMPLES {
        let a = a0 + sweep * i as f64 / SECTOR_ARC_SAMPLES as f64;
        outline.push(frame.to_world(radius * a.cos(), radius * a.sin(), 0.0));
    }
    outline
}

/// Regelmäßiges Polygon aus Mittelpunkt und erster Ecke.
pub fn regular_polygon(points: &[DVec3], params: &GeometryParams, up: DVec3) -> Vec<DVec3> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let sides = params.sides.unwrap_or(REGULAR_POLYGON_DEFAULT_SIDES).max(3);
    let frame = LocalFrame::new(points[0], up);
    let first = frame.to_plane(points[1]);
    let radius = first.length();
    if radius <= f64::EPSILON {
        return points.to_vec();
    }
    let a0 = first.y.atan2(first.x);
    (0..sides)
        .map(|i| {
            let a = a0 + TAU * i as f64 / sides as f64;
            frame.to_world(radius * a.cos(), radius * a.sin(), 0.0)
        })
        .collect()
}

/// Geglättete Kurve (Catmull-Rom) durch alle Kontrollpunkte.
pub fn smooth_curve(points: &[DVec3], _params: &GeometryParams, _up: DVec3) -> Vec<DVec3> {
    catmull_rom_chain(points, CURVE_SAMPLES_PER_SEGMENT)
}
