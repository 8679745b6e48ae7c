//! Rezept für Kreis, Ellipse und Zylinder: Mittelpunkt, Achsen, Höhe.

use super::{center_of, drag_center, handler};
use crate::app::edit::recipe::{
    require_points, EditRecipe, PointLimits, MIN_EXTENT, TOOLTIP_CONTROL, TOOLTIP_MOVE_HEIGHT,
    TOOLTIP_RADIUS,
};
use crate::core::{
    create_dragger, DragContext, DraggerCollection, DraggerOptions, DraggerType, LocalFrame,
    ShapeGeometry,
};
use glam::DVec3;

/// Welcher Parameter am Höhen-Dragger hängt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeightParam {
    /// `extruded_height`, nur wenn die Form extrudiert ist
    Extrusion,
    /// `length` des Zylinders
    Length,
}

/// Dragger-Layout für Formen mit Mittelpunkt und Halbachsen.
#[derive(Debug, Clone)]
pub struct EllipseRecipe {
    name: &'static str,
    circle: bool,
    height: HeightParam,
}

impl EllipseRecipe {
    /// Kreis: eine gemeinsame Halbachse.
    pub fn circle() -> Self {
        Self {
            name: "Kreis",
            circle: true,
            height: HeightParam::Extrusion,
        }
    }

    /// Ellipse: getrennte Haupt- und Nebenachse.
    pub fn ellipse() -> Self {
        Self {
            name: "Ellipse",
            circle: false,
            height: HeightParam::Extrusion,
        }
    }

    /// Zylinder: Radius und Länge.
    pub fn cylinder() -> Self {
        Self {
            name: "Zylinder",
            circle: true,
            height: HeightParam::Length,
        }
    }
}

/// Einheitsvektoren der Haupt- und Nebenachse für eine Drehung.
fn axes(frame: &LocalFrame, rotation: f64) -> (DVec3, DVec3) {
    let (sin, cos) = rotation.sin_cos();
    let major = frame.east * cos + frame.north * sin;
    let minor = frame.north * cos - frame.east * sin;
    (major, minor)
}

fn height_value(geometry: &ShapeGeometry, param: HeightParam) -> Option<f64> {
    match param {
        HeightParam::Extrusion => geometry.params.extruded_height,
        HeightParam::Length => geometry.params.length,
    }
}

impl EditRecipe for EllipseRecipe {
    fn name(&self) -> &str {
        self.name
    }

    fn bind_draggers(
        &self,
        geometry: &ShapeGeometry,
        _display: &[DVec3],
        _limits: PointLimits,
        draggers: &mut DraggerCollection,
    ) -> anyhow::Result<()> {
        require_points(geometry, 2, self.name)?;
        let center = geometry.control_points[0];
        let frame = LocalFrame::new(center, geometry.up);
        let edge = frame.to_plane(geometry.control_points[1]);
        let a = geometry.params.semi_major_axis.unwrap_or(edge.length());
        if a <= MIN_EXTENT {
            anyhow::bail!("{}: Radius ist 0", self.name);
        }
        let b = if self.circle {
            a
        } else {
            geometry.params.semi_minor_axis.unwrap_or(a)
        };
        let rotation = geometry
            .params
            .rotation
            .unwrap_or_else(|| edge.y.atan2(edge.x));
        let (major_dir, minor_dir) = axes(&frame, rotation);
        let height = height_value(geometry, self.height);

        // Slots vorab vergeben, damit der Mittelpunkt seine Anfasser kennt
        let base = draggers.len();
        let major_slot = base + 1;
        let minor_slot = (!self.circle).then_some(base + 2);
        let height_slot = height.map(|_| base + 2 + usize::from(!self.circle));
        let linked: Vec<usize> = std::iter::once(major_slot)
            .chain(minor_slot)
            .chain(height_slot)
            .collect();

        create_dragger(
            draggers,
            DraggerOptions::new(DraggerType::Control, center)
                .index(0)
                .tooltip(TOOLTIP_CONTROL)
                .linked(linked)
                .on_drag(handler(drag_center)),
        );

        let circle = self.circle;
        create_dragger(
            draggers,
            DraggerOptions::new(DraggerType::EditAttribute, center + major_dir * a)
                .index(1)
                .tooltip(TOOLTIP_RADIUS)
                .linked(minor_slot.into_iter().collect())
                .on_drag(handler(move |ctx, slot, position| {
                    drag_major(ctx, slot, position, circle)
                })),
        );

        if minor_slot.is_some() {
            create_dragger(
                draggers,
                DraggerOptions::new(DraggerType::EditAttribute, center + minor_dir * b)
                    .index(2)
                    .tooltip(TOOLTIP_RADIUS)
                    .on_drag(handler(drag_minor)),
            );
        }

        if let Some(h) = height {
            let param = self.height;
            create_dragger(
                draggers,
                DraggerOptions::new(DraggerType::MoveHeight, center + geometry.up * h)
                    .index(0)
                    .tooltip(TOOLTIP_MOVE_HEIGHT)
                    .on_drag(handler(move |ctx, slot, position| {
                        drag_height(ctx, slot, position, param)
                    })),
            );
        }
        Ok(())
    }

    fn finish(&self, geometry: &mut ShapeGeometry) {
        if self.circle {
            geometry.params.semi_minor_axis = geometry.params.semi_major_axis;
        }
    }
}

/// Hauptachse: Länge und Drehung aus der Dragger-Position.
fn drag_major(
    ctx: &mut DragContext<'_>,
    slot: usize,
    position: DVec3,
    circle: bool,
) -> anyhow::Result<()> {
    let center = center_of(ctx)?;
    if ctx.geometry.control_points.len() < 2 {
        anyhow::bail!("Randpunkt fehlt");
    }
    let frame = LocalFrame::new(center, ctx.geometry.up);
    let local = frame.to_plane(position);
    let a = local.length();
    if a <= MIN_EXTENT {
        anyhow::bail!("Radius muss größer als 0 sein");
    }
    let rotation = local.y.atan2(local.x);
    let params = &mut ctx.geometry.params;
    params.semi_major_axis = Some(a);
    if circle {
        params.semi_minor_axis = Some(a);
    }
    params.rotation = Some(rotation);

    let edge = frame.to_world(local.x, local.y, 0.0);
    ctx.geometry.control_points[1] = edge;
    ctx.place(slot, edge)?;

    let (_, minor_dir) = axes(&frame, rotation);
    let b = ctx.geometry.params.semi_minor_axis.unwrap_or(a);
    let linked = ctx.dragger(slot)?.linked.clone();
    for minor in linked {
        ctx.place(minor, center + minor_dir * b)?;
    }
    Ok(())
}

/// Nebenachse: Abstand senkrecht zur Hauptachse.
fn drag_minor(ctx: &mut DragContext<'_>, slot: usize, position: DVec3) -> anyhow::Result<()> {
    let center = center_of(ctx)?;
    let frame = LocalFrame::new(center, ctx.geometry.up);
    let rotation = ctx.geometry.params.rotation.unwrap_or(0.0);
    let (_, minor_dir) = axes(&frame, rotation);
    let b = (position - center).dot(minor_dir).abs();
    if b <= MIN_EXTENT {
        anyhow::bail!("Halbachse muss größer als 0 sein");
    }
    ctx.geometry.params.semi_minor_axis = Some(b);
    ctx.place(slot, center + minor_dir * b)
}

/// Höhe (Extrusion oder Zylinderlänge) entlang der Hoch-Achse.
fn drag_height(
    ctx: &mut DragContext<'_>,
    slot: usize,
    position: DVec3,
    param: HeightParam,
) -> anyhow::Result<()> {
    let center = center_of(ctx)?;
    let up = ctx.geometry.up;
    let h = (position - center).dot(up).max(0.0);
    match param {
        HeightParam::Extrusion => ctx.geometry.params.extruded_height = Some(h),
        HeightParam::Length => ctx.geometry.params.length = Some(h),
    }
    ctx.place(slot, center + up * h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::derivation;
    use approx::assert_relative_eq;

    fn draggers() -> DraggerCollection {
        DraggerCollection::new(crate::shared::EditorOptions::default().dragger_palette())
    }

    fn limits() -> PointLimits {
        PointLimits { min: 2, max: 2 }
    }

    fn circle_geometry(radius: f64) -> ShapeGeometry {
        let mut geometry =
            ShapeGeometry::new(vec![DVec3::ZERO, DVec3::new(radius, 0.0, 0.0)], DVec3::Z);
        geometry.params.semi_major_axis = Some(radius);
        geometry.params.semi_minor_axis = Some(radius);
        geometry
    }

    #[test]
    fn test_kreis_layout_ohne_extrusion() {
        let geometry = circle_geometry(100.0);
        let mut collection = draggers();
        EllipseRecipe::circle()
            .bind_draggers(&geometry, &[], limits(), &mut collection)
            .expect("Setup");
        assert_eq!(collection.len(), 2);
        let center = collection.get(0).expect("Mittelpunkt");
        assert_eq!(center.linked, vec![1]);
        assert_relative_eq!(collection.get(1).expect("Radius").position.x, 100.0);
    }

    #[test]
    fn test_kreis_radius_drag() {
        let mut geometry = circle_geometry(100.0);
        let mut collection = draggers();
        EllipseRecipe::circle()
            .bind_draggers(&geometry, &[], limits(), &mut collection)
            .expect("Setup");
        let mut ctx = DragContext::new(
            &mut geometry,
            &mut collection,
            2,
            2,
            derivation::ellipse_boundary,
            DVec3::new(100.0, 0.0, 0.0),
        );
        drag_major(&mut ctx, 1, DVec3::new(0.0, 150.0, 3.0), true).expect("Drag");

        assert_eq!(geometry.params.semi_major_axis, Some(150.0));
        assert_eq!(geometry.params.semi_minor_axis, Some(150.0));
        assert_relative_eq!(geometry.control_points[1].y, 150.0);
        assert_relative_eq!(geometry.control_points[1].z, 0.0);
    }

    #[test]
    fn test_ellipse_nebenachse_folgt_drehung() {
        let mut geometry = circle_geometry(100.0);
        geometry.params.semi_minor_axis = Some(50.0);
        let mut collection = draggers();
        EllipseRecipe::ellipse()
            .bind_draggers(&geometry, &[], limits(), &mut collection)
            .expect("Setup");
        assert_eq!(collection.len(), 3);

        let mut ctx = DragContext::new(
            &mut geometry,
            &mut collection,
            2,
            2,
            derivation::ellipse_boundary,
            DVec3::new(100.0, 0.0, 0.0),
        );
        drag_major(&mut ctx, 1, DVec3::new(0.0, 80.0, 0.0), false).expect("Drag");
        let minor = ctx.dragger(2).expect("Nebenachse").position;
        assert_relative_eq!(minor.x, -50.0, epsilon = 1e-9);
        assert_relative_eq!(minor.y, 0.0, epsilon = 1e-9);

        drag_minor(&mut ctx, 2, DVec3::new(-30.0, 10.0, 0.0)).expect("Drag");
        assert_eq!(geometry.params.semi_minor_axis, Some(30.0));
        assert_eq!(geometry.params.semi_major_axis, Some(80.0));
    }

    #[test]
    fn test_radius_null_wird_abgelehnt() {
        let mut geometry = circle_geometry(10.0);
        let mut collection = draggers();
        EllipseRecipe::circle()
            .bind_draggers(&geometry, &[], limits(), &mut collection)
            .expect("Setup");
        let mut ctx = DragContext::new(
            &mut geometry,
            &mut collection,
            2,
            2,
            derivation::ellipse_boundary,
            DVec3::ZERO,
        );
        assert!(drag_major(&mut ctx, 1, DVec3::new(0.0, 0.0, 5.0), true).is_err());
    }

    #[test]
    fn test_zylinder_laenge_nicht_negativ() {
        let mut geometry = circle_geometry(10.0);
        geometry.params.length = Some(20.0);
        let mut collection = draggers();
        EllipseRecipe::cylinder()
            .bind_draggers(&geometry, &[], limits(), &mut collection)
            .expect("Setup");
        let slot = collection
            .iter()
            .position(|d| d.kind == DraggerType::MoveHeight)
            .expect("Längen-Dragger");
        let mut ctx = DragContext::new(
            &mut geometry,
            &mut collection,
            2,
            2,
            derivation::cylinder_footprint,
            DVec3::new(0.0, 0.0, 20.0),
        );
        drag_height(&mut ctx, slot, DVec3::new(0.0, 0.0, -5.0), HeightParam::Length)
            .expect("Drag");
        assert_eq!(geometry.params.length, Some(0.0));
    }

    #[test]
    fn test_finish_gleicht_kreisachsen_an() {
        let mut geometry = circle_geometry(10.0);
        geometry.params.semi_minor_axis = Some(3.0);
        EllipseRecipe::circle().finish(&mut geometry);
        assert_eq!(geometry.params.semi_minor_axis, Some(10.0));
    }
}
