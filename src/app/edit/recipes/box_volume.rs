//! Rezept für Quader: Mittelpunkt, Ecke (Grundmaße) und Höhe.

use super::{center_of, drag_center, handler};
use crate::app::edit::recipe::{
    require_points, EditRecipe, PointLimits, MIN_EXTENT, TOOLTIP_CONTROL, TOOLTIP_DIMENSIONS,
    TOOLTIP_MOVE_HEIGHT,
};
use crate::core::shape_kind::DEFAULT_EXTRUDED_HEIGHT;
use crate::core::{
    create_dragger, DragContext, DraggerCollection, DraggerOptions, DraggerType, LocalFrame,
    ShapeGeometry,
};
use glam::DVec3;

/// Dragger-Layout für Quader.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxRecipe;

/// Maße aus Parametern, ersatzweise aus Mittelpunkt und Eckpunkt.
fn dimensions(geometry: &ShapeGeometry, frame: &LocalFrame) -> DVec3 {
    geometry.params.dimensions.unwrap_or_else(|| {
        let corner = frame.to_plane(geometry.control_points[1]);
        DVec3::new(
            corner.x.abs() * 2.0,
            corner.y.abs() * 2.0,
            DEFAULT_EXTRUDED_HEIGHT,
        )
    })
}

impl EditRecipe for BoxRecipe {
    fn name(&self) -> &str {
        "Quader"
    }

    fn bind_draggers(
        &self,
        geometry: &ShapeGeometry,
        _display: &[DVec3],
        _limits: PointLimits,
        draggers: &mut DraggerCollection,
    ) -> anyhow::Result<()> {
        require_points(geometry, 2, self.name())?;
        let center = geometry.control_points[0];
        let frame = LocalFrame::new(center, geometry.up);
        let dims = dimensions(geometry, &frame);
        let corner = frame.to_plane(geometry.control_points[1]);
        let sx = if corner.x < 0.0 { -1.0 } else { 1.0 };
        let sy = if corner.y < 0.0 { -1.0 } else { 1.0 };

        let base = draggers.len();
        create_dragger(
            draggers,
            DraggerOptions::new(DraggerType::Control, center)
                .index(0)
                .tooltip(TOOLTIP_CONTROL)
                .linked(vec![base + 1, base + 2])
                .on_drag(handler(drag_center)),
        );
        create_dragger(
            draggers,
            DraggerOptions::new(
                DraggerType::EditAttribute,
                frame.to_world(sx * dims.x * 0.5, sy * dims.y * 0.5, 0.0),
            )
            .index(1)
            .tooltip(TOOLTIP_DIMENSIONS)
            .on_drag(handler(drag_corner)),
        );
        create_dragger(
            draggers,
            DraggerOptions::new(DraggerType::MoveHeight, center + geometry.up * dims.z)
                .index(0)
                .tooltip(TOOLTIP_MOVE_HEIGHT)
                .on_drag(handler(drag_box_height)),
        );
        Ok(())
    }
}

/// Ecke: Breite und Tiefe aus dem doppelten lokalen Abstand.
fn drag_corner(ctx: &mut DragContext<'_>, slot: usize, position: DVec3) -> anyhow::Result<()> {
    let center = center_of(ctx)?;
    if ctx.geometry.control_points.len() < 2 {
        anyhow::bail!("Eckpunkt fehlt");
    }
    let frame = LocalFrame::new(center, ctx.geometry.up);
    let local = frame.to_plane(position);
    let (x, y) = (local.x.abs() * 2.0, local.y.abs() * 2.0);
    if x <= MIN_EXTENT || y <= MIN_EXTENT {
        anyhow::bail!("Quadermaße müssen größer als 0 sein");
    }
    let height = dimensions(&*ctx.geometry, &frame).z;
    ctx.geometry.params.dimensions = Some(DVec3::new(x, y, height));
    let corner = frame.to_world(local.x, local.y, 0.0);
    ctx.geometry.control_points[1] = corner;
    ctx.place(slot, corner)
}

/// Höhe des Quaders entlang der Hoch-Achse.
fn drag_box_height(ctx: &mut DragContext<'_>, slot: usize, position: DVec3) -> anyhow::Result<()> {
    let center = center_of(ctx)?;
    if ctx.geometry.control_points.len() < 2 {
        anyhow::bail!("Eckpunkt fehlt");
    }
    let up = ctx.geometry.up;
    let frame = LocalFrame::new(center, up);
    let mut dims = dimensions(&*ctx.geometry, &frame);
    dims.z = (position - center).dot(up).max(0.0);
    ctx.geometry.params.dimensions = Some(dims);
    ctx.place(slot, center + up * dims.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::derivation;
    use approx::assert_relative_eq;

    fn setup() -> (ShapeGeometry, DraggerCollection) {
        let geometry = ShapeGeometry::new(
            vec![DVec3::ZERO, DVec3::new(10.0, 5.0, 0.0)],
            DVec3::Z,
        );
        let mut draggers =
            DraggerCollection::new(crate::shared::EditorOptions::default().dragger_palette());
        BoxRecipe
            .bind_draggers(&geometry, &[], PointLimits { min: 2, max: 2 }, &mut draggers)
            .expect("Setup");
        (geometry, draggers)
    }

    #[test]
    fn test_layout_ohne_parameter_aus_eckpunkt() {
        let (_, draggers) = setup();
        assert_eq!(draggers.len(), 3);
        let height = draggers.get(2).expect("Höhe");
        assert_eq!(height.kind, DraggerType::MoveHeight);
        assert_relative_eq!(height.position.z, DEFAULT_EXTRUDED_HEIGHT);
    }

    #[test]
    fn test_ecke_setzt_grundmasse() {
        let (mut geometry, mut draggers) = setup();
        let mut ctx = DragContext::new(
            &mut geometry,
            &mut draggers,
            2,
            2,
            derivation::box_footprint,
            DVec3::new(10.0, 5.0, 0.0),
        );
        drag_corner(&mut ctx, 1, DVec3::new(-6.0, 4.0, 2.0)).expect("Drag");
        let dims = geometry.params.dimensions.expect("Maße");
        assert_relative_eq!(dims.x, 12.0);
        assert_relative_eq!(dims.y, 8.0);
        assert_relative_eq!(dims.z, DEFAULT_EXTRUDED_HEIGHT);
    }

    #[test]
    fn test_hoehe_und_flache_ecke() {
        let (mut geometry, mut draggers) = setup();
        let mut ctx = DragContext::new(
            &mut geometry,
            &mut draggers,
            2,
            2,
            derivation::box_footprint,
            DVec3::new(0.0, 0.0, 20.0),
        );
        drag_box_height(&mut ctx, 2, DVec3::new(0.0, 0.0, 35.0)).expect("Drag");
        assert!(drag_corner(&mut ctx, 1, DVec3::new(5.0, 0.0, 0.0)).is_err());
        assert_relative_eq!(geometry.params.dimensions.expect("Maße").z, 35.0);
    }
}
