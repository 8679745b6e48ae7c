//! Rezept für Ellipsoide: Mittelpunkt und drei Radien.

use super::{center_of, drag_center, handler};
use crate::app::edit::recipe::{
    require_points, EditRecipe, PointLimits, MIN_EXTENT, TOOLTIP_CONTROL, TOOLTIP_MOVE_HEIGHT,
    TOOLTIP_RADIUS,
};
use crate::core::{
    create_dragger, horizontal_distance, DragContext, DraggerCollection, DraggerOptions,
    DraggerType, LocalFrame, ShapeGeometry,
};
use glam::DVec3;

/// Dragger-Layout für Ellipsoide.
#[derive(Debug, Clone, Copy, Default)]
pub struct EllipsoidRecipe;

fn radii(geometry: &ShapeGeometry) -> DVec3 {
    geometry.params.radii.unwrap_or_else(|| {
        let r = match geometry.control_points.as_slice() {
            [center, edge, ..] => horizontal_distance(*center, *edge, geometry.up),
            _ => 0.0,
        };
        DVec3::splat(r)
    })
}

impl EditRecipe for EllipsoidRecipe {
    fn name(&self) -> &str {
        "Ellipsoid"
    }

    fn bind_draggers(
        &self,
        geometry: &ShapeGeometry,
        _display: &[DVec3],
        _limits: PointLimits,
        draggers: &mut DraggerCollection,
    ) -> anyhow::Result<()> {
        require_points(geometry, 2, self.name())?;
        let r = radii(geometry);
        if r.min_element() <= MIN_EXTENT {
            anyhow::bail!("Ellipsoid: Radius ist 0");
        }
        let frame = LocalFrame::new(geometry.control_points[0], geometry.up);

        let base = draggers.len();
        create_dragger(
            draggers,
            DraggerOptions::new(DraggerType::Control, frame.origin)
                .index(0)
                .tooltip(TOOLTIP_CONTROL)
                .linked(vec![base + 1, base + 2, base + 3])
                .on_drag(handler(drag_center)),
        );
        create_dragger(
            draggers,
            DraggerOptions::new(DraggerType::EditAttribute, frame.to_world(r.x, 0.0, 0.0))
                .index(1)
                .tooltip(TOOLTIP_RADIUS)
                .on_drag(handler(|ctx, slot, position| drag_radius(ctx, slot, position, 0))),
        );
        create_dragger(
            draggers,
            DraggerOptions::new(DraggerType::EditAttribute, frame.to_world(0.0, r.y, 0.0))
                .index(2)
                .tooltip(TOOLTIP_RADIUS)
                .on_drag(handler(|ctx, slot, position| drag_radius(ctx, slot, position, 1))),
        );
        create_dragger(
            draggers,
            DraggerOptions::new(DraggerType::MoveHeight, frame.to_world(0.0, 0.0, r.z))
                .index(3)
                .tooltip(TOOLTIP_MOVE_HEIGHT)
                .on_drag(handler(|ctx, slot, position| drag_radius(ctx, slot, position, 2))),
        );
        Ok(())
    }
}

/// Setzt einen Radius (0 = Ost, 1 = Nord, 2 = Hoch) und rastet den Dragger ein.
fn drag_radius(
    ctx: &mut DragContext<'_>,
    slot: usize,
    position: DVec3,
    axis: usize,
) -> anyhow::Result<()> {
    let center = center_of(ctx)?;
    let frame = LocalFrame::new(center, ctx.geometry.up);
    let direction = [frame.east, frame.north, frame.up][axis];
    let value = (position - center).dot(direction).abs();
    if value <= MIN_EXTENT {
        anyhow::bail!("Radius muss größer als 0 sein");
    }
    let mut r = radii(&*ctx.geometry);
    r[axis] = value;
    ctx.geometry.params.radii = Some(r);
    if axis == 0 {
        if let Some(edge) = ctx.geometry.control_points.get_mut(1) {
            *edge = center + direction * value;
        }
    }
    ctx.place(slot, center + direction * value)
}
