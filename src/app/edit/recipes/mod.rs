//! Konkrete Edit-Rezepte und gemeinsame Drag-Callbacks.

mod box_volume;
mod ellipse;
mod ellipsoid;
mod model;
mod vertex;

pub use box_volume::BoxRecipe;
pub use ellipse::EllipseRecipe;
pub use ellipsoid::EllipsoidRecipe;
pub use model::ModelRecipe;
pub use vertex::VertexRecipe;

use crate::core::{DragContext, DragHandler};
use glam::DVec3;
use std::rc::Rc;

/// Verpackt eine Funktion oder Closure als [`DragHandler`].
pub(crate) fn handler<F>(f: F) -> DragHandler
where
    F: Fn(&mut DragContext<'_>, usize, DVec3) -> anyhow::Result<()> + 'static,
{
    Rc::new(f)
}

/// Mittelpunkt-Drag parametrischer Formen.
///
/// Verschiebt alle Kontrollpunkte und alle verknüpften Dragger um das Delta
/// seit der letzten Bewegung.
pub(crate) fn drag_center(ctx: &mut DragContext<'_>, slot: usize, position: DVec3) -> anyhow::Result<()> {
    ctx.control_index(slot)?;
    let delta = position - ctx.previous;
    for point in ctx.geometry.control_points.iter_mut() {
        *point += delta;
    }
    let linked = ctx.dragger(slot)?.linked.clone();
    for other in linked {
        let moved = ctx.dragger(other)?.position + delta;
        ctx.place(other, moved)?;
    }
    Ok(())
}

/// Mittelpunkt der Form (erster Kontrollpunkt) oder Fehler.
pub(crate) fn center_of(ctx: &DragContext<'_>) -> anyhow::Result<DVec3> {
    ctx.geometry
        .control_points
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("Form ohne Mittelpunkt"))
}
