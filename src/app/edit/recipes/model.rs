//! Rezept für platzierte Modelle: Position und Höhe.

use super::handler;
use crate::app::edit::recipe::{
    require_points, EditRecipe, PointLimits, TOOLTIP_CONTROL, TOOLTIP_MOVE_HEIGHT,
};
use crate::core::{
    create_dragger, DragContext, DraggerCollection, DraggerOptions, DraggerType, ShapeGeometry,
};
use glam::DVec3;

/// Abstand des Höhen-Draggers über dem Modell (Welteinheiten).
pub const MODEL_HEIGHT_HANDLE_LIFT: f64 = 20.0;

/// Dragger-Layout für Modelle.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelRecipe;

impl EditRecipe for ModelRecipe {
    fn name(&self) -> &str {
        "Modell"
    }

    fn bind_draggers(
        &self,
        geometry: &ShapeGeometry,
        _display: &[DVec3],
        _limits: PointLimits,
        draggers: &mut DraggerCollection,
    ) -> anyhow::Result<()> {
        require_points(geometry, 1, self.name())?;
        let position = geometry.control_points[0];
        let base = draggers.len();
        create_dragger(
            draggers,
            DraggerOptions::new(DraggerType::Control, position)
                .index(0)
                .tooltip(TOOLTIP_CONTROL)
                .linked(vec![base + 1])
                .on_drag(handler(drag_model)),
        );
        create_dragger(
            draggers,
            DraggerOptions::new(
                DraggerType::MoveHeight,
                position + geometry.up * MODEL_HEIGHT_HANDLE_LIFT,
            )
            .index(0)
            .tooltip(TOOLTIP_MOVE_HEIGHT)
            .linked(vec![base])
            .on_drag(handler(drag_model_height)),
        );
        Ok(())
    }
}

/// Verschiebt das Modell und führt den Höhen-Dragger mit.
fn drag_model(ctx: &mut DragContext<'_>, slot: usize, position: DVec3) -> anyhow::Result<()> {
    let index = ctx.control_index(slot)?;
    ctx.geometry.control_points[index] = position;
    let lifted = position + ctx.geometry.up * MODEL_HEIGHT_HANDLE_LIFT;
    let linked = ctx.dragger(slot)?.linked.clone();
    for other in linked {
        ctx.place(other, lifted)?;
    }
    Ok(())
}

/// Hebt oder senkt das Modell entlang der Hoch-Achse.
fn drag_model_height(
    ctx: &mut DragContext<'_>,
    slot: usize,
    position: DVec3,
) -> anyhow::Result<()> {
    let index = ctx.control_index(slot)?;
    let placed = position - ctx.geometry.up * MODEL_HEIGHT_HANDLE_LIFT;
    ctx.geometry.control_points[index] = placed;
    let linked = ctx.dragger(slot)?.linked.clone();
    for other in linked {
        ctx.place(other, placed)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::derivation;
    use approx::assert_relative_eq;

    #[test]
    fn test_hoehe_verschiebt_modell_und_anfasser() {
        let mut geometry = ShapeGeometry::new(vec![DVec3::new(5.0, 5.0, 0.0)], DVec3::Z);
        let mut draggers =
            DraggerCollection::new(crate::shared::EditorOptions::default().dragger_palette());
        ModelRecipe
            .bind_draggers(&geometry, &[], PointLimits { min: 1, max: 1 }, &mut draggers)
            .expect("Setup");
        assert_relative_eq!(draggers.get(1).expect("Höhe").position.z, 20.0);

        let mut ctx = DragContext::new(
            &mut geometry,
            &mut draggers,
            1,
            1,
            derivation::identity,
            DVec3::new(5.0, 5.0, 20.0),
        );
        drag_model_height(&mut ctx, 1, DVec3::new(5.0, 5.0, 32.0)).expect("Drag");
        assert_relative_eq!(ctx.dragger(0).expect("Control").position.z, 12.0);
        assert_relative_eq!(geometry.control_points[0].z, 12.0);
    }
}
