//! Vertex-Rezept: ein Control-Dragger pro Kontrollpunkt.
//!
//! Optional Mittelpunkt-Dragger zum Einfügen, ein MoveAll-Dragger am
//! Schwerpunkt und ein Höhen-Dragger für Wasserflächen.

use super::handler;
use crate::app::edit::recipe::{
    require_points, EditRecipe, PointLimits, TOOLTIP_ADD_MID_POINT, TOOLTIP_CONTROL,
    TOOLTIP_MOVE_ALL, TOOLTIP_MOVE_HEIGHT,
};
use crate::core::{
    centroid, create_dragger, midpoint, DragContext, DraggerCollection, DraggerOptions,
    DraggerType, ShapeGeometry,
};
use glam::DVec3;

/// Dragger-Layout für Punkt-, Linien- und Flächenformen.
#[derive(Debug, Clone)]
pub struct VertexRecipe {
    name: &'static str,
    closed: bool,
    midpoints: bool,
    move_all: bool,
    height_handle: bool,
}

impl VertexRecipe {
    /// Einzelner Punkt.
    pub fn point() -> Self {
        Self {
            name: "Punkt",
            closed: false,
            midpoints: false,
            move_all: false,
            height_handle: false,
        }
    }

    /// Offene Linie mit Einfüge-Draggern.
    pub fn polyline() -> Self {
        Self {
            name: "Linie",
            closed: false,
            midpoints: true,
            move_all: true,
            height_handle: false,
        }
    }

    /// Geschlossene Fläche mit Einfüge-Draggern.
    pub fn polygon() -> Self {
        Self {
            name: "Polygon",
            closed: true,
            midpoints: true,
            move_all: true,
            height_handle: false,
        }
    }

    /// Wasserfläche: Polygon mit Höhen-Dragger statt MoveAll.
    pub fn water() -> Self {
        Self {
            name: "Wasser",
            closed: true,
            midpoints: true,
            move_all: false,
            height_handle: true,
        }
    }

    /// Feste Eckpunkte ohne Einfügen.
    pub fn corners(name: &'static str) -> Self {
        Self {
            name,
            closed: true,
            midpoints: false,
            move_all: true,
            height_handle: false,
        }
    }
}

/// Anzahl der Segmente zwischen `n` Punkten.
pub(crate) fn segment_count(n: usize, closed: bool) -> usize {
    match n {
        0 | 1 => 0,
        2 => 1,
        _ if closed => n,
        _ => n - 1,
    }
}

/// Position des Höhen-Draggers: Schwerpunkt auf Höhe `height`.
fn height_handle_position(center: DVec3, up: DVec3, height: Option<f64>) -> DVec3 {
    let base = center.dot(up);
    center + up * (height.unwrap_or(base) - base)
}

impl EditRecipe for VertexRecipe {
    fn name(&self) -> &str {
        self.name
    }

    fn bind_draggers(
        &self,
        geometry: &ShapeGeometry,
        display: &[DVec3],
        limits: PointLimits,
        draggers: &mut DraggerCollection,
    ) -> anyhow::Result<()> {
        require_points(geometry, 1, self.name)?;
        let points = &geometry.control_points;

        for (index, &position) in points.iter().enumerate() {
            create_dragger(
                draggers,
                DraggerOptions::new(DraggerType::Control, position)
                    .index(index)
                    .tooltip(TOOLTIP_CONTROL)
                    .on_drag(handler(drag_vertex)),
            );
        }

        if self.midpoints && points.len() < limits.max {
            let n = points.len();
            for index in 0..segment_count(n, self.closed) {
                let position = midpoint(points[index], points[(index + 1) % n]);
                create_dragger(
                    draggers,
                    DraggerOptions::new(DraggerType::AddMidPoint, position)
                        .index(index)
                        .tooltip(TOOLTIP_ADD_MID_POINT)
                        .on_drag_start(handler(splice_midpoint))
                        .on_drag(handler(drag_vertex))
                        .on_drag_end(handler(|ctx, _, _| {
                            ctx.request_rebuild();
                            Ok(())
                        })),
                );
            }
        }

        let center = centroid(display).or_else(|| centroid(points));
        if let Some(center) = center {
            if self.move_all && points.len() > 1 {
                create_dragger(
                    draggers,
                    DraggerOptions::new(DraggerType::MoveAll, center)
                        .tooltip(TOOLTIP_MOVE_ALL)
                        .on_drag(handler(drag_all)),
                );
            }
            if self.height_handle {
                let position =
                    height_handle_position(center, geometry.up, geometry.params.height);
                create_dragger(
                    draggers,
                    DraggerOptions::new(DraggerType::MoveHeight, position)
                        .tooltip(TOOLTIP_MOVE_HEIGHT)
                        .on_drag(handler(drag_surface_height)),
                );
            }
        }
        Ok(())
    }
}

/// Verschiebt einen Kontrollpunkt auf die Dragger-Position.
fn drag_vertex(ctx: &mut DragContext<'_>, slot: usize, position: DVec3) -> anyhow::Result<()> {
    let index = ctx.control_index(slot)?;
    ctx.geometry.control_points[index] = position;
    sync_vertex_handles(ctx);
    Ok(())
}

/// Wandelt einen Mittelpunkt-Dragger in einen echten Kontrollpunkt um.
///
/// Der neue Punkt wird hinter dem Segmentanfang eingefügt; alle Indizes
/// dahinter rücken um eins auf.
fn splice_midpoint(ctx: &mut DragContext<'_>, slot: usize, position: DVec3) -> anyhow::Result<()> {
    let segment = ctx.dragger(slot)?.index;
    let len = ctx.geometry.control_points.len();
    if len >= ctx.max_points {
        anyhow::bail!("Maximale Punktzahl {} erreicht", ctx.max_points);
    }
    if segment >= len {
        anyhow::bail!("Segment {} existiert nicht ({} Punkte)", segment, len);
    }
    let insert_at = segment + 1;
    ctx.geometry.control_points.insert(insert_at, position);

    for (other, dragger) in ctx.draggers.iter_mut().enumerate() {
        if other == slot {
            continue;
        }
        match dragger.kind {
            DraggerType::Control if dragger.index >= insert_at => dragger.index += 1,
            DraggerType::AddMidPoint if dragger.index > segment => dragger.index += 1,
            _ => {}
        }
    }

    ctx.draggers.retype(slot, DraggerType::Control);
    if let Some(dragger) = ctx.draggers.get_mut(slot) {
        dragger.index = insert_at;
        dragger.tooltip = TOOLTIP_CONTROL.to_string();
    }
    ctx.request_rebuild();
    log::debug!("Punkt an Index {} eingefügt", insert_at);
    Ok(())
}

/// Verschiebt alle Kontrollpunkte um das Delta seit der letzten Bewegung.
fn drag_all(ctx: &mut DragContext<'_>, _slot: usize, position: DVec3) -> anyhow::Result<()> {
    let delta = position - ctx.previous;
    for point in ctx.geometry.control_points.iter_mut() {
        *point += delta;
    }
    let up = ctx.geometry.up;
    if let Some(height) = ctx.geometry.params.height.as_mut() {
        *height += delta.dot(up);
    }
    sync_vertex_handles(ctx);
    Ok(())
}

/// Setzt die absolute Höhe einer Wasseroberfläche.
fn drag_surface_height(
    ctx: &mut DragContext<'_>,
    _slot: usize,
    position: DVec3,
) -> anyhow::Result<()> {
    ctx.geometry.params.height = Some(position.dot(ctx.geometry.up));
    sync_vertex_handles(ctx);
    Ok(())
}

/// Richtet alle Dragger nach dem aktuellen Geometriezustand aus.
fn sync_vertex_handles(ctx: &mut DragContext<'_>) {
    let points = ctx.geometry.control_points.clone();
    let n = points.len();
    let up = ctx.geometry.up;
    let height = ctx.geometry.params.height;
    let center = centroid(&ctx.display_positions()).or_else(|| centroid(&points));

    for dragger in ctx.draggers.iter_mut() {
        match dragger.kind {
            DraggerType::Control => {
                if let Some(&p) = points.get(dragger.index) {
                    dragger.position = p;
                }
            }
            DraggerType::AddMidPoint if n >= 2 => {
                let a = points[dragger.index % n];
                let b = points[(dragger.index + 1) % n];
                dragger.position = midpoint(a, b);
            }
            DraggerType::MoveAll => {
                if let Some(c) = center {
                    dragger.position = c;
                }
            }
            DraggerType::MoveHeight => {
                if let Some(c) = center {
                    dragger.position = height_handle_position(c, up, height);
                }
            }
            _ => {}
        }
    }
}
