//! Gemeinsame Drag-Pipeline: Greifen, Ziehen, Loslassen, Löschen, Hover.
//!
//! Callback-Fehler beenden nie die Session. Geometrie und Dragger werden auf
//! den Stand vor dem Aufruf zurückgesetzt und der Frame wird verworfen.

use super::{marker_of, ActiveDrag, EditController};
use crate::app::pointer::PointerEvent;
use crate::core::{DragContext, DragHandler, Dragger, DraggerType, PlotEvent};
use crate::scene::{CameraInputLock, ObjectRef, SceneHost};
use glam::{DVec3, Vec2};

/// Tooltip während eines Drags.
const HINT_DRAGGING: &str = "Loslassen übernimmt die Position";
/// Zusatz im Hover-Tooltip eines löschbaren Punkts.
const HINT_DELETE: &str = "Rechtsklick löscht den Punkt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Drag,
    End,
}

impl Phase {
    fn handler(self, dragger: &Dragger) -> Option<DragHandler> {
        match self {
            Phase::Start => dragger.on_drag_start(),
            Phase::Drag => dragger.on_drag(),
            Phase::End => dragger.on_drag_end(),
        }
    }
}

/// Ergebnis eines Callback-Aufrufs.
struct CallbackResult {
    ok: bool,
    rebuild: bool,
}

impl EditController {
    /// Verarbeitet ein Pointer-Event. Gibt `true` zurück, wenn die Session
    /// das Event verbraucht hat.
    pub fn handle_pointer(&mut self, host: &mut dyn SceneHost, event: PointerEvent) -> bool {
        if self.session.is_none() {
            return false;
        }
        match event {
            PointerEvent::PrimaryDown { screen } | PointerEvent::TouchStart { screen, .. } => {
                self.begin_drag(host, screen)
            }
            PointerEvent::Move { screen } | PointerEvent::TouchMove { screen } => {
                if self.is_dragging() {
                    self.drag_to(host, screen);
                    true
                } else {
                    self.hover(host, screen);
                    false
                }
            }
            PointerEvent::PrimaryUp { screen } | PointerEvent::TouchEnd { screen } => {
                self.end_drag(host, screen)
            }
            PointerEvent::SecondaryClick { screen } => self.delete_at(host, screen),
            PointerEvent::PrimaryClick { .. } | PointerEvent::DoubleClick { .. } => {
                self.is_dragging()
            }
        }
    }

    /// Slot des Draggers unter dem Cursor.
    fn picked_slot(&self, host: &dyn SceneHost, screen: Vec2) -> Option<usize> {
        let session = self.session.as_ref()?;
        match host.pick_object(screen)? {
            ObjectRef::Dragger(id) => session.draggers.slot_of(id),
            _ => None,
        }
    }

    // ── 1. Greifen ────────────────────────────────────────────────

    fn begin_drag(&mut self, host: &mut dyn SceneHost, screen: Vec2) -> bool {
        if self.is_dragging() {
            return true;
        }
        let Some(slot) = self.picked_slot(host, screen) else {
            return false;
        };
        let lock = CameraInputLock::acquire(host);
        let Some(session) = self.session.as_mut() else {
            lock.release(host);
            return false;
        };
        let Some(dragger) = session.draggers.get_mut(slot) else {
            lock.release(host);
            return false;
        };
        dragger.marker_visible = false;
        host.upsert_marker(marker_of(dragger));
        let (kind, position) = (dragger.kind, dragger.position);
        log::debug!("Dragger gegriffen: {:?} (Slot {})", kind, slot);

        let result = self.run_callback(host, slot, Phase::Start, position, position);
        let Some(session) = self.session.as_mut() else {
            lock.release(host);
            return false;
        };
        if !result.ok {
            // Greifen fehlgeschlagen: Dragger nicht festhalten
            if let Some(dragger) = session.draggers.get_mut(slot) {
                dragger.marker_visible = true;
                host.upsert_marker(marker_of(dragger));
            }
            lock.release(host);
            return true;
        }
        session.drag = Some(ActiveDrag {
            slot,
            lock,
            last_screen: screen,
            rebuild_pending: result.rebuild,
        });
        true
    }

    // ── 2. Ziehen ─────────────────────────────────────────────────

    fn drag_to(&mut self, host: &mut dyn SceneHost, screen: Vec2) {
        let Some((slot, last_screen)) = self
            .session
            .as_ref()
            .and_then(|s| s.drag.as_ref())
            .map(|d| (d.slot, d.last_screen))
        else {
            return;
        };
        let Some((kind, previous)) = self
            .session
            .as_ref()
            .and_then(|s| s.draggers.get(slot))
            .map(|d| (d.kind, d.position))
        else {
            return;
        };

        let target = match kind {
            DraggerType::MoveHeight => {
                let dz = f64::from(last_screen.y - screen.y)
                    * self.meters_per_pixel(host)
                    * self.options.height_drag_factor;
                previous + self.shape.up() * dz
            }
            _ => match host.pick_surface_position(screen) {
                Some(position) => position,
                None => {
                    log::debug!("Drag ohne Pick-Treffer, Frame verworfen");
                    return;
                }
            },
        };

        let result = self.run_callback(host, slot, Phase::Drag, target, previous);
        if let Some(drag) = self.session.as_mut().and_then(|s| s.drag.as_mut()) {
            drag.last_screen = screen;
            drag.rebuild_pending |= result.rebuild;
        }
        host.show_tooltip(screen, HINT_DRAGGING);
    }

    /// Welteinheiten pro Bildschirmpixel am Formmittelpunkt.
    fn meters_per_pixel(&self, host: &dyn SceneHost) -> f64 {
        let display = self.shape.display_positions();
        let center = self
            .shape
            .display_centroid()
            .or_else(|| self.shape.control_points().first().copied())
            .unwrap_or(DVec3::ZERO);
        let radius = display
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0, f64::max);
        let viewport = host.viewport_size();
        host.pixel_size_at_distance(center, radius, viewport.x, viewport.y)
    }

    // ── 3. Loslassen ──────────────────────────────────────────────

    fn end_drag(&mut self, host: &mut dyn SceneHost, screen: Vec2) -> bool {
        let Some(drag) = self.session.as_mut().and_then(|s| s.drag.take()) else {
            return false;
        };
        let slot = drag.slot;
        let Some((kind, position)) = self.session.as_mut().and_then(|s| {
            let dragger = s.draggers.get_mut(slot)?;
            dragger.marker_visible = true;
            Some((dragger.kind, dragger.position))
        }) else {
            drag.lock.release(host);
            return true;
        };

        let result = self.run_callback(host, slot, Phase::End, position, position);
        let index = self
            .session
            .as_ref()
            .and_then(|s| s.draggers.get(slot))
            .map_or(0, |d| d.index);
        host.notify(PlotEvent::EditMovePoint {
            shape_id: self.shape.id(),
            dragger: kind,
            index,
            position,
        });
        drag.lock.release(host);
        host.hide_tooltip();

        if drag.rebuild_pending || result.rebuild {
            if let Err(err) = self.rebuild_draggers(host) {
                log::warn!("Dragger-Neuaufbau nach Drag fehlgeschlagen: {:#}", err);
            }
        } else if let Some(session) = self.session.as_ref() {
            super::sync_markers(host, &session.draggers);
        }
        log::debug!("Dragger losgelassen: {:?} bei {:?} ({:?})", kind, position, screen);
        true
    }

    // ── 4. Löschen und Hover ──────────────────────────────────────

    fn delete_at(&mut self, host: &mut dyn SceneHost, screen: Vec2) -> bool {
        let Some(slot) = self.picked_slot(host, screen) else {
            return false;
        };
        let Some((kind, index)) = self
            .session
            .as_ref()
            .and_then(|s| s.draggers.get(slot))
            .map(|d| (d.kind, d.index))
        else {
            return false;
        };
        if kind != DraggerType::Control {
            return true;
        }
        if let Err(err) = self.delete_point(host, index, Some(screen)) {
            log::warn!("Löschen fehlgeschlagen: {:#}", err);
        }
        true
    }

    fn hover(&mut self, host: &mut dyn SceneHost, screen: Vec2) {
        let Some(slot) = self.picked_slot(host, screen) else {
            host.hide_tooltip();
            return;
        };
        let deletable = self.shape.point_count() > self.shape.min_points();
        let Some(dragger) = self.session.as_ref().and_then(|s| s.draggers.get(slot)) else {
            return;
        };
        let text = if dragger.kind == DraggerType::Control && deletable {
            format!("{}\n{}", dragger.tooltip, HINT_DELETE)
        } else {
            dragger.tooltip.clone()
        };
        host.show_tooltip(screen, &text);
    }

    // ── Callback-Grenze ───────────────────────────────────────────

    /// Ruft einen Dragger-Callback auf und fängt Fehler ab.
    ///
    /// In der Drag-Phase wird der Dragger vorher auf `position` gesetzt.
    fn run_callback(
        &mut self,
        host: &mut dyn SceneHost,
        slot: usize,
        phase: Phase,
        position: DVec3,
        previous: DVec3,
    ) -> CallbackResult {
        let (min_points, max_points) = (self.shape.min_points(), self.shape.max_points());
        let derive = self.shape.spec().derive;
        let shape_id = self.shape.id();
        let Some(session) = self.session.as_mut() else {
            return CallbackResult {
                ok: false,
                rebuild: false,
            };
        };
        let Some(handler) = session.draggers.get(slot).and_then(|d| phase.handler(d)) else {
            if phase == Phase::Drag {
                if let Some(dragger) = session.draggers.get_mut(slot) {
                    dragger.position = position;
                    host.upsert_marker(marker_of(dragger));
                }
            }
            return CallbackResult {
                ok: true,
                rebuild: false,
            };
        };

        let saved_geometry = self.shape.geometry().clone();
        let saved_draggers = session.draggers.clone();
        if phase == Phase::Drag {
            if let Some(dragger) = session.draggers.get_mut(slot) {
                dragger.position = position;
            }
        }

        let outcome = {
            let mut geometry = self.shape.geometry_mut();
            let mut ctx = DragContext::new(
                &mut geometry,
                &mut session.draggers,
                min_points,
                max_points,
                derive,
                previous,
            );
            handler(&mut ctx, slot, position).map(|()| ctx.rebuild_requested())
        };

        match outcome {
            Ok(rebuild) => {
                self.shape.refresh_render();
                if let Some(session) = self.session.as_ref() {
                    super::sync_markers(host, &session.draggers);
                }
                CallbackResult { ok: true, rebuild }
            }
            Err(err) => {
                log::warn!(
                    "Form {}: {:?}-Callback fehlgeschlagen, Frame verworfen: {:#}",
                    shape_id,
                    phase,
                    err
                );
                *self.shape.geometry_mut() = saved_geometry;
                if let Some(session) = self.session.as_mut() {
                    session.draggers = saved_draggers;
                }
                self.shape.refresh_render();
                CallbackResult {
                    ok: false,
                    rebuild: false,
                }
            }
        }
    }
}
