//! Bearbeitungs-Lifecycle: bestehende Formen über Dragger verändern.
//!
//! Ein `EditController` besitzt die bearbeitete Form für die Dauer der
//! Session. Das Dragger-Layout kommt aus dem Rezept des Formtyps, die
//! Pointer-Verarbeitung ist für alle Typen dieselbe (`pipeline`).

mod pipeline;
pub mod recipe;
mod recipes;
#[cfg(test)]
mod tests;

pub use recipe::{recipe_for, EditRecipe, PointLimits};
pub use recipes::{BoxRecipe, EllipseRecipe, EllipsoidRecipe, ModelRecipe, VertexRecipe};

use crate::core::{Dragger, DraggerCollection, PlotEvent, Representation, Shape};
use crate::scene::{CameraInputLock, HandleMarker, InputBinding, InputOwner, SceneHost};
use crate::shared::EditorOptions;
use anyhow::Context;
use glam::{DVec3, Vec2};

/// Tooltip bei verweigertem Löschen.
fn min_points_hint(min: usize) -> String {
    format!("Mindestens {} Punkte erforderlich", min)
}

/// Ergebnis eines Löschversuchs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Punkt entfernt
    Removed,
    /// Verweigert: die Form hätte danach weniger als `min` Punkte
    BelowMinimum {
        /// Mindestpunktzahl der Form
        min: usize,
    },
}

/// Gegriffener Dragger zwischen Pointer-Down und Pointer-Up.
#[derive(Debug)]
struct ActiveDrag {
    slot: usize,
    lock: CameraInputLock,
    last_screen: Vec2,
    rebuild_pending: bool,
}

/// Zustand zwischen `activate()` und `disable()`.
struct EditSession {
    binding: InputBinding,
    draggers: DraggerCollection,
    drag: Option<ActiveDrag>,
}

/// Bearbeitungs-Controller für genau eine Form.
pub struct EditController {
    shape: Shape,
    recipe: Box<dyn EditRecipe>,
    options: EditorOptions,
    session: Option<EditSession>,
}

impl EditController {
    /// Erstellt einen inaktiven Controller für `shape`.
    pub fn new(shape: Shape, options: &EditorOptions) -> Self {
        let recipe = recipe_for(shape.spec().edit_layout);
        Self {
            shape,
            recipe,
            options: options.clone(),
            session: None,
        }
    }

    /// Bearbeitete Form.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Veränderbare Form. Änderungen an der Geometrie erreichen die Dragger
    /// erst mit [`EditController::update_draggers`].
    pub fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    /// Gibt die Form zurück. Eine laufende Session muss vorher mit
    /// [`EditController::disable`] beendet werden.
    pub fn into_shape(self) -> Shape {
        if self.session.is_some() {
            log::warn!(
                "EditController für Form {} ohne disable() aufgelöst",
                self.shape.id()
            );
        }
        self.shape
    }

    /// `true` zwischen `activate()` und `disable()`.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// `true`, solange ein Dragger gegriffen ist.
    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.drag.is_some())
    }

    /// Alle Dragger der laufenden Session.
    pub fn draggers(&self) -> Option<&DraggerCollection> {
        self.session.as_ref().map(|s| &s.draggers)
    }

    /// Name des verwendeten Rezepts.
    pub fn recipe_name(&self) -> &str {
        self.recipe.name()
    }

    /// Startet die Bearbeitung. Idempotent.
    ///
    /// Fehlende oder ungültige Basisgeometrie und Primitive-Formen sind
    /// Setup-Fehler und werden propagiert.
    pub fn activate(&mut self, host: &mut dyn SceneHost) -> anyhow::Result<&mut Self> {
        if self.session.is_some() {
            log::debug!("Bearbeitung bereits aktiv (Form {})", self.shape.id());
            return Ok(self);
        }
        if self.shape.representation() == Representation::Primitive {
            log::error!(
                "Form {} ist eine Primitive-Form und kann nicht per Dragger bearbeitet werden",
                self.shape.id()
            );
            anyhow::bail!(
                "Form {} muss vor der Bearbeitung in eine Retained-Darstellung umgewandelt werden",
                self.shape.id()
            );
        }

        self.shape.bind_live_render();
        self.shape.set_in_progress(true);
        let mut draggers = DraggerCollection::new(self.options.dragger_palette());
        if let Err(err) = self.bind_draggers(&mut draggers) {
            log::error!("Bearbeitung von Form {} fehlgeschlagen: {:#}", self.shape.id(), err);
            self.shape.set_in_progress(false);
            self.shape.freeze_render();
            return Err(err).with_context(|| {
                format!("Dragger für Form {} konnten nicht erstellt werden", self.shape.id())
            });
        }

        let binding = host.bind_input(InputOwner::Edit);
        sync_markers(host, &draggers);
        self.session = Some(EditSession {
            binding,
            draggers,
            drag: None,
        });
        host.notify(PlotEvent::EditStart {
            shape_id: self.shape.id(),
        });
        log::info!(
            "Bearbeitung gestartet: {} (Form {}, Rezept {})",
            self.shape.spec().name,
            self.shape.id(),
            self.recipe.name()
        );
        Ok(self)
    }

    /// Beendet die Bearbeitung. Idempotent.
    ///
    /// Gibt eine noch gehaltene Kamera-Sperre frei, entfernt alle Dragger und
    /// schreibt die Werte des Rezepts fest.
    pub fn disable(&mut self, host: &mut dyn SceneHost) -> &mut Self {
        let Some(mut session) = self.session.take() else {
            return self;
        };
        if let Some(drag) = session.drag.take() {
            log::debug!("Laufender Drag beim Beenden abgebrochen");
            drag.lock.release(host);
        }
        for id in session.draggers.clear() {
            host.remove_marker(id);
        }
        host.unbind_input(session.binding);
        host.hide_tooltip();

        self.recipe.finish(&mut self.shape.geometry_mut());
        self.shape.set_in_progress(false);
        self.shape.freeze_render();

        host.notify(PlotEvent::EditStop {
            shape_id: self.shape.id(),
        });
        log::info!(
            "Bearbeitung beendet: Form {} ({} Punkte)",
            self.shape.id(),
            self.shape.point_count()
        );
        self
    }

    /// Verwirft alle Dragger und baut sie aus dem aktuellen Zustand neu auf.
    pub fn update_draggers(&mut self, host: &mut dyn SceneHost) -> anyhow::Result<&mut Self> {
        if self.session.is_none() {
            log::debug!("update_draggers ohne aktive Bearbeitung ignoriert");
            return Ok(self);
        }
        self.rebuild_draggers(host)?;
        Ok(self)
    }

    /// Ersetzt alle Kontrollpunkte und baut die Dragger neu auf.
    pub fn set_positions(
        &mut self,
        host: &mut dyn SceneHost,
        points: Vec<DVec3>,
    ) -> anyhow::Result<&mut Self> {
        let (min, max) = (self.shape.min_points(), self.shape.max_points());
        if points.len() < min || points.len() > max {
            anyhow::bail!(
                "{} Punkte für {} ungültig (erlaubt {}..={})",
                points.len(),
                self.shape.spec().name,
                min,
                max
            );
        }
        if points.iter().any(|p| !p.is_finite()) {
            anyhow::bail!("Ungültige Koordinaten für Form {}", self.shape.id());
        }

        self.cancel_drag(host);
        self.shape.set_control_points(points);
        self.shape.sync_params();
        self.shape.refresh_render();
        if self.session.is_some() {
            self.rebuild_draggers(host)?;
        }
        log::debug!("Form {}: Punkte gesetzt", self.shape.id());
        Ok(self)
    }

    /// Aktuelle Kontrollpunkte.
    pub fn get_positions(&self) -> Vec<DVec3> {
        self.shape.control_points()
    }

    /// Aktuelle Darstellungspunkte (abgeleitet aus den Kontrollpunkten).
    pub fn show_positions(&self) -> Vec<DVec3> {
        self.shape.display_positions()
    }

    /// Löscht einen Kontrollpunkt, sofern die Mindestpunktzahl erhalten bleibt.
    pub fn remove_control_point(
        &mut self,
        host: &mut dyn SceneHost,
        index: usize,
    ) -> anyhow::Result<DeleteOutcome> {
        self.delete_point(host, index, None)
    }

    // ── Interna ────────────────────────────────────────────────────

    fn bind_draggers(&self, draggers: &mut DraggerCollection) -> anyhow::Result<()> {
        let limits = PointLimits {
            min: self.shape.min_points(),
            max: self.shape.max_points(),
        };
        let display = self.shape.display_positions();
        let geometry = self.shape.geometry();
        self.recipe
            .bind_draggers(&geometry, &display, limits, draggers)
    }

    fn rebuild_draggers(&mut self, host: &mut dyn SceneHost) -> anyhow::Result<()> {
        let mut draggers = DraggerCollection::new(self.options.dragger_palette());
        self.bind_draggers(&mut draggers).with_context(|| {
            format!("Dragger für Form {} konnten nicht neu aufgebaut werden", self.shape.id())
        })?;
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        for id in session.draggers.clear() {
            host.remove_marker(id);
        }
        session.draggers = draggers;
        sync_markers(host, &session.draggers);
        log::debug!(
            "Dragger neu aufgebaut: {} (Form {})",
            session.draggers.len(),
            self.shape.id()
        );
        Ok(())
    }

    /// Bricht einen laufenden Drag ab und gibt die Kamera frei.
    fn cancel_drag(&mut self, host: &mut dyn SceneHost) {
        if let Some(drag) = self.session.as_mut().and_then(|s| s.drag.take()) {
            drag.lock.release(host);
        }
    }

    fn delete_point(
        &mut self,
        host: &mut dyn SceneHost,
        index: usize,
        screen: Option<Vec2>,
    ) -> anyhow::Result<DeleteOutcome> {
        let count = self.shape.point_count();
        if index >= count {
            anyhow::bail!("Punkt {} existiert nicht ({} Punkte)", index, count);
        }
        let min = self.shape.min_points();
        if count <= min {
            log::warn!(
                "Löschen verweigert: Form {} hat nur {} Punkte (Minimum {})",
                self.shape.id(),
                count,
                min
            );
            if let Some(screen) = screen {
                host.show_tooltip(screen, &min_points_hint(min));
            }
            return Ok(DeleteOutcome::BelowMinimum { min });
        }

        self.cancel_drag(host);
        self.shape.geometry_mut().control_points.remove(index);
        self.shape.sync_params();
        self.shape.refresh_render();
        if self.session.is_some() {
            self.rebuild_draggers(host)?;
        }
        host.hide_tooltip();
        host.notify(PlotEvent::EditRemovePoint {
            shape_id: self.shape.id(),
            index,
        });
        log::debug!("Form {}: Punkt {} gelöscht", self.shape.id(), index);
        Ok(DeleteOutcome::Removed)
    }
}

fn marker_of(dragger: &Dragger) -> HandleMarker {
    HandleMarker {
        id: dragger.id,
        position: dragger.position,
        color: dragger.style.color,
        pixel_size: dragger.style.pixel_size,
        visible: dragger.marker_visible,
        surface_pickable: dragger.surface_pickable,
    }
}

/// Überträgt alle Dragger als Marker an den Host.
fn sync_markers(host: &mut dyn SceneHost, draggers: &DraggerCollection) {
    for dragger in draggers.iter() {
        host.upsert_marker(marker_of(dragger));
    }
}
