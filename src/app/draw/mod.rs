//! Zeichen-Lifecycle: neue Formen per Klick/Tap erzeugen.
//!
//! Ein `DrawController` zeichnet Formen eines Typs. Punktgrenzen, Live-Update
//! und Darstellung kommen aus dem `ShapeSpec` des Typs; der Controller selbst
//! kennt keine konkreten Formen.

mod session;

pub use session::{coincident, drop_trailing_duplicate, FinishCallback};

use self::session::DrawSession;
use super::pointer::{LongPressTimer, PointerEvent};
use crate::core::{PlotEvent, Representation, Shape, ShapeAttributes, ShapeKind};
use crate::scene::{CursorStyle, InputOwner, SceneHost};
use crate::shared::EditorOptions;
use glam::{DVec3, Vec2};

/// Tooltip, solange die Mindestpunktzahl fehlt.
const HINT_ADD_POINTS: &str = "Klicken, um Punkte hinzuzufügen";
/// Tooltip, sobald die Form abgeschlossen werden kann.
const HINT_FINISH: &str = "Doppelklick zum Beenden, Rechtsklick entfernt den letzten Punkt";

/// Ergebnis eines Eingabe-Events beim Zeichnen.
#[derive(Debug)]
pub enum DrawOutcome {
    /// Kein Zeichnen aktiv, Event nicht verarbeitet
    Ignored,
    /// Zeichnen läuft weiter
    Drawing,
    /// Form abgeschlossen (Besitz geht an den Aufrufer)
    Finished(Shape),
}

impl DrawOutcome {
    /// Entnimmt die fertige Form, falls vorhanden.
    pub fn into_finished(self) -> Option<Shape> {
        match self {
            DrawOutcome::Finished(shape) => Some(shape),
            _ => None,
        }
    }
}

/// Zeichen-Controller für einen Formtyp.
pub struct DrawController {
    kind: ShapeKind,
    representation: Representation,
    options: EditorOptions,
    session: Option<DrawSession>,
}

impl DrawController {
    /// Erstellt einen inaktiven Controller.
    pub fn new(kind: ShapeKind, representation: Representation, options: EditorOptions) -> Self {
        Self {
            kind,
            representation,
            options,
            session: None,
        }
    }

    /// Gezeichneter Formtyp.
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Darstellungsart neuer Formen.
    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// `true` zwischen `activate()` und Abschluss/Abbruch.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Die entstehende Form.
    pub fn shape(&self) -> Option<&Shape> {
        self.session.as_ref().map(|s| &s.shape)
    }

    /// Anzahl festgelegter Punkte (ohne Vorschau).
    pub fn committed_count(&self) -> usize {
        self.session.as_ref().map_or(0, DrawSession::committed_count)
    }

    /// `true`, wenn gerade ein Vorschaupunkt existiert.
    pub fn has_preview(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.has_preview)
    }

    /// Startet das Zeichnen. Idempotent: ist bereits eine Session aktiv,
    /// wird die laufende Form unverändert zurückgegeben.
    pub fn activate(
        &mut self,
        host: &mut dyn SceneHost,
        attributes: ShapeAttributes,
        on_finished: Option<FinishCallback>,
    ) -> &Shape {
        let session = match self.session.take() {
            Some(session) => {
                log::debug!("Zeichnen bereits aktiv (Form {})", session.shape.id());
                session
            }
            None => self.start_session(host, attributes, on_finished),
        };
        &self.session.insert(session).shape
    }

    fn start_session(
        &self,
        host: &mut dyn SceneHost,
        attributes: ShapeAttributes,
        on_finished: Option<FinishCallback>,
    ) -> DrawSession {
        let up = host.up_axis(DVec3::ZERO);
        let mut shape = Shape::new(self.kind, attributes, self.representation, up);
        shape.set_in_progress(true);
        shape.bind_live_render();

        host.set_cursor(CursorStyle::Crosshair);
        host.set_competing_tools_enabled(false);
        let binding = host.bind_input(InputOwner::Draw);
        host.notify(PlotEvent::DrawStart {
            shape_id: shape.id(),
        });
        log::info!(
            "Zeichnen gestartet: {} (Form {}, {:?})",
            shape.spec().name,
            shape.id(),
            self.representation
        );

        DrawSession {
            shape,
            binding,
            has_preview: false,
            last_pick: None,
            long_press: LongPressTimer::new(
                self.options.long_press_ms,
                self.options.long_press_move_tolerance_px,
            ),
            on_finished,
        }
    }

    /// Verarbeitet ein Pointer-/Touch-Event.
    pub fn handle_pointer(&mut self, host: &mut dyn SceneHost, event: PointerEvent) -> DrawOutcome {
        let Some(session) = self.session.as_mut() else {
            return DrawOutcome::Ignored;
        };
        log::debug!("Zeichnen: {}", event.name());

        match event {
            PointerEvent::PrimaryClick { screen } => self.commit_point(host, screen),
            PointerEvent::SecondaryClick { screen } => self.remove_last_point(host, screen),
            PointerEvent::Move { screen } => self.update_preview(host, screen),
            PointerEvent::TouchMove { screen } => {
                session.long_press.track_move(screen);
                self.update_preview(host, screen)
            }
            PointerEvent::TouchStart { screen, time_ms } => {
                session.long_press.start(time_ms, screen);
                DrawOutcome::Drawing
            }
            PointerEvent::TouchEnd { .. } => {
                session.long_press.cancel();
                DrawOutcome::Drawing
            }
            PointerEvent::DoubleClick { .. } => self.finish_requested(host),
            PointerEvent::PrimaryDown { .. } | PointerEvent::PrimaryUp { .. } => {
                DrawOutcome::Drawing
            }
        }
    }

    /// Frame-Tick: prüft den Long-Press-Timer.
    pub fn tick(&mut self, host: &mut dyn SceneHost, now_ms: u64) -> DrawOutcome {
        let Some(session) = self.session.as_mut() else {
            return DrawOutcome::Ignored;
        };
        if session.long_press.fire_if_elapsed(now_ms) {
            log::debug!("Long-Press erkannt");
            return self.finish_requested(host);
        }
        DrawOutcome::Drawing
    }

    /// Programmatischer Abschluss. Ohne Wirkung unter der Mindestpunktzahl.
    pub fn end_draw(&mut self, host: &mut dyn SceneHost) -> DrawOutcome {
        self.finish_requested(host)
    }

    /// Beendet die Session.
    ///
    /// Mit `force_cancel` wird die Form immer verworfen. Ohne wird sie ab der
    /// Mindestpunktzahl abgeschlossen und zurückgegeben, darunter verworfen.
    /// Ohne aktive Session ein No-op (`None`).
    pub fn disable(&mut self, host: &mut dyn SceneHost, force_cancel: bool) -> Option<Shape> {
        let session = self.session.as_mut()?;
        session.drop_preview();
        let min = session.shape.min_points();
        let committed = session.committed_count();

        if force_cancel || committed < min {
            let session = self.session.take()?;
            Self::release(host, &session);
            log::info!(
                "Zeichnen abgebrochen: Form {} verworfen ({} Punkte, Minimum {}, force={})",
                session.shape.id(),
                committed,
                min,
                force_cancel
            );
            return None;
        }
        self.finalize(host)
    }

    // ── Eingabe-Verarbeitung ───────────────────────────────────────

    /// Pickt die Oberfläche. Bei Fehlschlag gilt die letzte gepickte Position,
    /// aber nur solange ein Vorschaupunkt existiert.
    fn resolve_pick(session: &mut DrawSession, host: &dyn SceneHost, screen: Vec2) -> Option<DVec3> {
        if let Some(position) = host.pick_surface_position(screen) {
            session.last_pick = Some(position);
            return Some(position);
        }
        if !session.has_preview {
            log::debug!("Pick ohne Treffer und ohne Vorschaupunkt");
            return None;
        }
        log::debug!("Pick ohne Treffer, verwende letzte Vorschau-Position");
        session.last_pick
    }

    /// Pickt und wendet den Höhen-Offset an.
    fn placed_position(&mut self, host: &dyn SceneHost, screen: Vec2) -> Option<DVec3> {
        let offset = self.options.add_height_offset;
        let session = self.session.as_mut()?;
        let position = Self::resolve_pick(session, host, screen)?;
        if session.shape.attributes.config.add_height {
            return Some(position + session.shape.up() * offset);
        }
        Some(position)
    }

    fn commit_point(&mut self, host: &mut dyn SceneHost, screen: Vec2) -> DrawOutcome {
        let Some(position) = self.placed_position(host, screen) else {
            log::debug!("Klick ohne Pick-Treffer und ohne Vorschau ignoriert");
            return DrawOutcome::Drawing;
        };
        let Some(session) = self.session.as_mut() else {
            return DrawOutcome::Ignored;
        };

        session.put_trailing(position);
        session.has_preview = false;
        session.shape.sync_params();
        session.shape.refresh_render();
        host.notify(PlotEvent::DrawAddPoint {
            shape_id: session.shape.id(),
            position,
        });
        log::debug!(
            "Punkt {} gesetzt: {:?}",
            session.committed_count(),
            position
        );

        if session.committed_count() >= session.shape.max_points() {
            log::debug!("Maximale Punktzahl erreicht, Zeichnen wird abgeschlossen");
            return self.finalize(host).map_or(DrawOutcome::Drawing, DrawOutcome::Finished);
        }
        DrawOutcome::Drawing
    }

    fn update_preview(&mut self, host: &mut dyn SceneHost, screen: Vec2) -> DrawOutcome {
        if self.committed_count() == 0 {
            return DrawOutcome::Drawing;
        }
        let Some(position) = self.placed_position(host, screen) else {
            return DrawOutcome::Drawing;
        };
        let Some(session) = self.session.as_mut() else {
            return DrawOutcome::Ignored;
        };

        session.put_trailing(position);
        session.has_preview = true;
        session.shape.sync_params();
        session.shape.refresh_render();

        let hint = if session.committed_count() >= session.shape.min_points() {
            HINT_FINISH
        } else {
            HINT_ADD_POINTS
        };
        host.show_tooltip(screen, hint);
        host.notify(PlotEvent::DrawMouseMove {
            shape_id: session.shape.id(),
            positions: session.shape.control_points(),
        });
        DrawOutcome::Drawing
    }

    fn remove_last_point(&mut self, host: &mut dyn SceneHost, screen: Vec2) -> DrawOutcome {
        let Some(session) = self.session.as_mut() else {
            return DrawOutcome::Ignored;
        };
        session.drop_preview();
        if session.committed_count() == 0 {
            return DrawOutcome::Drawing;
        }
        session.shape.geometry_mut().control_points.pop();
        host.notify(PlotEvent::DrawRemovePoint {
            shape_id: session.shape.id(),
        });
        log::debug!("Letzten Punkt entfernt, {} verbleiben", session.committed_count());

        if session.committed_count() > 0 {
            if let Some(position) = self.placed_position(host, screen) {
                if let Some(session) = self.session.as_mut() {
                    session.put_trailing(position);
                    session.has_preview = true;
                }
            }
        }
        if let Some(session) = self.session.as_mut() {
            session.shape.sync_params();
            session.shape.refresh_render();
        }
        DrawOutcome::Drawing
    }

    /// Doppelklick, Long-Press und `end_draw()`.
    fn finish_requested(&mut self, host: &mut dyn SceneHost) -> DrawOutcome {
        let tolerance = self.options.duplicate_point_tolerance;
        let Some(session) = self.session.as_mut() else {
            return DrawOutcome::Ignored;
        };

        let mut points = session.shape.control_points();
        if session.has_preview {
            points.pop();
        }
        if drop_trailing_duplicate(&mut points, tolerance) {
            log::debug!("Doppelten Endpunkt verworfen");
        }
        if points.len() < session.shape.min_points() {
            log::debug!(
                "Abschluss ignoriert: {} von mindestens {} Punkten",
                points.len(),
                session.shape.min_points()
            );
            return DrawOutcome::Drawing;
        }

        session.shape.set_control_points(points);
        session.has_preview = false;
        self.finalize(host).map_or(DrawOutcome::Drawing, DrawOutcome::Finished)
    }

    // ── Abschluss ──────────────────────────────────────────────────

    fn finalize(&mut self, host: &mut dyn SceneHost) -> Option<Shape> {
        let mut session = self.session.take()?;
        session.drop_preview();
        session.long_press.cancel();

        let shape = &mut session.shape;
        shape.sync_params();
        shape.set_in_progress(false);
        shape.freeze_render();

        Self::release(host, &session);
        if let Some(on_finished) = session.on_finished.take() {
            on_finished(&session.shape);
        }
        host.notify(PlotEvent::DrawCreated {
            shape_id: session.shape.id(),
        });
        log::info!(
            "Form {} erstellt ({} Punkte)",
            session.shape.id(),
            session.shape.point_count()
        );
        Some(session.shape)
    }

    /// Gibt Cursor, Plugins, Bindung und Tooltip frei.
    fn release(host: &mut dyn SceneHost, session: &DrawSession) {
        host.set_cursor(CursorStyle::Default);
        host.set_competing_tools_enabled(true);
        host.unbind_input(session.binding);
        host.hide_tooltip();
    }
}
