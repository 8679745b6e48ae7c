//! Pointer- und Touch-Eingaben sowie die Long-Press-Erkennung.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Eine Eingabe im Viewport (Bildschirmkoordinaten in Pixeln).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PointerEvent {
    /// Primärtaste gedrückt
    PrimaryDown { screen: Vec2 },
    /// Primärtaste losgelassen
    PrimaryUp { screen: Vec2 },
    /// Primärklick bzw. Tap
    PrimaryClick { screen: Vec2 },
    /// Sekundärklick (nur Desktop)
    SecondaryClick { screen: Vec2 },
    /// Doppelklick (nur Desktop)
    DoubleClick { screen: Vec2 },
    /// Mausbewegung
    Move { screen: Vec2 },
    /// Finger aufgesetzt (Zeitstempel in ms)
    TouchStart { screen: Vec2, time_ms: u64 },
    /// Finger bewegt
    TouchMove { screen: Vec2 },
    /// Finger abgehoben
    TouchEnd { screen: Vec2 },
}

impl PointerEvent {
    /// Bildschirmposition des Events.
    pub fn screen(&self) -> Vec2 {
        match *self {
            PointerEvent::PrimaryDown { screen }
            | PointerEvent::PrimaryUp { screen }
            | PointerEvent::PrimaryClick { screen }
            | PointerEvent::SecondaryClick { screen }
            | PointerEvent::DoubleClick { screen }
            | PointerEvent::Move { screen }
            | PointerEvent::TouchStart { screen, .. }
            | PointerEvent::TouchMove { screen }
            | PointerEvent::TouchEnd { screen } => screen,
        }
    }

    /// Kurzname für Logs.
    pub fn name(&self) -> &'static str {
        match self {
            PointerEvent::PrimaryDown { .. } => "PrimaryDown",
            PointerEvent::PrimaryUp { .. } => "PrimaryUp",
            PointerEvent::PrimaryClick { .. } => "PrimaryClick",
            PointerEvent::SecondaryClick { .. } => "SecondaryClick",
            PointerEvent::DoubleClick { .. } => "DoubleClick",
            PointerEvent::Move { .. } => "Move",
            PointerEvent::TouchStart { .. } => "TouchStart",
            PointerEvent::TouchMove { .. } => "TouchMove",
            PointerEvent::TouchEnd { .. } => "TouchEnd",
        }
    }
}

/// Abbrechbarer Long-Press-Timer (Touch-Geste „Zeichnen beenden“).
///
/// Wird von `TouchStart` gestartet und über `tick(now_ms)` abgefragt.
/// `TouchEnd` und Bewegung über die Toleranz hinaus brechen ihn ab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongPressTimer {
    duration_ms: u64,
    tolerance_px: f32,
    pending: Option<(u64, Vec2)>,
}

impl LongPressTimer {
    /// Timer mit Dauer und Bewegungstoleranz.
    pub fn new(duration_ms: u64, tolerance_px: f32) -> Self {
        Self {
            duration_ms,
            tolerance_px,
            pending: None,
        }
    }

    /// Startet den Timer (ersetzt einen laufenden).
    pub fn start(&mut self, now_ms: u64, origin: Vec2) {
        self.pending = Some((now_ms, origin));
    }

    /// Bricht den Timer ab.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// `true`, solange der Timer läuft.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Bricht ab, wenn sich der Finger zu weit vom Startpunkt entfernt hat.
    pub fn track_move(&mut self, screen: Vec2) {
        if let Some((_, origin)) = self.pending {
            if origin.distance(screen) > self.tolerance_px {
                log::debug!("Long-Press abgebrochen: Bewegung über Toleranz");
                self.pending = None;
            }
        }
    }

    /// Gibt `true` genau einmal zurück, wenn die Dauer erreicht ist.
    pub fn fire_if_elapsed(&mut self, now_ms: u64) -> bool {
        match self.pending {
            Some((started, _)) if now_ms.saturating_sub(started) >= self.duration_ms => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
