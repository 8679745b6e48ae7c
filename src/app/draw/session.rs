//! Zustand einer laufenden Zeichen-Session und reine Punkt-Hilfsfunktionen.

use crate::app::pointer::LongPressTimer;
use crate::core::Shape;
use crate::scene::InputBinding;
use glam::DVec3;

/// Callback, der genau einmal mit der fertigen Form aufgerufen wird.
pub type FinishCallback = Box<dyn FnOnce(&Shape)>;

/// Zustand zwischen `activate()` und Abschluss/Abbruch.
pub(super) struct DrawSession {
    /// Die entstehende Form (letzter Punkt ggf. Vorschau)
    pub shape: Shape,
    /// Gehaltene Pointer-Bindung
    pub binding: InputBinding,
    /// `true`, wenn der letzte Kontrollpunkt ein Vorschaupunkt ist
    pub has_preview: bool,
    /// Letzte erfolgreich gepickte Weltposition (ohne Höhen-Offset)
    pub last_pick: Option<DVec3>,
    /// Long-Press-Erkennung für Touch
    pub long_press: LongPressTimer,
    /// Abschluss-Callback
    pub on_finished: Option<FinishCallback>,
}

impl DrawSession {
    /// Anzahl festgelegter (nicht Vorschau-)Punkte.
    pub fn committed_count(&self) -> usize {
        self.shape.point_count() - usize::from(self.has_preview)
    }

    /// Ersetzt den Vorschaupunkt oder hängt einen neuen Punkt an.
    pub fn put_trailing(&mut self, position: DVec3) {
        let replace = self.has_preview;
        let mut geometry = self.shape.geometry_mut();
        if replace {
            if let Some(last) = geometry.control_points.last_mut() {
                *last = position;
                return;
            }
        }
        geometry.control_points.push(position);
    }

    /// Entfernt den Vorschaupunkt, falls vorhanden.
    pub fn drop_preview(&mut self) {
        if self.has_preview {
            self.shape.geometry_mut().control_points.pop();
            self.has_preview = false;
        }
    }
}

/// `true`, wenn zwei Punkte auf allen Achsen innerhalb der Toleranz liegen.
pub fn coincident(a: DVec3, b: DVec3, tolerance: f64) -> bool {
    let d = (a - b).abs();
    d.x <= tolerance && d.y <= tolerance && d.z <= tolerance
}

/// Entfernt den letzten Punkt, wenn er den vorletzten dupliziert.
///
/// Gibt `true` zurück, wenn ein Punkt entfernt wurde.
pub fn drop_trailing_duplicate(points: &mut Vec<DVec3>, tolerance: f64) -> bool {
    if let [.., a, b] = points.as_slice() {
        if coincident(*a, *b, tolerance) {
            points.pop();
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coincident_prueft_jede_achse() {
        let a = DVec3::new(5.0, 10.0, 0.0);
        assert!(coincident(a, DVec3::new(5.9, 9.2, 0.5), 1.0));
        assert!(!coincident(a, DVec3::new(5.0, 10.0, 1.5), 1.0));
    }

    #[test]
    fn test_drop_trailing_duplicate() {
        let mut points = vec![
            DVec3::ZERO,
            DVec3::new(5.0, 10.0, 0.0),
            DVec3::new(5.5, 10.2, 0.0),
        ];
        assert!(drop_trailing_duplicate(&mut points, 1.0));
        assert_eq!(points.len(), 2);
        assert!(!drop_trailing_duplicate(&mut points, 1.0));

        let mut single = vec![DVec3::ZERO];
        assert!(!drop_trailing_duplicate(&mut single, 1.0));
    }
}
