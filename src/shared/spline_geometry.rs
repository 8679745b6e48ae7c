//! Reine Geometrie-Funktionen für Catmull-Rom-Splines.
//!
//! Layer-neutral: wird von der Kurven-Ableitung in `core::derivation`
//! genutzt, ohne eine Abhängigkeit auf `app` zu erzeugen.

use glam::DVec3;

/// Berechnet einen Punkt auf einem Catmull-Rom-Segment (t ∈ [0, 1]).
///
/// p0, p1, p2, p3: vier aufeinanderfolgende Kontrollpunkte.
/// Die Kurve verläuft von p1 nach p2.
pub fn catmull_rom_point(p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3, t: f64) -> DVec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Berechnet eine dichte Punktliste entlang einer Catmull-Rom-Spline durch `points`.
///
/// Für Rand-Segmente werden Phantom-Punkte gespiegelt, damit die Kurve
/// natürlich durch den ersten und letzten Punkt läuft.
///
/// `samples_per_segment`: Anzahl der Zwischenpunkte pro Segment (ohne Endpunkt).
pub fn catmull_rom_chain(points: &[DVec3], samples_per_segment: usize) -> Vec<DVec3> {
    let samples = samples_per_segment.max(1);
    if points.len() < 3 {
        return points.to_vec();
    }

    let n = points.len();
    let mut result = Vec::with_capacity((n - 1) * samples + 1);

    for seg in 0..(n - 1) {
        let p0 = if seg == 0 {
            2.0 * points[0] - points[1]
        } else {
            points[seg - 1]
        };
        let p1 = points[seg];
        let p2 = points[seg + 1];
        let p3 = if seg + 2 < n {
            points[seg + 2]
        } else {
            2.0 * points[n - 1] - points[n - 2]
        };

        let steps = if seg == n - 2 {
            samples + 1 // letztes Segment: Endpunkt einschließen
        } else {
            samples
        };

        for i in 0..steps {
            let t = i as f64 / samples as f64;
            result.push(catmull_rom_point(p0, p1, p2, p3, t));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catmull_rom_zwei_punkte_bleiben_unveraendert() {
        let points = vec![DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0)];
        assert_eq!(catmull_rom_chain(&points, 8), points);
    }

    #[test]
    fn test_catmull_rom_laeuft_durch_kontrollpunkte() {
        let points = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(5.0, 10.0, 0.0),
            DVec3::new(10.0, 0.0, 0.0),
        ];
        let result = catmull_rom_chain(&points, 20);

        assert_eq!(result.len(), 41);
        assert!(result[0].distance(points[0]) < 1e-9);
        assert!(result[20].distance(points[1]) < 1e-9);
        assert!(result[40].distance(points[2]) < 1e-9);
    }
}
