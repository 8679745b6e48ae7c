//! Begrenztes Log aller ausgeführten Commands.
//!
//! Pointer-Bewegungen und Frame-Ticks kommen in dichter Folge. Aufeinander
//! folgende Einträge derselben Art werden zusammengefasst, nur der jüngste
//! bleibt stehen.

use super::pointer::PointerEvent;
use super::PlotCommand;

/// Art eines zusammenfassbaren Commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Move,
    TouchMove,
    Tick,
}

fn stream_of(command: &PlotCommand) -> Option<Stream> {
    match command {
        PlotCommand::RoutePointer {
            event: PointerEvent::Move { .. },
        } => Some(Stream::Move),
        PlotCommand::RoutePointer {
            event: PointerEvent::TouchMove { .. },
        } => Some(Stream::TouchMove),
        PlotCommand::TickDraw { .. } => Some(Stream::Tick),
        _ => None,
    }
}

/// Speichert ausgeführte Commands in Reihenfolge.
#[derive(Default)]
pub struct CommandLog {
    entries: Vec<PlotCommand>,
    /// Anzahl zusammengefasster (überschriebener) Einträge
    coalesced: usize,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;

    /// Erstellt ein leeres Command-Log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt einen ausgeführten Command hinzu.
    ///
    /// Folgt eine Bewegung oder ein Tick auf einen Eintrag derselben Art,
    /// ersetzt sie diesen. Begrenzt auf MAX_ENTRIES, bei Überlauf wird die
    /// ältere Hälfte verworfen.
    pub fn record(&mut self, command: &PlotCommand) {
        if let (Some(stream), Some(last)) = (stream_of(command), self.entries.last_mut()) {
            if stream_of(last) == Some(stream) {
                *last = command.clone();
                self.coalesced += 1;
                return;
            }
        }
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(command.clone());
    }

    /// Gibt die Anzahl der geloggten Commands zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Commands vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Anzahl der Commands, die in einen Vorgänger zusammengefasst wurden.
    pub fn coalesced(&self) -> usize {
        self.coalesced
    }

    /// Liefert eine read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[PlotCommand] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn moved(x: f32) -> PlotCommand {
        PlotCommand::RoutePointer {
            event: PointerEvent::Move {
                screen: Vec2::new(x, 0.0),
            },
        }
    }

    #[test]
    fn record_drops_oldest_half_when_full() {
        let mut log = CommandLog::new();
        for index in 0..CommandLog::MAX_ENTRIES + 1 {
            log.record(&PlotCommand::RemoveEditPoint { index });
        }
        assert_eq!(log.len(), CommandLog::MAX_ENTRIES / 2 + 1);
        assert!(matches!(
            log.entries()[0],
            PlotCommand::RemoveEditPoint { index: 500 }
        ));
    }

    #[test]
    fn record_coalesces_consecutive_moves() {
        let mut log = CommandLog::new();
        log.record(&moved(1.0));
        log.record(&moved(2.0));
        log.record(&moved(3.0));

        assert_eq!(log.len(), 1);
        assert_eq!(log.coalesced(), 2);
        assert_eq!(log.entries()[0], moved(3.0));
    }

    #[test]
    fn record_keeps_moves_separated_by_clicks() {
        let mut log = CommandLog::new();
        log.record(&moved(1.0));
        log.record(&PlotCommand::RoutePointer {
            event: PointerEvent::PrimaryClick {
                screen: Vec2::new(1.0, 0.0),
            },
        });
        log.record(&moved(2.0));
        log.record(&PlotCommand::TickDraw { now_ms: 10 });
        log.record(&PlotCommand::TickDraw { now_ms: 20 });

        assert_eq!(log.len(), 4);
        assert_eq!(log.entries()[3], PlotCommand::TickDraw { now_ms: 20 });
    }
}
