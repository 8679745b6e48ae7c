//! Feature-Handler für PlotCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion.

pub mod draw;
pub mod edit;
pub mod history;
pub mod shapes;
