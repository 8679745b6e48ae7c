//! Application-Layer: Controller, State, Events, Zeichnen und Bearbeiten.

pub mod command_log;
pub mod controller;
pub mod draw;
pub mod edit;
pub mod events;
pub mod handlers;
pub mod history;
mod intent_mapping;
pub mod pointer;
pub mod scenario;
/// Application State
///
/// Formsammlung, aktive Sessions, History und Optionen.
pub mod state;

pub use command_log::CommandLog;
pub use controller::PlotController;
pub use draw::{DrawController, DrawOutcome};
pub use edit::{DeleteOutcome, EditController};
pub use events::{PlotCommand, PlotIntent};
pub use pointer::{LongPressTimer, PointerEvent};
pub use scenario::{ReplayReport, Scenario};
pub use state::{EditSlot, PlotState};
