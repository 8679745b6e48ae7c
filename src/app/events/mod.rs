//! PlotIntent- und PlotCommand-Enums für den Intent/Command-Datenfluss.

mod command;
mod intent;

pub use command::PlotCommand;
pub use intent::PlotIntent;
