//! Plot-Controller für zentrale Event-Verarbeitung.

use super::{PlotCommand, PlotIntent, PlotState};
use crate::scene::SceneHost;

/// Orchestriert Intents und Handler auf dem `PlotState`.
#[derive(Default)]
pub struct PlotController;

impl PlotController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut PlotState,
        host: &mut dyn SceneHost,
        intent: PlotIntent,
    ) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, host, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &PlotState, intent: PlotIntent) -> Vec<PlotCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem PlotState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut PlotState,
        host: &mut dyn SceneHost,
        command: PlotCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Zeichnen ===
            PlotCommand::BeginDraw {
                kind,
                representation,
                attributes,
            } => handlers::draw::begin(state, host, kind, representation, attributes),
            PlotCommand::RoutePointer { event } => handlers::draw::route_pointer(state, host, event),
            PlotCommand::TickDraw { now_ms } => handlers::draw::tick(state, host, now_ms),
            PlotCommand::EndDraw => handlers::draw::end(state, host),
            PlotCommand::CancelDraw { force } => handlers::draw::cancel(state, host, force),

            // === Bearbeiten ===
            PlotCommand::BeginEdit { shape_id } => handlers::edit::begin(state, host, shape_id)?,
            PlotCommand::EndEdit => handlers::edit::end(state, host),
            PlotCommand::SetEditPositions { positions } => {
                handlers::edit::set_positions(state, host, positions)?
            }
            PlotCommand::RemoveEditPoint { index } => {
                handlers::edit::remove_point(state, host, index)?
            }

            // === Sammlung & Optionen ===
            PlotCommand::DeleteShape { shape_id } => handlers::shapes::delete(state, shape_id),
            PlotCommand::ConvertShapeToRetained { shape_id } => {
                handlers::shapes::convert_to_retained(state, shape_id)
            }
            PlotCommand::ApplyOptions { options } => handlers::shapes::apply_options(state, *options),

            // === History ===
            PlotCommand::Undo => handlers::history::undo(state),
            PlotCommand::Redo => handlers::history::redo(state),
        }

        Ok(())
    }
}
