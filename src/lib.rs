//! Scene Plot Editor Library.
//! Zeichnen und Bearbeiten geometrischer Formen in einer 3D-Szene; der
//! Renderer bleibt hinter dem `SceneHost`-Trait.

pub mod app;
pub mod core;
pub mod scene;
pub mod shared;

pub use crate::app::{
    DeleteOutcome, DrawController, DrawOutcome, EditController, PlotCommand, PlotController,
    PlotIntent, PlotState, PointerEvent, ReplayReport, Scenario,
};
pub use crate::core::{
    DraggerType, PlotEvent, Representation, Shape, ShapeAttributes, ShapeCollection, ShapeConfig,
    ShapeId, ShapeKind, ShapeSnapshot,
};
pub use crate::scene::{FlatScene, FlatSceneConfig, SceneHost};
pub use crate::shared::EditorOptions;
