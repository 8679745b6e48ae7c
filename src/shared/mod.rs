//! Geteilte, layer-neutrale Typen und Hilfsfunktionen.
//!
//! Wird von `core`, `scene` und `app` gleichermaßen genutzt,
//! ohne eine Abhängigkeit zwischen diesen Schichten zu erzeugen.

pub mod options;
pub mod spline_geometry;

pub use options::EditorOptions;
