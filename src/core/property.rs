//! Pro-Frame berechnete Werte für Render-Attribute.
//!
//! Der Renderer ruft `value()` einmal pro Frame auf. Während Zeichnen und
//! Bearbeiten hängt an der Property eine Closure, die den aktuellen Zustand
//! liest; danach wird sie per `freeze()` auf einen statischen Wert reduziert.

use std::fmt;
use std::rc::Rc;

/// Render-Attribut: statisch oder pro Frame neu berechnet.
pub enum Property<T> {
    /// Fester Wert (abgeschlossene Form)
    Constant(T),
    /// Funktion ohne Argumente, wird pro Render-Tick neu ausgewertet
    Computed(Rc<dyn Fn() -> T>),
}

impl<T: Clone> Property<T> {
    /// Erstellt eine berechnete Property aus einer Closure.
    pub fn computed(f: impl Fn() -> T + 'static) -> Self {
        Property::Computed(Rc::new(f))
    }

    /// Liefert den aktuellen Wert (bei `Computed` frisch ausgewertet).
    pub fn value(&self) -> T {
        match self {
            Property::Constant(value) => value.clone(),
            Property::Computed(f) => f(),
        }
    }

    /// Gibt `true` zurück, wenn der Wert pro Frame neu berechnet wird.
    pub fn is_computed(&self) -> bool {
        matches!(self, Property::Computed(_))
    }

    /// Wertet eine berechnete Property ein letztes Mal aus und hält das Ergebnis fest.
    pub fn freeze(&mut self) {
        if let Property::Computed(f) = self {
            let value = f();
            *self = Property::Constant(value);
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        match self {
            Property::Constant(value) => Property::Constant(value.clone()),
            Property::Computed(f) => Property::Computed(Rc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Property::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_computed_property_wird_pro_aufruf_neu_ausgewertet() {
        let source = Rc::new(Cell::new(1));
        let captured = Rc::clone(&source);
        let prop = Property::computed(move || captured.get() * 10);

        assert_eq!(prop.value(), 10);
        source.set(4);
        assert_eq!(prop.value(), 40);
        assert!(prop.is_computed());
    }

    #[test]
    fn test_freeze_haelt_letzten_wert_fest() {
        let source = Rc::new(Cell::new(2));
        let captured = Rc::clone(&source);
        let mut prop = Property::computed(move || captured.get());

        prop.freeze();
        source.set(99);

        assert!(!prop.is_computed());
        assert_eq!(prop.value(), 2);
    }

    #[test]
    fn test_freeze_auf_constant_ist_noop() {
        let mut prop = Property::Constant(7);
        prop.freeze();
        assert_eq!(prop.value(), 7);
    }
}
