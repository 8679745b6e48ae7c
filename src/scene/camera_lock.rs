//! Sperre der Kamera-Eingaben während eines Dragger-Drags.

use super::{CameraInput, SceneHost};

/// Gehaltene Sperre aller Kamera-Eingabekanäle.
///
/// Wird beim Greifen eines Draggers erworben und muss über
/// [`CameraInputLock::release`] freigegeben werden (Pointer-Up oder
/// Session-Ende). Freigabe stellt den vorherigen Zustand jedes Kanals her.
#[must_use = "Kamera-Sperre muss mit release() freigegeben werden"]
#[derive(Debug)]
pub struct CameraInputLock {
    previous: [(CameraInput, bool); 4],
    released: bool,
}

impl CameraInputLock {
    /// Sperrt Drehen, Neigen, Verschieben und alle übrigen Eingaben.
    pub fn acquire(host: &mut dyn SceneHost) -> Self {
        let previous = CameraInput::ALL.map(|input| (input, host.camera_input_enabled(input)));
        for input in CameraInput::ALL {
            host.set_camera_input(input, false);
        }
        log::debug!("Kamera-Eingaben gesperrt");
        Self {
            previous,
            released: false,
        }
    }

    /// Stellt den Zustand vor dem Erwerb wieder her.
    pub fn release(mut self, host: &mut dyn SceneHost) {
        for (input, enabled) in self.previous {
            host.set_camera_input(input, enabled);
        }
        self.released = true;
        log::debug!("Kamera-Eingaben freigegeben");
    }
}

impl Drop for CameraInputLock {
    fn drop(&mut self) {
        if !self.released {
            log::error!("Kamera-Sperre ohne Freigabe verworfen, Kamera bleibt gesperrt");
        }
    }
}
