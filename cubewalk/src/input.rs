use winit::event::VirtualKeyCode;

/// Movement keys held down this frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub w: bool,
    pub a: bool,
    pub s: bool,
    pub d: bool,
    pub space: bool,
}

impl KeyState {
    pub fn apply(&mut self, key: VirtualKeyCode, pressed: bool) {
        match key {
            VirtualKeyCode::W => self.w = pressed,
            VirtualKeyCode::A => self.a = pressed,
            VirtualKeyCode::S => self.s = pressed,
            VirtualKeyCode::D => self.d = pressed,
            VirtualKeyCode::Space => self.space = pressed,
            _ => {}
        }
    }

    pub fn any_movement(&self) -> bool {
        self.w || self.a || self.s || self.d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_press_and_release() {
        let mut keys = KeyState::default();

        keys.apply(VirtualKeyCode::W, true);
        keys.apply(VirtualKeyCode::Space, true);
        assert!(keys.w && keys.space);
        assert!(keys.any_movement());

        keys.apply(VirtualKeyCode::W, false);
        assert!(!keys.w);
        assert!(!keys.any_movement());

        // Unmapped keys are ignored.
        keys.apply(VirtualKeyCode::F12, true);
        assert_eq!(
            keys,
            KeyState {
                space: true,
                ..Default::default()
            }
        );
    }
}
