use crate::scene::camera::{CameraInput, PointerButtons};
use crate::scene::context::RenderSettings;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window};
use nalgebra::Vector2;

/// Function keys and the toggle each one flips.
const TOGGLE_KEYS: [(Key, fn(&mut RenderSettings)); 10] = [
    (Key::F1, RenderSettings::toggle_rasterizer_mode),
    (Key::F2, RenderSettings::toggle_rotation),
    (Key::F3, RenderSettings::toggle_fire),
    (Key::F4, RenderSettings::cycle_filter),
    (Key::F5, RenderSettings::cycle_shading_mode),
    (Key::F6, RenderSettings::toggle_normal_map),
    (Key::F7, RenderSettings::toggle_depth_view),
    (Key::F8, RenderSettings::toggle_bounding_box_view),
    (Key::F9, RenderSettings::cycle_cull_mode),
    (Key::F10, RenderSettings::toggle_uniform_background),
];

/// Turns raw window state into camera input and toggle changes.
#[derive(Debug, Default)]
pub struct InputMapper {
    last_mouse_pos: Option<(f32, f32)>,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polls movement keys, the boost modifier and relative pointer motion.
    pub fn camera_input(&mut self, window: &Window) -> CameraInput {
        let buttons = PointerButtons {
            left: window.get_mouse_down(MouseButton::Left),
            right: window.get_mouse_down(MouseButton::Right),
        };

        let mut pointer_delta = Vector2::zeros();
        match window.get_mouse_pos(MouseMode::Pass) {
            Some((x, y)) => {
                if let Some((last_x, last_y)) = self.last_mouse_pos {
                    pointer_delta = Vector2::new(x - last_x, y - last_y);
                }
                self.last_mouse_pos = Some((x, y));
            }
            None => self.last_mouse_pos = None,
        }

        CameraInput {
            forward: window.is_key_down(Key::W),
            backward: window.is_key_down(Key::S),
            left: window.is_key_down(Key::A),
            right: window.is_key_down(Key::D),
            boost: window.is_key_down(Key::LeftShift),
            pointer_delta,
            buttons,
        }
    }

    /// Applies every toggle whose key went down this frame.
    pub fn apply_toggles(&self, window: &Window, settings: &mut RenderSettings) {
        for (key, toggle) in TOGGLE_KEYS {
            if window.is_key_pressed(key, KeyRepeat::No) {
                toggle(settings);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_function_key_is_bound_once() {
        let mut keys: Vec<_> = TOGGLE_KEYS.iter().map(|(k, _)| *k as u32).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), TOGGLE_KEYS.len());
    }

    #[test]
    fn test_bound_toggles_change_settings() {
        let mut settings = RenderSettings::default();
        let (_, toggle_depth) = TOGGLE_KEYS[6];
        toggle_depth(&mut settings);
        assert!(settings.depth_view);
    }
}
