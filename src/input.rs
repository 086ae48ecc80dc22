use std::collections::HashSet;

use glam::Vec2;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

/// The current state of the keyboard.
#[derive(Default)]
pub struct KeyboardState {
    pub down: HashSet<Keycode>,
}

/// The current state of the mouse.
#[derive(Default)]
pub struct MouseState {
    /// Relative motion since the start of the frame.
    pub delta: Vec2,
}

/// Keyboard and mouse state accumulated over one frame.
#[derive(Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    pub quit: bool,
}

impl InputState {
    /// Clears the per-frame parts of the state. Held keys stay held.
    pub fn begin_frame(&mut self) {
        self.mouse.delta = Vec2::ZERO;
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Quit { .. } => self.quit = true,
            Event::KeyDown {
                keycode: Some(Keycode::Escape),
                ..
            } => self.quit = true,
            Event::KeyDown {
                keycode: Some(keycode),
                ..
            } => {
                self.keyboard.down.insert(*keycode);
            }
            Event::KeyUp {
                keycode: Some(keycode),
                ..
            } => {
                self.keyboard.down.remove(keycode);
            }
            Event::MouseMotion { xrel, yrel, .. } => {
                self.mouse.delta += Vec2::new(*xrel as f32, *yrel as f32);
            }
            _ => {}
        }
    }

    pub fn is_down(&self, key: Keycode) -> bool {
        self.keyboard.down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use sdl2::keyboard::Mod;

    use super::*;

    fn key_down(keycode: Keycode, repeat: bool) -> Event {
        Event::KeyDown {
            timestamp: 0,
            window_id: 0,
            keycode: Some(keycode),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat,
        }
    }

    fn key_up(keycode: Keycode) -> Event {
        Event::KeyUp {
            timestamp: 0,
            window_id: 0,
            keycode: Some(keycode),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat: false,
        }
    }

    #[test]
    fn test_escape_and_quit_end_the_loop() {
        let mut input = InputState::default();
        input.handle_event(&key_down(Keycode::Escape, false));
        assert!(input.quit);

        let mut input = InputState::default();
        input.handle_event(&Event::Quit { timestamp: 0 });
        assert!(input.quit);
    }

    #[test]
    fn test_held_keys_survive_frames() {
        let mut input = InputState::default();
        input.handle_event(&key_down(Keycode::W, false));
        assert!(input.is_down(Keycode::W));

        input.begin_frame();
        assert!(input.is_down(Keycode::W));
        input.handle_event(&key_down(Keycode::W, true));
        assert!(input.is_down(Keycode::W));

        input.handle_event(&key_up(Keycode::W));
        assert!(!input.is_down(Keycode::W));
    }
}
