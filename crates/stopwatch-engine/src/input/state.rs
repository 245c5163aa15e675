use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent};

/// Current input state for the window.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,
    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies `ev` and records the resulting transitions into `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered after focus moves away.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => self.pointer_pos = Some((*x, *y)),

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.push(*key);
                    }
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some((*x, *y));
                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.push(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.push(*button);
                        }
                    }
                }
            }
        }

        frame.events.push(ev);
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, repeat }
    }

    fn left(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent { button: MouseButton::Left, state, x, y })
    }

    #[test]
    fn held_key_is_pressed_once() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, key(Key::Space, KeyState::Pressed, false));
        s.apply_event(&mut f, key(Key::Space, KeyState::Pressed, true));
        assert_eq!(f.keys_pressed, vec![Key::Space]);
        assert_eq!(f.events.len(), 2);
        assert!(s.keys_down.contains(&Key::Space));

        s.apply_event(&mut f, key(Key::Space, KeyState::Released, false));
        assert!(!s.keys_down.contains(&Key::Space));
    }

    #[test]
    fn presses_keep_arrival_order() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, key(Key::R, KeyState::Pressed, false));
        s.apply_event(&mut f, key(Key::Space, KeyState::Pressed, false));
        assert_eq!(f.keys_pressed, vec![Key::R, Key::Space]);
    }

    #[test]
    fn button_events_move_the_pointer() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, left(MouseButtonState::Pressed, 10.0, 20.0));
        assert_eq!(s.pointer_pos, Some((10.0, 20.0)));
        assert!(s.button_down(MouseButton::Left));
        s.apply_event(&mut f, left(MouseButtonState::Released, 11.0, 21.0));
        assert_eq!(f.buttons_pressed, vec![MouseButton::Left]);
        assert_eq!(f.buttons_released, vec![MouseButton::Left]);
    }

    #[test]
    fn unmatched_release_is_not_a_transition() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, left(MouseButtonState::Released, 0.0, 0.0));
        assert!(f.buttons_released.is_empty());
    }

    #[test]
    fn focus_loss_clears_held_input() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, key(Key::S, KeyState::Pressed, false));
        s.apply_event(&mut f, left(MouseButtonState::Pressed, 1.0, 1.0));
        s.apply_event(&mut f, InputEvent::Focused(false));
        assert!(s.keys_down.is_empty());
        assert!(s.buttons_down.is_empty());
    }

    #[test]
    fn pointer_leave_forgets_position() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, InputEvent::PointerMoved { x: 3.0, y: 4.0 });
        s.apply_event(&mut f, InputEvent::PointerLeft);
        assert_eq!(s.pointer_pos, None);
        f.clear();
        assert!(f.is_empty());
    }
}
