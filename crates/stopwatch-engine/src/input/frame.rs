use super::types::{InputEvent, Key, MouseButton};

/// Input transitions collected since the last frame.
///
/// [`InputState`](super::InputState) holds what is currently down; this holds
/// what changed, in arrival order.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,
    /// Fresh key presses. Auto-repeat is not included.
    pub keys_pressed: Vec<Key>,
    pub buttons_pressed: Vec<MouseButton>,
    pub buttons_released: Vec<MouseButton>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
