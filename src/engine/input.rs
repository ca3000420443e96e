/// Logical inputs the demo reacts to. Raw key codes map onto these; any other
/// key is ignored.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputCode {
    MoveLeft,
    MoveRight,
    Jump,
    Attack,
    Run,
}

impl InputCode {
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(InputCode::MoveLeft),
            "ArrowRight" => Some(InputCode::MoveRight),
            "Space" => Some(InputCode::Jump),
            "KeyA" => Some(InputCode::Attack),
            "KeyD" => Some(InputCode::Run),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Latest pressed/released flag per input. Only the last write is kept, so
/// several presses between two reads look like one.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    pressed: [bool; 5],
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, code: InputCode, pressed: bool) {
        self.pressed[code.index()] = pressed;
    }

    pub fn is_pressed(&self, code: InputCode) -> bool {
        self.pressed[code.index()]
    }

    /// Feeds a raw `KeyboardEvent.code`; returns false when it was ignored.
    pub fn apply_key_event(&mut self, key_code: &str, pressed: bool) -> bool {
        match InputCode::from_key_code(key_code) {
            Some(code) => {
                self.set(code, pressed);
                true
            }
            None => false,
        }
    }

    pub fn any_movement(&self) -> bool {
        self.is_pressed(InputCode::MoveLeft) || self.is_pressed(InputCode::MoveRight)
    }
}
