/// Frontend-neutral input vocabulary consumed by `compute::handle_input`.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Escape,
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    /// Position in world units.
    MouseDown { button: MouseButton, x: i32, y: i32 },
}

impl Key {
    fn is_char(&self, c: char) -> bool {
        matches!(self, Key::Char(k) if k.eq_ignore_ascii_case(&c))
    }

    pub fn is_left(&self) -> bool {
        *self == Key::Left || self.is_char('a')
    }

    pub fn is_right(&self) -> bool {
        *self == Key::Right || self.is_char('d')
    }

    pub fn is_up(&self) -> bool {
        *self == Key::Up || self.is_char('w')
    }

    pub fn is_down(&self) -> bool {
        *self == Key::Down || self.is_char('s')
    }

    pub fn is_confirm(&self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }

    pub fn is_pause(&self) -> bool {
        *self == Key::Escape || self.is_char('p')
    }

    pub fn is_quit(&self) -> bool {
        self.is_char('q')
    }

    pub fn is_restart(&self) -> bool {
        self.is_char('r')
    }

    pub fn is_menu(&self) -> bool {
        *self == Key::Escape || self.is_char('m')
    }
}
