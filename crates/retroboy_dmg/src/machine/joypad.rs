/// Joypad buttons.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

/// P1/JOYP (FF00). Pressed buttons are tracked with bit=1 and inverted on
/// read, since the register is active-low.
pub(super) struct Joypad {
    /// Bits 5 (buttons) and 4 (d-pad); 0 selects the group.
    select: u8,
    /// bit0=A, bit1=B, bit2=Select, bit3=Start.
    buttons: u8,
    /// bit0=Right, bit1=Left, bit2=Up, bit3=Down.
    dpad: u8,
}

impl Joypad {
    pub(super) fn new() -> Self {
        Self {
            select: 0x30,
            buttons: 0x00,
            dpad: 0x00,
        }
    }

    pub(super) fn read(&self) -> u8 {
        let mut low = 0x0F;
        if self.select & 0x10 == 0 {
            low &= !self.dpad;
        }
        if self.select & 0x20 == 0 {
            low &= !self.buttons;
        }
        0xC0 | self.select | (low & 0x0F)
    }

    pub(super) fn write(&mut self, value: u8) {
        self.select = value & 0x30;
    }

    /// Update one button. Returns `true` on a press, which requests the
    /// joypad interrupt.
    pub(super) fn set(&mut self, button: Button, pressed: bool) -> bool {
        let (group, bit) = match button {
            Button::Right => (&mut self.dpad, 0),
            Button::Left => (&mut self.dpad, 1),
            Button::Up => (&mut self.dpad, 2),
            Button::Down => (&mut self.dpad, 3),
            Button::A => (&mut self.buttons, 0),
            Button::B => (&mut self.buttons, 1),
            Button::Select => (&mut self.buttons, 2),
            Button::Start => (&mut self.buttons, 3),
        };
        let mask = 1u8 << bit;
        let was_pressed = *group & mask != 0;
        if pressed {
            *group |= mask;
        } else {
            *group &= !mask;
        }
        pressed && !was_pressed
    }
}
