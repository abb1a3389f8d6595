use super::Cpu;

/// Register file of the LR35902.
///
/// The eight 8-bit registers pair up as AF, BC, DE and HL. F only ever holds
/// the four flag bits and is only reachable through the masking accessors.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Registers {
    pub a: u8,
    f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

/// `name()` / `set_name()` accessors for a big-endian register pair.
macro_rules! register_pair {
    ($get:ident, $set:ident, $hi:ident, $lo:ident) => {
        #[inline]
        pub fn $get(&self) -> u16 {
            u16::from_be_bytes([self.$hi, self.$lo])
        }

        #[inline]
        pub fn $set(&mut self, value: u16) {
            [self.$hi, self.$lo] = value.to_be_bytes();
        }
    };
}

impl Registers {
    /// Values at the hand-off to cartridge code at 0x0100, DMG column of the
    /// Pan Docs power-up table.
    pub const POST_BOOT: Registers = Registers {
        a: 0x01,
        f: 0xB0,
        b: 0x00,
        c: 0x13,
        d: 0x00,
        e: 0xD8,
        h: 0x01,
        l: 0x4D,
        sp: 0xFFFE,
        pc: 0x0100,
    };

    #[inline]
    pub fn f(&self) -> u8 {
        self.f
    }

    register_pair!(bc, set_bc, b, c);
    register_pair!(de, set_de, d, e);
    register_pair!(hl, set_hl, h, l);

    /// AF as pushed to the stack; F's low nibble reads as zero.
    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f & 0xF0])
    }

    /// POP AF and friends: the low nibble written to F is discarded.
    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.f = f & 0xF0;
    }
}

/// Flag bits in F, by bit index.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

impl Flag {
    #[inline]
    const fn mask(self) -> u8 {
        1 << self as u8
    }
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.regs.f & flag.mask() != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        if value {
            self.regs.f |= flag.mask();
        } else {
            self.regs.f &= !flag.mask();
        }
    }

    /// Overwrites Z, N, H and C in one go.
    #[inline]
    pub(super) fn set_flags(&mut self, z: bool, n: bool, h: bool, c: bool) {
        self.regs.f = [(Flag::Z, z), (Flag::N, n), (Flag::H, h), (Flag::C, c)]
            .into_iter()
            .filter(|&(_, on)| on)
            .fold(0, |f, (flag, _)| f | flag.mask());
    }
}
