use crate::{
    board::Registers,
    regs::{bit, Reg},
};
use common::values::Level;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Port {
    B,
    C,
    D,
}

impl Port {
    pub const fn ddr(self) -> Reg {
        match self {
            Port::B => Reg::Ddrb,
            Port::C => Reg::Ddrc,
            Port::D => Reg::Ddrd,
        }
    }
    pub const fn port(self) -> Reg {
        match self {
            Port::B => Reg::Portb,
            Port::C => Reg::Portc,
            Port::D => Reg::Portd,
        }
    }
}

/// Push-pull output on one port bit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OutputPin {
    port: Port,
    pin: u8,
}

impl OutputPin {
    pub const fn new(port: Port, pin: u8) -> Self {
        assert!(pin < 8);
        Self { port, pin }
    }

    pub const fn port(&self) -> Port {
        self.port
    }
    pub const fn pin(&self) -> u8 {
        self.pin
    }

    /// Switches the pin direction to output. Other pins are left untouched.
    pub fn configure<R: Registers>(&self, regs: &mut R) {
        regs.set_bits(self.port.ddr(), bit(self.pin));
    }

    pub fn set_level<R: Registers>(&self, regs: &mut R, level: Level) {
        match level {
            Level::High => regs.set_bits(self.port.port(), bit(self.pin)),
            Level::Low => regs.clear_bits(self.port.port(), bit(self.pin)),
        }
    }
}
