#[cfg(feature = "real")]
pub mod real;

#[cfg(any(test, feature = "fake"))]
pub mod emul;

use crate::{regs::Reg, Error};

/// Byte-wide access to the memory-mapped peripheral registers.
///
/// Reads take `&mut self` because hardware reads can have side effects
/// (e.g. reading `ADCL` latches `ADCH`).
pub trait Registers {
    fn read(&mut self, reg: Reg) -> u8;
    fn write(&mut self, reg: Reg, value: u8);

    fn modify<F: FnOnce(u8) -> u8>(&mut self, reg: Reg, f: F) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }
    fn set_bits(&mut self, reg: Reg, mask: u8) {
        self.modify(reg, |v| v | mask);
    }
    fn clear_bits(&mut self, reg: Reg, mask: u8) {
        self.modify(reg, |v| v & !mask);
    }
}

/// Coarse blocking delay.
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);
}

pub trait Board: Registers + Delay {}
impl<T: Registers + Delay> Board for T {}

/// How many times a busy-wait may poll before giving up.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Budget {
    /// Trust the hardware and wait as long as it takes.
    #[default]
    Forever,
    Polls(usize),
}

/// Polls `reg` until `done` holds for its value and returns that value.
///
/// The register is read at least once. With [`Budget::Forever`] this never
/// returns an error.
pub fn poll_until<R, F>(regs: &mut R, reg: Reg, budget: Budget, mut done: F) -> Result<u8, Error>
where
    R: Registers + ?Sized,
    F: FnMut(u8) -> bool,
{
    let mut polls = 0usize;
    loop {
        let value = regs.read(reg);
        if done(value) {
            return Ok(value);
        }
        // Counted only when bounded, `usize` is 16 bits on AVR.
        if let Budget::Polls(max) = budget {
            polls += 1;
            if polls >= max {
                return Err(Error::TimedOut { reg });
            }
        }
        core::hint::spin_loop();
    }
}
