use super::{Delay, Registers};
use crate::regs::Reg;
use common::config::CPU_FREQ_HZ;
use core::{
    hint::black_box,
    ptr::{read_volatile, write_volatile},
    sync::atomic::{AtomicBool, Ordering},
};

static ACQUIRED: AtomicBool = AtomicBool::new(false);

/// Takes the register block. Returns `None` if it was already taken.
///
/// The images run no interrupts, so a plain load/store pair is enough here.
pub fn handle() -> Option<Mmio> {
    if ACQUIRED.load(Ordering::Acquire) {
        None
    } else {
        ACQUIRED.store(true, Ordering::Release);
        log::debug!("register block acquired");
        Some(Mmio { _unused: [] })
    }
}

/// Volatile access to the ATmega328P data space.
pub struct Mmio {
    _unused: [u8; 0],
}

impl Registers for Mmio {
    fn read(&mut self, reg: Reg) -> u8 {
        unsafe { read_volatile(reg.addr() as *const u8) }
    }
    fn write(&mut self, reg: Reg, value: u8) {
        unsafe { write_volatile(reg.addr() as *mut u8, value) }
    }
}

/// Calibrated spin delay.
///
/// Accuracy is only as good as [`BusyDelay::CYCLES_PER_ITER`].
pub struct BusyDelay {
    iters_per_ms: u32,
}

impl BusyDelay {
    /// Approximate cost of one spin iteration on AVR at `-Os`.
    pub const CYCLES_PER_ITER: u32 = 8;

    pub const fn new(cpu_freq_hz: u32) -> Self {
        Self {
            iters_per_ms: cpu_freq_hz / 1000 / Self::CYCLES_PER_ITER,
        }
    }
}

impl Default for BusyDelay {
    fn default() -> Self {
        Self::new(CPU_FREQ_HZ)
    }
}

impl Delay for BusyDelay {
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            let mut n = self.iters_per_ms;
            while black_box(n) > 0 {
                n -= 1;
            }
        }
    }
}

/// Register block plus delay, as owned by a flashed image.
pub struct RealBoard {
    regs: Mmio,
    delay: BusyDelay,
}

impl RealBoard {
    pub fn take() -> Option<Self> {
        handle().map(|regs| Self {
            regs,
            delay: BusyDelay::default(),
        })
    }
}

impl Registers for RealBoard {
    fn read(&mut self, reg: Reg) -> u8 {
        self.regs.read(reg)
    }
    fn write(&mut self, reg: Reg, value: u8) {
        self.regs.write(reg, value)
    }
}

impl Delay for RealBoard {
    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms)
    }
}
