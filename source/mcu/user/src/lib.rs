#![no_std]

pub mod error;
pub use error::Error;

pub mod adc;
pub mod board;
pub mod gpio;
pub mod regs;
pub mod tasks;
pub mod usart;

#[cfg(feature = "panic")]
mod panic;
