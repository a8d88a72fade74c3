#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod protocol;
pub mod values;
