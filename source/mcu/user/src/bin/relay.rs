#![no_std]
#![no_main]

use mcu::{board::real::RealBoard, tasks::Relay};

#[no_mangle]
pub extern "C" fn main() -> ! {
    let board = match RealBoard::take() {
        Some(board) => board,
        None => panic!("register block already taken"),
    };
    Relay::new(board).run()
}
