#![no_std]
#![no_main]

use mcu::{
    board::{real::RealBoard, Budget},
    tasks::Sensor,
};

#[no_mangle]
pub extern "C" fn main() -> ! {
    let board = match RealBoard::take() {
        Some(board) => board,
        None => panic!("register block already taken"),
    };
    let error = Sensor::new(board, Budget::Forever).run();
    panic!("{}", error)
}
