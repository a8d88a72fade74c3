use core::panic::PanicInfo;

/// Nothing to report to, so spin until the watchdog or the user resets the board.
#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    loop {
        core::hint::spin_loop();
    }
}
