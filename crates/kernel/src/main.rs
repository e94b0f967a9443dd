#![no_std]
#![no_main]

use kernel::panic::panic_report;
use kernel::trap;
use kernel::uart;

/// Machine-mode entrypoint. Installs the trap vector, announces the boot and
/// runs `init()`.
#[unsafe(no_mangle)]
pub extern "C" fn _start() -> ! {
    trap::install_trap_vector();
    uart::console_puts(b"kernel boot\n");
    init()
}

/// Bring-up smoke test: reaching this far is itself the milestone, so init
/// reports and halts.
fn init() -> ! {
    panic_report(b"init() has run", &[])
}
