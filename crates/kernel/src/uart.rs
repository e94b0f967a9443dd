//! Single-byte hardware sink: the memory-mapped UART transmit register.

use klibc::printf::{ByteSink, SinkError, Value};
use klibc::stdio;
use spin::Mutex;

#[cfg(target_arch = "riscv64")]
const UART0_TX: *mut u8 = 0x1000_0000 as *mut u8;

/// Handle to the transmit register. Zero-sized; every write goes straight to
/// the hardware, one byte at a time.
pub struct Uart;

impl Uart {
    #[cfg(target_arch = "riscv64")]
    fn put_byte(&mut self, byte: u8) {
        unsafe { core::ptr::write_volatile(UART0_TX, byte) }
    }

    #[cfg(not(target_arch = "riscv64"))]
    fn put_byte(&mut self, _byte: u8) {}
}

impl ByteSink for Uart {
    fn write(&mut self, buf: &[u8]) -> Result<usize, SinkError> {
        for &byte in buf {
            self.put_byte(byte);
        }
        Ok(buf.len())
    }
}

/// Global console handle. The panic path deliberately bypasses this lock and
/// uses a fresh `Uart` so a panic under a held lock still reports.
pub static CONSOLE: Mutex<Uart> = Mutex::new(Uart);

/// Formatted output on the console.
pub fn console_printf(fmt: &[u8], args: &[Value<'_>]) -> usize {
    stdio::printf_to(&mut *CONSOLE.lock(), fmt, args)
}

pub fn console_puts(s: &[u8]) {
    let _ = stdio::put_str(&mut *CONSOLE.lock(), s);
}
