//! Panic reporter: formatted message, register dump, halt.

use klibc::printf::{Value, format};
use klibc::stdio;

use crate::regs::Regs;
use crate::uart::Uart;

/// Reports a fatal condition on the console and halts the hart. Uses a fresh
/// UART handle instead of the shared console lock so a panic raised while the
/// lock is held still gets out.
pub fn panic_report(fmt: &[u8], args: &[Value<'_>]) -> ! {
    let regs = Regs::save();
    let mut uart = Uart;

    let _ = stdio::put_str(&mut uart, b"panic: ");
    format(fmt, args, &mut uart);
    let _ = stdio::put_char(&mut uart, b'\n');
    regs.print(&mut uart);
    let _ = stdio::put_str(&mut uart, b"system halted\n");

    halt()
}

#[cfg(target_arch = "riscv64")]
fn halt() -> ! {
    loop {
        unsafe { core::arch::asm!("wfi") };
    }
}

#[cfg(not(target_arch = "riscv64"))]
fn halt() -> ! {
    // Host stand-in for the wfi loop, mirroring the hardware dead end.
    panic!("system halted");
}

/// Bare-metal panic handler: renders the panic message into a bounded local
/// buffer, then hands it to the reporter.
#[cfg(all(target_arch = "riscv64", not(test)))]
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    use core::fmt::Write;

    struct BufWriter<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl<'a> Write for BufWriter<'a> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let space = self.buf.len().saturating_sub(self.pos);
            let len = core::cmp::min(s.len(), space);
            self.buf[self.pos..self.pos + len].copy_from_slice(&s.as_bytes()[..len]);
            self.pos += len;
            Ok(())
        }
    }

    let mut buf = [0u8; 256];
    let mut writer = BufWriter { buf: &mut buf, pos: 0 };

    if let Some(location) = info.location() {
        let _ = write!(
            &mut writer,
            "{}:{}:{}: ",
            location.file(),
            location.line(),
            location.column()
        );
    }
    let _ = write!(&mut writer, "{}", info.message());

    let pos = writer.pos;
    panic_report(b"%s", &[Value::Str(&buf[..pos])]);
}
