//! Register snapshot for the panic reporter.

use klibc::printf::{ByteSink, Value, format};

/// General-purpose register snapshot, in dump order.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Regs {
    pub t: [u64; 7],
    pub s: [u64; 12],
    pub a: [u64; 8],
    pub zero: u64,
    pub ra: u64,
    pub sp: u64,
    pub gp: u64,
    pub tp: u64,
}

#[cfg(target_arch = "riscv64")]
macro_rules! read_reg {
    ($reg:literal) => {{
        let value: u64;
        unsafe { core::arch::asm!(concat!("mv {0}, ", $reg), out(reg) value) };
        value
    }};
}

impl Regs {
    /// Captures the caller's register state. On non-RISC-V hosts the
    /// snapshot is all zeros.
    #[cfg(target_arch = "riscv64")]
    #[inline(always)]
    pub fn save() -> Regs {
        Regs {
            t: [
                read_reg!("t0"),
                read_reg!("t1"),
                read_reg!("t2"),
                read_reg!("t3"),
                read_reg!("t4"),
                read_reg!("t5"),
                read_reg!("t6"),
            ],
            s: [
                read_reg!("s0"),
                read_reg!("s1"),
                read_reg!("s2"),
                read_reg!("s3"),
                read_reg!("s4"),
                read_reg!("s5"),
                read_reg!("s6"),
                read_reg!("s7"),
                read_reg!("s8"),
                read_reg!("s9"),
                read_reg!("s10"),
                read_reg!("s11"),
            ],
            a: [
                read_reg!("a0"),
                read_reg!("a1"),
                read_reg!("a2"),
                read_reg!("a3"),
                read_reg!("a4"),
                read_reg!("a5"),
                read_reg!("a6"),
                read_reg!("a7"),
            ],
            zero: 0,
            ra: read_reg!("ra"),
            sp: read_reg!("sp"),
            gp: read_reg!("gp"),
            tp: read_reg!("tp"),
        }
    }

    #[cfg(not(target_arch = "riscv64"))]
    pub fn save() -> Regs {
        Regs::default()
    }

    /// Dumps the snapshot through the format engine, three columns per row.
    pub fn print(&self, sink: &mut dyn ByteSink) -> usize {
        let mut written = 0;
        written += print_bank(sink, b"t", &self.t);
        written += print_bank(sink, b"s", &self.s);
        written += print_bank(sink, b"a", &self.a);
        written += format(b"zero=0x%08x\t", &[Value::Uint(self.zero)], sink);
        written += format(b"ra  =0x%08x\t", &[Value::Uint(self.ra)], sink);
        written += format(b"sp  =0x%08x\t\n", &[Value::Uint(self.sp)], sink);
        written += format(b"gp  =0x%08x\t", &[Value::Uint(self.gp)], sink);
        written += format(b"tp  =0x%08x\t\n", &[Value::Uint(self.tp)], sink);
        written
    }
}

fn print_bank(sink: &mut dyn ByteSink, name: &[u8], bank: &[u64]) -> usize {
    let mut written = 0;
    let last = bank.len() - 1;
    for (i, &value) in bank.iter().enumerate() {
        written += format(
            b"%s%-3d=0x%08x\t",
            &[Value::Str(name), Value::Int(i as i64), Value::Uint(value)],
            sink,
        );
        if i % 3 > 1 || i == last {
            written += format(b"\n", &[], sink);
        }
    }
    written
}
