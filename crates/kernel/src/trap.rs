//! Trap-vector installation and the exception/interrupt dispatcher.

use klibc::printf::Value;

use crate::csr;
use crate::panic::panic_report;
use crate::uart;

const CAUSE_INT_MASK: u64 = 0x8000_0000;
const CAUSE_CODE_MASK: u64 = 0x7fff_ffff;

/// Canonical exception descriptions, indexed by cause code. Reserved codes
/// are `None`.
const EXCEPTION_DESCS: [Option<&[u8]>; 16] = [
    Some(b"Instruction address misaligned"),
    Some(b"Instruction access fault"),
    Some(b"Illegal instruction"),
    Some(b"Breakpoint"),
    Some(b"Load address misaligned"),
    Some(b"Load access fault"),
    Some(b"Store/AMO address misaligned"),
    Some(b"Store/AMO access fault"),
    Some(b"Environment call from U-mode"),
    Some(b"Environment call from S-mode"),
    None,
    Some(b"Environment call from M-mode"),
    Some(b"Instruction page fault"),
    Some(b"Load page fault"),
    None,
    Some(b"Store/AMO page fault"),
];

pub fn describe_exception(code: u64) -> &'static [u8] {
    EXCEPTION_DESCS
        .get(code as usize)
        .copied()
        .flatten()
        .unwrap_or(b"unknown")
}

/// Points the trap vector at the dispatcher.
pub fn install_trap_vector() {
    csr::write_mtvec(trap_handler as usize as u64);
}

/// Trap dispatcher. Interrupts are logged and ignored; exceptions report
/// through the panic path and never return.
#[unsafe(no_mangle)]
pub extern "C" fn trap_handler() {
    let cause = csr::read_mcause();
    let code = cause & CAUSE_CODE_MASK;

    if cause & CAUSE_INT_MASK != 0 {
        uart::console_printf(b"int: cause_code=0x%016llx\n", &[Value::Uint(code)]);
        return;
    }

    let hartid = csr::read_mhartid();
    let epc = csr::read_mepc();
    let tval = csr::read_mtval();
    panic_report(
        b"exception on hart %d at 0x%llx: %s (cause=%lld, tval=0x%llx)",
        &[
            Value::Int(hartid as i64),
            Value::Uint(epc),
            Value::Str(describe_exception(code)),
            Value::Int(code as i64),
            Value::Uint(tval),
        ],
    );
}
