//! Machine-mode control/status register access. Host builds read zeros and
//! drop writes so the rest of the crate stays testable anywhere.

macro_rules! csr_read_fn {
    ($fn_name:ident, $csr:literal) => {
        #[inline(always)]
        pub fn $fn_name() -> u64 {
            #[cfg(target_arch = "riscv64")]
            {
                let value: u64;
                unsafe { core::arch::asm!(concat!("csrr {0}, ", $csr), out(reg) value) };
                value
            }
            #[cfg(not(target_arch = "riscv64"))]
            {
                0
            }
        }
    };
}

csr_read_fn!(read_mcause, "mcause");
csr_read_fn!(read_mepc, "mepc");
csr_read_fn!(read_mtval, "mtval");
csr_read_fn!(read_mhartid, "mhartid");
csr_read_fn!(read_mstatus, "mstatus");

#[inline(always)]
pub fn write_mtvec(addr: u64) {
    #[cfg(target_arch = "riscv64")]
    unsafe {
        core::arch::asm!("csrw mtvec, {0}", in(reg) addr)
    };
    #[cfg(not(target_arch = "riscv64"))]
    let _ = addr;
}
