#![no_std]

pub mod csr;
pub mod panic;
pub mod regs;
pub mod trap;
pub mod uart;

pub use regs::Regs;
pub use uart::Uart;
