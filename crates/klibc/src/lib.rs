#![no_std]

pub mod ctype;
pub mod string;

pub mod strtoint;
pub use strtoint::{IntBounds, IntParse, IntStatus, parse_int};

pub mod convspec;
pub use convspec::{Conv, ConvFlags, ConvSpec, LengthMod, SpecError, Token};

pub mod printf;
pub use printf::{ByteSink, SinkError, Value, format};

pub mod stdio;
