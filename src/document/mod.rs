pub mod assembler;
pub mod writer;

pub use assembler::*;
pub use writer::*;
