pub mod buffer;
pub mod memory;
pub mod traits;

pub use buffer::*;
pub use memory::*;
pub use traits::*;
