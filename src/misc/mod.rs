pub mod floating_point;
pub mod grid;
pub mod sense;

pub use floating_point::*;
pub use grid::*;
pub use sense::*;
