pub mod line;
pub mod schedule;

pub use line::*;
pub use schedule::*;
