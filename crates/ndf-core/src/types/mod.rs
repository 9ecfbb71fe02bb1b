mod ndf;
mod target;

pub use ndf::*;
pub use target::*;
