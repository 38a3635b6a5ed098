mod departure;
mod registry;

pub use departure::*;
pub use registry::*;
