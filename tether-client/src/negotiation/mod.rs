mod negotiation;
mod negotiation_state;
mod remote_description;

pub use negotiation::*;
pub use negotiation_state::*;
pub use remote_description::*;
