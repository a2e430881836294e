//! Collaborator abstraction trait definitions

mod clock;
mod signal_source;

pub use clock::{Clock, SystemClock};
pub use signal_source::{ReachabilityProbe, RegistrationSource};
