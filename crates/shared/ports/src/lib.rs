//! Crashsim Ports
//!
//! Port definitions (traits) for the crashsim strategy simulator.
//! These define the boundaries between domain logic and infrastructure.

mod error;
mod policy;
mod source;

pub use error::{EngineError, EngineResult, SourceError, SourceResult};
pub use policy::EscalationPolicy;
pub use source::MultiplierSource;
