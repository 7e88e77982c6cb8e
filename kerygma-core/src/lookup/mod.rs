//! Lookup orchestration over the external generator

pub mod mock;
mod orchestrator;
mod traits;

pub use mock::MockGenerator;
pub use orchestrator::Lookup;
pub use traits::Generator;
