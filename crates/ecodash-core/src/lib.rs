pub mod aggregate;
pub mod columns;
pub mod config;
pub mod correlation;
pub mod cumulative;
pub mod derived;
pub mod error;
pub mod events;
pub mod filters;
mod frame;
pub mod growth;
pub mod pages;
pub mod palette;
pub mod reshape;

pub use derived::Derived;
pub use error::{PipelineError, Result};
