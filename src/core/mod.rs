//! Record types and errors shared by every stage of the pipeline.

mod error;
mod types;

pub use error::*;
pub use types::*;
