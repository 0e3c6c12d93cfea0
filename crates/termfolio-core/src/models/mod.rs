//! Data models for Termfolio

mod headline;
mod output;
mod section;

pub use headline::*;
pub use output::*;
pub use section::*;
