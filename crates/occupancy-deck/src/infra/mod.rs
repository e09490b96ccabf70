//! Infrastructure adapters for config, logging, and presentation output.

pub mod config;
pub mod logging;
pub mod pptx;
