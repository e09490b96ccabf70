pub mod assets;
pub mod builder;
pub mod export;
pub mod narrative;
