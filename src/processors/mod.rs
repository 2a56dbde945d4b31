// quickmagick/src/processors/mod.rs
mod batch;

pub use batch::BatchProcessor;
