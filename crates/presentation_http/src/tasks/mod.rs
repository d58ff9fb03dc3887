//! Background tasks for the HTTP presentation layer

mod retention_sweep;

pub use retention_sweep::RetentionSweeper;
