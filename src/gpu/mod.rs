//! GPU-конвейер вычислений

mod multiplier;

pub use multiplier::GpuMultiplier;
