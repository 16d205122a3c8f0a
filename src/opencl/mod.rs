//! Модуль для работы с OpenCL
//!
//! Содержит низкоуровневые привязки, типы, таксономию ошибок и
//! загрузку исходного кода ядра.

pub mod bindings;
pub mod error;
pub mod source;
pub mod types;

pub use error::GpuError;
pub use source::{load_kernel_source, MAX_SOURCE_SIZE};
