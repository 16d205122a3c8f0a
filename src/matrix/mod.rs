//! Модуль для работы с матрицами
//!
//! Предоставляет:
//! - Тип квадратной матрицы
//! - Генерацию пар случайных матриц
//! - Эталонное CPU-умножение и сравнение результатов

pub mod generate;
pub mod operations;
mod types;

pub use generate::generate_pair;
pub use operations::{compare_results, cpu_matrix_multiply};
pub use types::Matrix;
