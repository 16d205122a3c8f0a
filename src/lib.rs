//! Бенчмарк умножения квадратных матриц на GPU через OpenCL
//!
//! GPU-вариант сверяется с эталонной CPU-реализацией, время подготовки
//! конвейера и каждой фазы вычислений замеряется отдельно.

pub mod gpu;
pub mod matrix;
pub mod opencl;
pub mod utils;

// Реэкспортируем макросы на уровень крейта
#[macro_use]
mod macros {
    /// Макрос для обработки ошибок OpenCL (коды возврата)
    ///
    /// Код, не равный `CL_SUCCESS`, заворачивается в вариант таксономии,
    /// переданный вторым аргументом.
    #[macro_export]
    macro_rules! cl_check {
        ($expr:expr, $err:expr) => {{
            let code = unsafe { $expr };
            if code != $crate::opencl::types::CL_SUCCESS {
                Err($err(code))
            } else {
                Ok(())
            }
        }};
    }

    /// Макрос для вызовов, создающих объект OpenCL
    ///
    /// Код ошибки возвращается через out-параметр, поэтому проверяются
    /// и статус, и сам указатель.
    #[macro_export]
    macro_rules! cl_create {
        ($expr:expr, $status:ident, $err:expr) => {{
            let obj = unsafe { $expr };
            if $status != $crate::opencl::types::CL_SUCCESS || obj.is_null() {
                Err($err($status))
            } else {
                Ok(obj)
            }
        }};
    }
}

// Реэкспорт основных типов для удобства
pub use matrix::Matrix;
pub use opencl::GpuError;
