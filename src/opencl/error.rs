//! Классификация ошибок GPU-конвейера
//!
//! Каждый вариант соответствует одной фазе конвейера; код состояния
//! OpenCL сохраняется как есть. Любая из этих ошибок фатальна для
//! текущего запуска, повторных попыток нет.

use super::types::cl_int;
use std::fmt;

/// Ошибка одной из фаз конвейера GPU-вычислений
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpuError {
    /// Платформа OpenCL не найдена или не перечислилась
    PlatformUnavailable(cl_int),
    /// GPU-устройство на платформе не найдено
    DeviceUnavailable(cl_int),
    /// Не удалось создать контекст выполнения
    ContextCreationFailed(cl_int),
    /// Не удалось создать очередь команд
    QueueCreationFailed(cl_int),
    /// Исходный код ядра не прочитался с диска
    SourceLoadFailed(String),
    /// Программа не скомпилировалась; лог сборки передается как есть
    BuildFailed { code: cl_int, log: String },
    /// Точка входа не найдена в собранной программе
    KernelResolutionFailed(cl_int),
    /// Не удалось выделить буфер в памяти устройства
    BufferAllocationFailed(cl_int),
    /// Ошибка копирования данных между хостом и устройством
    TransferFailed(cl_int),
    /// Ядро не запустилось
    DispatchFailed(cl_int),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::PlatformUnavailable(code) => {
                write!(f, "нет доступной платформы OpenCL (код {})", code)
            }
            GpuError::DeviceUnavailable(code) => {
                write!(f, "нет доступного GPU-устройства (код {})", code)
            }
            GpuError::ContextCreationFailed(code) => {
                write!(f, "ошибка при создании контекста (код {})", code)
            }
            GpuError::QueueCreationFailed(code) => {
                write!(f, "ошибка при создании очереди команд (код {})", code)
            }
            GpuError::SourceLoadFailed(reason) => {
                write!(f, "ошибка при чтении исходного кода ядра: {}", reason)
            }
            GpuError::BuildFailed { code, log } => {
                write!(f, "ошибка при компиляции программы (код {})", code)?;
                if !log.is_empty() {
                    write!(f, "\nЛог компиляции: {}", log)?;
                }
                Ok(())
            }
            GpuError::KernelResolutionFailed(code) => {
                write!(f, "ошибка при создании ядра (код {})", code)
            }
            GpuError::BufferAllocationFailed(code) => {
                write!(f, "ошибка при создании буфера (код {})", code)
            }
            GpuError::TransferFailed(code) => {
                write!(f, "ошибка при копировании данных (код {})", code)
            }
            GpuError::DispatchFailed(code) => {
                write!(f, "ошибка при запуске ядра (код {})", code)
            }
        }
    }
}

impl std::error::Error for GpuError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_raw_status_code() {
        let err = GpuError::DispatchFailed(-54);
        assert!(err.to_string().contains("-54"));
        let err = GpuError::BufferAllocationFailed(-61);
        assert!(err.to_string().contains("-61"));
    }

    #[test]
    fn phases_render_distinct_diagnostics() {
        let messages: Vec<String> = [
            GpuError::PlatformUnavailable(0),
            GpuError::DeviceUnavailable(0),
            GpuError::ContextCreationFailed(-6),
            GpuError::QueueCreationFailed(-6),
            GpuError::KernelResolutionFailed(-46),
            GpuError::DispatchFailed(-5),
        ]
        .iter()
        .map(|e| e.to_string())
        .collect();

        for (i, msg) in messages.iter().enumerate() {
            for other in &messages[i + 1..] {
                assert_ne!(msg, other);
            }
        }
    }

    #[test]
    fn build_failure_appends_log() {
        let err = GpuError::BuildFailed {
            code: -11,
            log: "error: expected ';'".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("-11"));
        assert!(rendered.contains("expected ';'"));
    }
}
