//! Загрузка исходного кода ядра с диска

use super::error::GpuError;
use std::fs;
use std::path::Path;

/// Предел размера файла с исходником ядра (1 МиБ)
pub const MAX_SOURCE_SIZE: u64 = 0x100000;

/// Читает исходный код ядра целиком
///
/// Отсутствующий или слишком большой файл — фатальная ошибка
/// конвейера, компиляция не начинается.
pub fn load_kernel_source(path: &Path) -> Result<String, GpuError> {
    let metadata = fs::metadata(path)
        .map_err(|e| GpuError::SourceLoadFailed(format!("{}: {}", path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(GpuError::SourceLoadFailed(format!(
            "{}: файл больше {} байт",
            path.display(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(path)
        .map_err(|e| GpuError::SourceLoadFailed(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_file(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("opencl_matmul_{}_{}", std::process::id(), name));
        path
    }

    #[test]
    fn missing_file_is_source_load_failure() {
        let result = load_kernel_source(Path::new("nonexistent_kernel_source.cl"));
        assert!(matches!(result, Err(GpuError::SourceLoadFailed(_))));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let path = temp_file("oversized.cl");
        fs::write(&path, vec![b'x'; MAX_SOURCE_SIZE as usize + 1]).unwrap();
        let result = load_kernel_source(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(GpuError::SourceLoadFailed(_))));
    }

    #[test]
    fn readable_file_round_trips() {
        let path = temp_file("kernel.cl");
        let body = "__kernel void noop() {}\n";
        fs::write(&path, body).unwrap();
        let loaded = load_kernel_source(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, body);
    }
}
