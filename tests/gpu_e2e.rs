//! Сквозной тест GPU-пути: требует установленного OpenCL и GPU
//!
//! Запуск: `cargo test -- --ignored`

use opencl_matmul::gpu::GpuMultiplier;
use opencl_matmul::matrix::{cpu_matrix_multiply, generate_pair, Matrix};
use std::path::Path;

#[test]
#[ignore]
fn gpu_result_matches_cpu_oracle() {
    let multiplier = GpuMultiplier::from_source_file(Path::new("MatrixMultiplication.cl"))
        .expect("конвейер OpenCL не инициализировался");

    let side = 64;
    let (a, b) = generate_pair(side, Some(2024));

    let gpu = multiplier
        .multiply(&a, &b)
        .expect("GPU умножение не выполнилось");

    let mut cpu = Matrix::zeroed(side);
    cpu_matrix_multiply(&a, &b, &mut cpu);

    assert_eq!(gpu, cpu);
}

#[test]
#[ignore]
fn single_element_matrix_on_gpu() {
    let multiplier = GpuMultiplier::from_source_file(Path::new("MatrixMultiplication.cl"))
        .expect("конвейер OpenCL не инициализировался");

    let a = Matrix::from_vec(1, vec![7]);
    let b = Matrix::from_vec(1, vec![9]);

    let out = multiplier
        .multiply(&a, &b)
        .expect("GPU умножение не выполнилось");
    assert_eq!(out.at(0, 0), 63);
}

#[test]
#[ignore]
fn missing_kernel_source_fails_before_compilation() {
    let result = GpuMultiplier::from_source_file(Path::new("no_such_kernel.cl"));
    assert!(matches!(
        result,
        Err(opencl_matmul::GpuError::SourceLoadFailed(_))
    ));
}
