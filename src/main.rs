//! Бенчмарк умножения матриц: GPU против CPU

use anyhow::Result;
use indicatif::ProgressBar;
use opencl_matmul::gpu::GpuMultiplier;
use opencl_matmul::matrix::{compare_results, cpu_matrix_multiply, generate_pair, Matrix};
use opencl_matmul::utils::measure_time;
use prettytable::{row, Table};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Сторона квадратных матриц
const MATRIX_SIDE: usize = 1000;

/// Файл с исходным кодом ядра
const SOURCE_FILE: &str = "MatrixMultiplication.cl";

fn main() -> Result<()> {
    println!(
        "Бенчмарк умножения матриц {}x{}: GPU против CPU",
        MATRIX_SIDE, MATRIX_SIDE
    );

    // Зерно берется из часов, поэтому запуски не воспроизводимы,
    // пока зерно не зафиксировано явно
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let (a, b) = generate_pair(MATRIX_SIDE, Some(seed));
    println!("Матрицы из {} элементов созданы", a.len());

    // Подготовка конвейера: платформа, устройство, контекст, очередь,
    // компиляция ядра
    println!("\nИнициализация OpenCL...");
    let (multiplier, setup_time) =
        measure_time(|| GpuMultiplier::from_source_file(Path::new(SOURCE_FILE)));
    let multiplier = multiplier?;
    println!("Контекст и ядро созданы");
    println!("Время подготовки: {:.3} с", setup_time.as_secs_f64());

    let device_name = multiplier
        .device_name()
        .unwrap_or_else(|_| "неизвестное устройство".to_string());
    println!("Устройство: {}", device_name);

    // GPU-вычисления
    println!("\nЗапуск вычислений на GPU...");
    let (gpu_result, gpu_time) = measure_time(|| multiplier.multiply(&a, &b));
    let gpu_result = gpu_result?;
    println!("GPU вычисления завершены за {:.3} с", gpu_time.as_secs_f64());

    // CPU-вычисления для сверки
    println!("\nЗапуск вычислений на CPU...");
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("CPU вычисления...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let mut cpu_result = Matrix::zeroed(MATRIX_SIDE);
    let (_, cpu_time) = measure_time(|| cpu_matrix_multiply(&a, &b, &mut cpu_result));
    spinner.finish_and_clear();
    println!("CPU вычисления завершены за {:.3} с", cpu_time.as_secs_f64());

    // Сверка результатов и итоговая таблица
    let results_match = compare_results(&gpu_result, &cpu_result);

    let mut table = Table::new();
    table.add_row(row!["Размер матрицы", format!("{}x{}", MATRIX_SIDE, MATRIX_SIDE)]);
    table.add_row(row!["Устройство", device_name]);
    table.add_row(row![
        "Подготовка",
        format!("{:.3} с", setup_time.as_secs_f64())
    ]);
    table.add_row(row!["GPU", format!("{:.3} с", gpu_time.as_secs_f64())]);
    table.add_row(row!["CPU", format!("{:.3} с", cpu_time.as_secs_f64())]);
    table.add_row(row![
        "Сверка",
        if results_match { "совпадает" } else { "расходится" }
    ]);
    table.printstd();

    let speedup = cpu_time.as_secs_f64() / gpu_time.as_secs_f64();
    println!("GPU быстрее CPU в {:.2} раз", speedup);

    Ok(())
}
