//! Операции над матрицами

use super::Matrix;

/// Эталонная CPU-реализация умножения матриц
///
/// Выходная матрица должна быть заполнена нулями: алгоритм накапливает
/// результат на месте и сам ее не обнуляет. Арифметика — i32 с
/// переполнением по модулю 2^32, как у целочисленного ядра на GPU.
pub fn cpu_matrix_multiply(a: &Matrix, b: &Matrix, out: &mut Matrix) {
    let side = a.side();
    debug_assert_eq!(side, b.side());
    debug_assert_eq!(side, out.side());

    let a = a.as_slice();
    let b = b.as_slice();
    let out = out.as_mut_slice();

    for r in 0..side {
        for i in 0..side {
            let a_ri = a[r * side + i];
            for c in 0..side {
                let idx = r * side + c;
                out[idx] = out[idx].wrapping_add(a_ri.wrapping_mul(b[i * side + c]));
            }
        }
    }
}

/// Сравнивает результаты GPU и CPU вычислений поэлементно
pub fn compare_results(gpu: &Matrix, cpu: &Matrix) -> bool {
    let side = gpu.side();
    let mut diff_count = 0usize;

    for r in 0..side {
        for c in 0..side {
            if gpu.at(r, c) != cpu.at(r, c) {
                diff_count += 1;
            }
        }
    }

    if diff_count > 0 {
        println!(
            "Обнаружены расхождения: {} элементов из {}",
            diff_count,
            gpu.len()
        );
        false
    } else {
        println!("Результаты GPU и CPU полностью совпадают!");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_known_product() {
        let a = Matrix::from_vec(2, vec![1, 2, 3, 4]);
        let b = Matrix::from_vec(2, vec![5, 6, 7, 8]);
        let mut out = Matrix::zeroed(2);
        cpu_matrix_multiply(&a, &b, &mut out);
        assert_eq!(out.as_slice(), &[19, 22, 43, 50]);
    }

    #[test]
    fn single_element_matrix() {
        let a = Matrix::from_vec(1, vec![7]);
        let b = Matrix::from_vec(1, vec![9]);
        let mut out = Matrix::zeroed(1);
        cpu_matrix_multiply(&a, &b, &mut out);
        assert_eq!(out.at(0, 0), 63);
    }

    #[test]
    fn accumulation_wraps_on_overflow() {
        let a = Matrix::from_vec(1, vec![i32::MAX]);
        let b = Matrix::from_vec(1, vec![2]);
        let mut out = Matrix::zeroed(1);
        cpu_matrix_multiply(&a, &b, &mut out);
        assert_eq!(out.at(0, 0), i32::MAX.wrapping_mul(2));
    }

    #[test]
    fn comparator_detects_mismatch() {
        let cpu = Matrix::from_vec(2, vec![1, 2, 3, 4]);
        let mut gpu = cpu.clone();
        assert!(compare_results(&gpu, &cpu));
        gpu.as_mut_slice()[3] += 1;
        assert!(!compare_results(&gpu, &cpu));
    }
}
