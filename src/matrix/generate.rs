//! Генерация случайных матриц

use super::Matrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Верхняя граница значений элементов (включительно)
pub const MAX_ELEMENT: i32 = 99;

/// Создает пару случайных матриц заданной стороны
///
/// Элементы распределены равномерно в диапазоне `0..=MAX_ELEMENT`.
/// При `Some(seed)` результат воспроизводим от запуска к запуску;
/// при `None` генератор инициализируется энтропией системы.
pub fn generate_pair(side: usize, seed: Option<u64>) -> (Matrix, Matrix) {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let elements = side * side;
    let a: Vec<i32> = (0..elements).map(|_| rng.gen_range(0..=MAX_ELEMENT)).collect();
    let b: Vec<i32> = (0..elements).map(|_| rng.gen_range(0..=MAX_ELEMENT)).collect();

    (Matrix::from_vec(side, a), Matrix::from_vec(side, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_seed_reproduces_the_pair() {
        let (a1, b1) = generate_pair(10, Some(12345));
        let (a2, b2) = generate_pair(10, Some(12345));
        assert_eq!(a1, a2);
        assert_eq!(b1, b2);
    }

    #[test]
    fn different_seeds_give_different_matrices() {
        let (a1, _) = generate_pair(10, Some(1));
        let (a2, _) = generate_pair(10, Some(2));
        assert_ne!(a1, a2);
    }

    #[test]
    fn elements_stay_in_declared_range() {
        let (a, b) = generate_pair(20, Some(7));
        for m in [&a, &b] {
            assert_eq!(m.len(), 400);
            assert!(m.as_slice().iter().all(|&x| (0..=MAX_ELEMENT).contains(&x)));
        }
    }
}
