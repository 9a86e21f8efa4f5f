//! Random input generation and order verification for the sorting
//! experiments.
//!
//! Generators come in two flavors: the plain functions draw from the
//! thread-local rng, the `*_with` variants take any [`Rng`] so seeded
//! runs inject their own generator instead of relying on shared seed
//! state.

use rand::Rng;

/// Direction of the pre-sorted prefix produced by the generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The prefix increases monotonically.
    Ascending,
    /// The prefix decreases monotonically.
    Descending,
}

/// Generates `len` integers, the first `len * sorted_fraction` of them
/// forming a monotone run in the given direction and the remainder
/// uniformly random in `[min, max]`.
///
/// The monotone run starts within 10 of the relevant range edge and
/// moves in steps of 1 to 50, so partially sorted inputs resemble the
/// uniformly random ones in magnitude.
///
/// # Panics
///
/// Panics if `min > max`.
pub fn generate_ints(
    len: usize,
    min: i32,
    max: i32,
    sorted_fraction: f32,
    direction: Direction,
) -> Vec<i32> {
    generate_ints_with(&mut rand::thread_rng(), len, min, max, sorted_fraction, direction)
}

/// Like [`generate_ints`], drawing from the supplied generator.
pub fn generate_ints_with<R: Rng>(
    rng: &mut R,
    len: usize,
    min: i32,
    max: i32,
    sorted_fraction: f32,
    direction: Direction,
) -> Vec<i32> {
    assert!(min <= max, "empty value range");
    let mut data = Vec::with_capacity(len);
    let sorted_len = prefix_len(len, sorted_fraction);

    match direction {
        Direction::Ascending => {
            let mut previous = min + rng.gen_range(0..10);
            for _ in 0..sorted_len {
                previous += rng.gen_range(1..=50);
                data.push(previous);
            }
        }
        Direction::Descending => {
            let mut previous = max - rng.gen_range(0..10);
            for _ in 0..sorted_len {
                previous -= rng.gen_range(1..=50);
                data.push(previous);
            }
        }
    }
    for _ in sorted_len..len {
        data.push(rng.gen_range(min..=max));
    }
    data
}

/// Floating-point counterpart of [`generate_ints`]; monotone steps are
/// up to 20.0 and the prefix starts within 5.0 of the range edge.
///
/// # Panics
///
/// Panics if `min > max`.
pub fn generate_floats(
    len: usize,
    min: f32,
    max: f32,
    sorted_fraction: f32,
    direction: Direction,
) -> Vec<f32> {
    generate_floats_with(&mut rand::thread_rng(), len, min, max, sorted_fraction, direction)
}

/// Like [`generate_floats`], drawing from the supplied generator.
pub fn generate_floats_with<R: Rng>(
    rng: &mut R,
    len: usize,
    min: f32,
    max: f32,
    sorted_fraction: f32,
    direction: Direction,
) -> Vec<f32> {
    assert!(min <= max, "empty value range");
    let mut data = Vec::with_capacity(len);
    let sorted_len = prefix_len(len, sorted_fraction);

    match direction {
        Direction::Ascending => {
            let mut previous = min + rng.gen_range(0.0..5.0f32);
            for _ in 0..sorted_len {
                previous += rng.gen_range(0.0..20.0f32);
                data.push(previous);
            }
        }
        Direction::Descending => {
            let mut previous = max - rng.gen_range(0.0..5.0f32);
            for _ in 0..sorted_len {
                previous -= rng.gen_range(0.0..20.0f32);
                data.push(previous);
            }
        }
    }
    for _ in sorted_len..len {
        data.push(rng.gen_range(min..=max));
    }
    data
}

fn prefix_len(len: usize, sorted_fraction: f32) -> usize {
    ((len as f32 * sorted_fraction) as usize).min(len)
}

/// Returns true if `arr` is sorted in non-decreasing order.
pub fn is_sorted_ascending<T: PartialOrd>(arr: &[T]) -> bool {
    arr.windows(2).all(|pair| pair[0] <= pair[1])
}
