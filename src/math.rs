/// Linear interpolation between two samples.
///
/// The result is equivalent to `first * (1 - coeff) + second * coeff` with
/// `coeff` in `[0, 1]`; `coeff == 0.0` returns `first` exactly.
#[inline]
pub fn lerp(first: f32, second: f32, coeff: f32) -> f32 {
    first + (second - first) * coeff
}

/// Shorthand for non-zero integer literals.
///
/// ```
/// use rill::{nz, SampleRate};
/// let rate: SampleRate = nz!(44100);
/// assert_eq!(rate.get(), 44100);
/// ```
///
/// # Panics
///
/// Panics if the value is zero.
#[macro_export]
macro_rules! nz {
    ($n:expr) => {
        match ::std::num::NonZero::new($n) {
            Some(n) => n,
            None => panic!("value must be non-zero"),
        }
    };
}
