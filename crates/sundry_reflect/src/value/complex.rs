use core::fmt;
use core::hash::{Hash, Hasher};

/// A complex number with real part `re` and imaginary part `im`.
///
/// `Complex<f32>` backs [`Value::C64`](super::Value::C64) and `Complex<f64>`
/// backs [`Value::C128`](super::Value::C128).
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    #[inline]
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

impl Complex<f32> {
    /// Widens both parts to `f64`.
    #[inline]
    pub fn widen(self) -> Complex<f64> {
        Complex::new(f64::from(self.re), f64::from(self.im))
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }
}

impl Complex<f64> {
    /// Narrows both parts to `f32`.
    #[inline]
    pub fn narrow(self) -> Complex<f32> {
        Complex::new(self.re as f32, self.im as f32)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }
}

// `-0.0 == 0.0`, so both must hash alike.
macro_rules! impl_complex_hash {
    ($ty:ty) => {
        impl Hash for Complex<$ty> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                let norm = |v: $ty| if v == 0.0 { 0 } else { v.to_bits() };
                norm(self.re).hash(state);
                norm(self.im).hash(state);
            }
        }
    };
}

impl_complex_hash!(f32);
impl_complex_hash!(f64);

/// Formats as `(re+imi)`, e.g. `(1+2i)` or `(1.5-0.5i)`.
impl<T: fmt::Display + PartialOrd + Default> fmt::Display for Complex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < T::default() {
            write!(f, "({}{}i)", self.re, self.im)
        } else {
            write!(f, "({}+{}i)", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::Complex;

    #[test]
    fn display() {
        assert_eq!(Complex::new(1.0_f64, 2.0).to_string(), "(1+2i)");
        assert_eq!(Complex::new(1.5_f32, -0.5).to_string(), "(1.5-0.5i)");
    }

    #[test]
    fn widen_narrow() {
        let c = Complex::new(0.5_f32, -4.0);
        assert_eq!(c.widen().narrow(), c);
        assert!(Complex::<f64>::default().is_zero());
    }
}
