//! Triangular membership functions.

use crate::FuzzyError;

/// A triangular membership function.
///
/// Degree is `0` outside `[left, right]`, rises linearly to `1` at `peak`
/// and falls linearly back to `0`. A foot that coincides with the peak forms
/// a shoulder, so the boundary value still has degree `1`.
///
/// # Examples
///
/// ```
/// use carefind_scorer::Triangle;
///
/// let medium = Triangle::new(0.2, 0.5, 0.7)?;
/// assert_eq!(medium.degree(0.5), 1.0);
/// assert_eq!(medium.degree(0.8), 0.0);
///
/// let low = Triangle::new(0.0, 0.0, 0.3)?;
/// assert_eq!(low.degree(0.0), 1.0);
/// # Ok::<(), carefind_scorer::FuzzyError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    left: f64,
    peak: f64,
    right: f64,
}

impl Triangle {
    /// Validate and construct a triangle.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError::InvalidTriangle`] unless all points are finite
    /// and `left <= peak <= right`.
    pub fn new(left: f64, peak: f64, right: f64) -> Result<Self, FuzzyError> {
        let finite = left.is_finite() && peak.is_finite() && right.is_finite();
        if !finite || left > peak || peak > right {
            return Err(FuzzyError::InvalidTriangle { left, peak, right });
        }
        Ok(Self { left, peak, right })
    }

    /// Construct from break points already known to be ordered.
    pub(crate) const fn ordered(left: f64, peak: f64, right: f64) -> Self {
        Self { left, peak, right }
    }

    /// Left foot.
    #[must_use]
    pub const fn left(&self) -> f64 {
        self.left
    }

    /// Peak.
    #[must_use]
    pub const fn peak(&self) -> f64 {
        self.peak
    }

    /// Right foot.
    #[must_use]
    pub const fn right(&self) -> f64 {
        self.right
    }

    /// Degree of membership of `x` in `[0, 1]`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "membership is a piecewise linear interpolation"
    )]
    pub fn degree(&self, x: f64) -> f64 {
        if !(self.left..=self.right).contains(&x) {
            return 0.0;
        }
        if x < self.peak {
            return (x - self.left) / (self.peak - self.left);
        }
        if x > self.peak {
            return (self.right - x) / (self.right - self.peak);
        }
        1.0
    }
}
