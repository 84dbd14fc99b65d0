use std::ops::Index;

use itertools::Itertools;

use crate::error::{ExtractError, ExtractResult};
use crate::misc::FloatingPoint;

/// Knot vector representation
#[derive(Clone, Debug, PartialEq)]
pub struct KnotVector<T>(Vec<T>);

impl<T: FloatingPoint> KnotVector<T> {
    pub fn new(knots: Vec<T>) -> Self {
        Self(knots)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.0.clone()
    }

    pub fn first(&self) -> Option<T> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<T> {
        self.0.last().copied()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Get the domain of the knot vector by degree
    /// Returns `None` if there are too few knots for the degree
    pub fn domain(&self, degree: usize) -> Option<(T, T)> {
        if self.0.len() < 2 * degree + 2 {
            return None;
        }
        Some((self.0[degree], self.0[self.0.len() - 1 - degree]))
    }

    /// Check that every knot is greater than or equal to its predecessor
    /// # Example
    /// ```
    /// use splinex::prelude::KnotVector;
    /// assert!(KnotVector::new(vec![0., 0., 0.5, 1., 1.]).is_non_decreasing());
    /// assert!(!KnotVector::new(vec![0., 1., 0.5]).is_non_decreasing());
    /// ```
    pub fn is_non_decreasing(&self) -> bool {
        self.0.iter().tuple_windows().all(|(a, b)| a <= b)
    }

    /// Distinct knots paired with their multiplicity
    /// # Example
    /// ```
    /// use splinex::prelude::KnotVector;
    /// let knots = KnotVector::new(vec![0., 0., 0., 1., 2., 3., 3., 3.]);
    /// assert_eq!(knots.multiplicity(), vec![(0., 3), (1., 1), (2., 1), (3., 3)]);
    /// ```
    pub fn multiplicity(&self) -> Vec<(T, usize)> {
        self.0
            .iter()
            .copied()
            .dedup_by_with_count(|a, b| (*a - *b).abs() <= T::default_epsilon())
            .map(|(count, knot)| (knot, count))
            .collect()
    }

    /// Check if the knot vector is clamped
    /// `clamped` means the first and last knots have a multiplicity greater than the degree
    /// e.g. [0, 0, 0, 1, 2, 3, 3, 3] with degree 2 is clamped
    pub fn is_clamped(&self, degree: usize) -> bool {
        let multiplicity = self.multiplicity();
        match (multiplicity.first(), multiplicity.last()) {
            (Some((_, start)), Some((_, end))) => *start > degree && *end > degree,
            _ => false,
        }
    }

    /// Number of control points a clamped direction of the given degree requires
    pub fn clamped_control_point_count(&self, degree: usize) -> Option<usize> {
        self.0.len().checked_sub(degree + 1)
    }

    /// Rescale the knot vector onto the unit interval
    /// `t' = (t - t0) / (tN - t0)`, the first knot maps to 0 and the last to 1
    /// # Failures
    /// - if the knot vector is empty or its first and last knots coincide
    ///
    /// # Example
    /// ```
    /// use splinex::prelude::KnotVector;
    /// let knots = KnotVector::new(vec![2., 2., 3., 6., 6.]);
    /// let normalized = knots.try_normalize().unwrap();
    /// assert_eq!(normalized.to_vec(), vec![0., 0., 0.25, 1., 1.]);
    /// assert!(KnotVector::new(vec![5., 5., 5., 5.]).try_normalize().is_err());
    /// ```
    pub fn try_normalize(&self) -> ExtractResult<Self> {
        let (Some(start), Some(end)) = (self.first(), self.last()) else {
            return Err(ExtractError::invalid_buffer("knot vector", "no knots"));
        };
        let length = end - start;
        // NaN bounds fall through to the degenerate case
        if !(length.abs() > T::zero()) || !length.is_finite() {
            return Err(ExtractError::DegenerateDomain {
                what: "knot vector",
                start: start.to_f64().unwrap_or(f64::NAN),
                end: end.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.0.iter().map(|t| (*t - start) / length).collect())
    }
}

impl<T> Index<usize> for KnotVector<T> {
    type Output = T;
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T> FromIterator<T> for KnotVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> From<KnotVector<T>> for Vec<T> {
    fn from(value: KnotVector<T>) -> Self {
        value.0
    }
}
