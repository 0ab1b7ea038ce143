//! Dense embedding vector.

use serde::{Deserialize, Serialize};

/// A dense vector of `f32` components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    /// The vector components.
    pub data: Vec<f32>,
}

impl Vector {
    /// Create a new vector with the given components.
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// Create the zero vector of a dimension.
    pub fn zeros(dimension: usize) -> Self {
        Self {
            data: vec![0.0; dimension],
        }
    }

    /// Get the dimensionality of this vector.
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Calculate the L2 norm (magnitude) of this vector.
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Whether every component is zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|x| *x == 0.0)
    }

    /// Dot product, accumulated in `f64`.
    ///
    /// Vectors of different dimension are compared over their common prefix.
    pub fn dot(&self, other: &Vector) -> f64 {
        self.data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| f64::from(*a) * f64::from(*b))
            .sum()
    }

    /// Component-wise mean of several vectors of the same dimension.
    ///
    /// Returns `None` when `vectors` is empty.
    pub fn mean<'a, I>(vectors: I) -> Option<Vector>
    where
        I: IntoIterator<Item = &'a Vector>,
    {
        let mut iter = vectors.into_iter();
        let first = iter.next()?;
        let mut sum: Vec<f64> = first.data.iter().map(|x| f64::from(*x)).collect();
        let mut count = 1usize;

        for vector in iter {
            for (acc, value) in sum.iter_mut().zip(&vector.data) {
                *acc += f64::from(*value);
            }
            count += 1;
        }

        Some(Vector::new(
            sum.into_iter().map(|x| (x / count as f64) as f32).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_norm() {
        let a = Vector::new(vec![1.0, 2.0, 3.0]);
        let b = Vector::new(vec![4.0, -5.0, 6.0]);

        assert_eq!(a.dot(&b), 12.0);
        assert!((Vector::new(vec![3.0, 4.0]).norm() - 5.0).abs() < 1e-6);
        assert_eq!(a.dimension(), 3);
    }

    #[test]
    fn test_zeros() {
        let zero = Vector::zeros(4);
        assert!(zero.is_zero());
        assert_eq!(zero.dot(&Vector::new(vec![1.0, 1.0, 1.0, 1.0])), 0.0);
    }

    #[test]
    fn test_mean() {
        let a = Vector::new(vec![1.0, 0.0]);
        let b = Vector::new(vec![3.0, 2.0]);

        let mean = Vector::mean([&a, &b]).unwrap();
        assert_eq!(mean.data, vec![2.0, 1.0]);
        assert!(Vector::mean(std::iter::empty::<&Vector>()).is_none());
    }
}
