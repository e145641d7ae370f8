//! Array collaborator contract
//!
//! The accumulator never looks inside a frame. All it needs from the array type
//! is shape introspection, a reshape that adds a leading axis of length 1, and
//! concatenation along axis 0. Any tensor library can plug in by implementing
//! [`Tensor`].
//!
//! [`DenseArray`] is a small row-major implementation used by the tests, the
//! benches and the named constructors in `lapwindow-options`.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::errors::ShapeError;

/// Largest rank a [`Shape`] can describe
pub const MAX_RANK: usize = 8;

/// Dimension list, outermost axis first
pub type Shape = heapless::Vec<usize, MAX_RANK>;

/// Number of elements described by a shape (1 for a scalar)
pub fn element_count(shape: &Shape) -> usize {
    shape.iter().product()
}

/// Operations the accumulator needs from an array type
pub trait Tensor: Sized {
    /// Current dimensions
    fn shape(&self) -> Shape;

    /// Same data with a new leading axis of length 1
    ///
    /// Must preserve the element count; implementations return a
    /// [`ShapeError`] when they cannot.
    fn insert_leading_axis(&self) -> Result<Self, ShapeError>;

    /// Concatenates `parts` along axis 0
    ///
    /// All parts must agree on every dimension except the first.
    fn concat(parts: &[Arc<Self>]) -> Result<Self, ShapeError>;
}

/// Row-major dense array
#[derive(Debug, Clone, PartialEq)]
pub struct DenseArray<T = f32> {
    shape: Shape,
    data: Vec<T>,
}

impl<T: Copy> DenseArray<T> {
    /// Wraps `data` with the given dimensions
    pub fn new(dims: &[usize], data: Vec<T>) -> Result<Self, ShapeError> {
        let shape = Shape::from_slice(dims).map_err(|_| ShapeError::RankOverflow {
            rank: dims.len(),
            max: MAX_RANK,
        })?;
        let expected = element_count(&shape);
        if expected != data.len() {
            return Err(ShapeError::ElementCount {
                before: data.len(),
                after: expected,
            });
        }
        Ok(Self { shape, data })
    }

    /// Array of the given dimensions with every element set to `value`
    pub fn filled(dims: &[usize], value: T) -> Result<Self, ShapeError> {
        let count = dims.iter().product();
        let mut data = Vec::with_capacity(count);
        data.resize(count, value);
        Self::new(dims, data)
    }

    /// Flat element storage
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Length of axis 0 (1 for a scalar)
    pub fn leading_len(&self) -> usize {
        self.shape.first().copied().unwrap_or(1)
    }
}

impl<T: Copy> Tensor for DenseArray<T> {
    fn shape(&self) -> Shape {
        self.shape.clone()
    }

    fn insert_leading_axis(&self) -> Result<Self, ShapeError> {
        let rank = self.shape.len() + 1;
        let mut shape = Shape::new();
        shape.push(1).map_err(|_| ShapeError::RankOverflow { rank, max: MAX_RANK })?;
        shape
            .extend_from_slice(&self.shape)
            .map_err(|_| ShapeError::RankOverflow { rank, max: MAX_RANK })?;

        let after = element_count(&shape);
        if after != self.data.len() {
            return Err(ShapeError::ElementCount {
                before: self.data.len(),
                after,
            });
        }

        Ok(Self {
            shape,
            data: self.data.clone(),
        })
    }

    fn concat(parts: &[Arc<Self>]) -> Result<Self, ShapeError> {
        let first = parts.first().ok_or(ShapeError::Empty)?;
        if first.shape.is_empty() {
            return Err(ShapeError::Scalar);
        }
        let trailing = &first.shape[1..];

        let mut leading = 0;
        let mut total = 0;
        for (index, part) in parts.iter().enumerate() {
            if part.shape.is_empty() || &part.shape[1..] != trailing {
                return Err(ShapeError::Mismatch {
                    index,
                    expected: first.shape.clone(),
                    found: part.shape.clone(),
                });
            }
            leading += part.shape[0];
            total += part.data.len();
        }

        let mut data = Vec::with_capacity(total);
        for part in parts {
            data.extend_from_slice(&part.data);
        }

        let mut shape = first.shape.clone();
        shape[0] = leading;

        Ok(Self { shape, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn frame(value: f32) -> Arc<DenseArray> {
        Arc::new(DenseArray::filled(&[2, 3], value).unwrap())
    }

    #[test]
    fn new_checks_element_count() {
        assert!(DenseArray::new(&[2, 2], vec![1.0f32; 4]).is_ok());
        assert_eq!(
            DenseArray::new(&[2, 2], vec![1.0f32; 3]),
            Err(ShapeError::ElementCount { before: 3, after: 4 })
        );
    }

    #[test]
    fn leading_axis_preserves_data() {
        let base = DenseArray::new(&[2, 3], (0..6).map(|v| v as f32).collect()).unwrap();
        let batched = base.insert_leading_axis().unwrap();

        assert_eq!(batched.shape().as_slice(), &[1, 2, 3]);
        assert_eq!(batched.data(), base.data());
    }

    #[test]
    fn leading_axis_rank_overflow() {
        let deep = DenseArray::filled(&[1; MAX_RANK], 0u8).unwrap();
        assert_eq!(
            deep.insert_leading_axis(),
            Err(ShapeError::RankOverflow { rank: MAX_RANK + 1, max: MAX_RANK })
        );
    }

    #[test]
    fn scalar_gains_one_axis() {
        let scalar = DenseArray::new(&[], vec![7i32]).unwrap();
        let lifted = scalar.insert_leading_axis().unwrap();
        assert_eq!(lifted.shape().as_slice(), &[1]);
    }

    #[test]
    fn concat_sums_leading_axis() {
        let parts = vec![frame(1.0), frame(2.0), frame(3.0)];
        let joined = DenseArray::concat(&parts).unwrap();

        assert_eq!(joined.shape().as_slice(), &[6, 3]);
        assert_eq!(joined.data()[0], 1.0);
        assert_eq!(joined.data()[17], 3.0);
    }

    #[test]
    fn concat_rejects_mismatch() {
        let odd = Arc::new(DenseArray::filled(&[2, 4], 0.0f32).unwrap());
        let parts = vec![frame(1.0), odd];

        match DenseArray::concat(&parts) {
            Err(ShapeError::Mismatch { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn concat_rejects_empty_and_scalar() {
        assert_eq!(DenseArray::<f32>::concat(&[]), Err(ShapeError::Empty));

        let scalar = Arc::new(DenseArray::new(&[], vec![1.0f32]).unwrap());
        assert_eq!(DenseArray::concat(&[scalar]), Err(ShapeError::Scalar));
    }
}
