use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};
use std::slice::Iter;

/// A column vector of `f64` values.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Vector {
    data: Vec<f64>,
}

/// An ordered list of equal-length vectors spanning a subspace.
pub type Basis = Vec<Vector>;

impl Vector {
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Self::new(data)
    }

    pub fn zeros(len: usize) -> Self {
        Vector::from_vec(vec![0.0; len])
    }

    /// The `i`-th vector of the canonical basis of R^len.
    pub fn unit(len: usize, i: usize) -> Self {
        let mut v = Vector::zeros(len);
        v[i] = 1.0;
        v
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    pub fn mapv<F>(&self, f: F) -> Vector
    where
        F: FnMut(&f64) -> f64,
    {
        self.data.iter().map(f).collect()
    }

    pub fn scaled(&self, factor: f64) -> Vector {
        self.mapv(|x| x * factor)
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        assert_eq!(
            self.len(),
            other.len(),
            "Dot product requires equal length vectors"
        );
        self.iter().zip(other.iter()).map(|(a, b)| a * b).sum()
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Cross product in R^3.
    pub fn cross(&self, other: &Vector) -> Vector {
        assert!(
            self.len() == 3 && other.len() == 3,
            "Cross product is only defined for 3-component vectors"
        );
        let (x1, y1, z1) = (self[0], self[1], self[2]);
        let (x2, y2, z2) = (other[0], other[1], other[2]);
        Vector::from_vec(vec![
            y1 * z2 - z1 * y2,
            z1 * x2 - x1 * z2,
            x1 * y2 - y1 * x2,
        ])
    }

    /// True when no component exceeds `eps` in magnitude.
    pub fn is_negligible(&self, eps: f64) -> bool {
        self.data.iter().all(|x| x.abs() <= eps)
    }

    pub fn approx_eq(&self, other: &Vector, eps: f64) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| (a - b).abs() < eps)
    }
}

impl From<Vec<f64>> for Vector {
    fn from(value: Vec<f64>) -> Self {
        Vector::from_vec(value)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(value: Vector) -> Self {
        value.data
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector::from_vec(iter.into_iter().collect())
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_of_unit_vectors() {
        let x = Vector::unit(3, 0);
        let y = Vector::unit(3, 1);
        assert_eq!(x.cross(&y).to_vec(), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn display_matches_list_notation() {
        let v = Vector::from_vec(vec![1.0, -2.5]);
        assert_eq!(v.to_string(), "[1, -2.5]");
    }
}
