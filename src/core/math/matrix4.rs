use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use crate::core::math::vector3h::Vector3h;

const DIM: usize = 4;

/// Homogeneous 4x4 transform, stored row-major.
///
/// The bottom-right element is pinned to `1.0` after construction and after
/// every arithmetic operation. Translation lives in the fourth column, so
/// `matrix * vector` treats the vector as a column with `w = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    m: [[f64; DIM]; DIM],
}

impl Matrix4 {
    #[must_use]
    pub fn new(rows: [[f64; DIM]; DIM]) -> Self {
        Self { m: rows }.pinned()
    }

    #[must_use]
    pub fn identity() -> Self {
        let mut m = [[0.0; DIM]; DIM];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self { m }
    }

    /// Builds a matrix whose first three rows hold the given vectors as
    /// columns; the last row is `0 0 0 1`.
    #[must_use]
    pub fn from_columns(columns: [Vector3h; DIM]) -> Self {
        let mut m = [[0.0; DIM]; DIM];
        for (col, vector) in columns.iter().enumerate() {
            m[0][col] = vector.x;
            m[1][col] = vector.y;
            m[2][col] = vector.z;
        }
        Self { m }.pinned()
    }

    #[must_use]
    pub fn rows(&self) -> [[f64; DIM]; DIM] {
        self.m
    }

    /// Element at `(row, col)`; out-of-range indices read as `0.0`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row >= DIM || col >= DIM {
            tracing::warn!(row, col, "matrix index out of bounds");
            return 0.0;
        }
        self.m[row][col]
    }

    /// Writes `(row, col)`; out-of-range indices are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        if row >= DIM || col >= DIM {
            tracing::warn!(row, col, "matrix index out of bounds");
            return;
        }
        self.m[row][col] = value;
        self.m[DIM - 1][DIM - 1] = 1.0;
    }

    fn pinned(mut self) -> Self {
        self.m[DIM - 1][DIM - 1] = 1.0;
        self
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        let mut m = self.m;
        for value in m.iter_mut().flatten() {
            *value = f(*value);
        }
        Self { m }.pinned()
    }

    fn zip(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut m = self.m;
        for (row, other_row) in m.iter_mut().zip(other.m.iter()) {
            for (value, other_value) in row.iter_mut().zip(other_row.iter()) {
                *value = f(*value, *other_value);
            }
        }
        Self { m }.pinned()
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Add for Matrix4 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.zip(other, |a, b| a + b)
    }
}

impl Sub for Matrix4 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.zip(other, |a, b| a - b)
    }
}

impl Mul<f64> for Matrix4 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        self.map(|a| a * scalar)
    }
}

impl Div<f64> for Matrix4 {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        self.map(|a| a / scalar)
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let mut m = [[0.0; DIM]; DIM];
        for (row, out_row) in m.iter_mut().enumerate() {
            for (col, out) in out_row.iter_mut().enumerate() {
                *out = (0..DIM).map(|i| self.m[row][i] * other.m[i][col]).sum();
            }
        }
        Self { m }.pinned()
    }
}

impl Mul<Vector3h> for Matrix4 {
    type Output = Vector3h;

    fn mul(self, vector: Vector3h) -> Vector3h {
        let v = [vector.x, vector.y, vector.z, Vector3h::W];
        let row = |r: usize| -> f64 { (0..DIM).map(|c| self.m[r][c] * v[c]).sum() };

        Vector3h::with_notation(row(0), row(1), row(2), vector.notation)
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.m {
            writeln!(f, "[ {} {} {} {} ]", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}
