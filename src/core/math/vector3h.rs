use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// How a [`Vector3h`] renders itself; has no effect on arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VectorNotation {
    /// `< x y z >`
    #[default]
    Cartesian,
    /// `xi + yj + zk`, omitting zero terms.
    UnitVector,
}

/// A 3D position with an implicit homogeneous `w` of `1.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vector3h {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub notation: VectorNotation,
}

impl Vector3h {
    pub const W: f64 = 1.0;

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self::with_notation(x, y, z, VectorNotation::Cartesian)
    }

    #[must_use]
    pub const fn with_notation(x: f64, y: f64, z: f64, notation: VectorNotation) -> Self {
        Self { x, y, z, notation }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.dot(*self)
    }

    /// Unit-length copy. A zero vector yields NaN components.
    #[must_use]
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    #[must_use]
    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
            notation: self.notation,
        }
    }

    /// Component by index: 0 = x, 1 = y, 2 = z. Anything else reads as `0.0`.
    #[must_use]
    pub fn component(&self, index: usize) -> f64 {
        match index {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => {
                tracing::warn!(index, "vector component index out of bounds");
                0.0
            }
        }
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            x: f(self.x),
            y: f(self.y),
            z: f(self.z),
            notation: self.notation,
        }
    }
}

impl PartialEq for Vector3h {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl Add for Vector3h {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            notation: self.notation,
        }
    }
}

impl Sub for Vector3h {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + -other
    }
}

impl Neg for Vector3h {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

impl Mul<f64> for Vector3h {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        self.map(|a| a * scalar)
    }
}

impl Div<f64> for Vector3h {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        self.map(|a| a / scalar)
    }
}

impl fmt::Display for Vector3h {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.notation {
            VectorNotation::Cartesian => write!(f, "< {} {} {} >", self.x, self.y, self.z),
            VectorNotation::UnitVector => {
                let mut written = false;
                for (value, unit) in [(self.x, 'i'), (self.y, 'j'), (self.z, 'k')] {
                    if value == 0.0 {
                        continue;
                    }
                    if written {
                        let sign = if value >= 0.0 { '+' } else { '-' };
                        write!(f, " {sign} {}{unit}", value.abs())?;
                    } else {
                        write!(f, "{value}{unit}")?;
                    }
                    written = true;
                }
                if !written {
                    f.write_str("null vector")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Vector3h::new(1.0, 2.0, 3.0);
        let b = Vector3h::new(-4.0, 0.5, 2.0);

        assert_eq!(a + b, Vector3h::new(-3.0, 2.5, 5.0));
        assert_eq!(a - b, Vector3h::new(5.0, 1.5, 1.0));
        assert_eq!(a * 2.0, Vector3h::new(2.0, 4.0, 6.0));
        assert_eq!(a / 2.0, Vector3h::new(0.5, 1.0, 1.5));
    }

    #[test]
    fn test_dot_and_cross_ignore_w() {
        let x = Vector3h::new(1.0, 0.0, 0.0);
        let y = Vector3h::new(0.0, 1.0, 0.0);

        assert_eq!(x.dot(y), 0.0);
        assert_eq!(x.dot(x), 1.0);
        assert_eq!(x.cross(y), Vector3h::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(x), Vector3h::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_length_and_normalize() {
        let v = Vector3h::new(3.0, 0.0, 4.0);

        assert_eq!(v.length(), 5.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.normalize(), Vector3h::new(0.6, 0.0, 0.8));
    }

    #[test]
    fn test_normalize_zero_vector_is_nan() {
        let n = Vector3h::default().normalize();

        assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());
    }

    #[test]
    fn test_component_access() {
        let v = Vector3h::new(7.0, 8.0, 9.0);

        assert_eq!(v.component(0), 7.0);
        assert_eq!(v.component(2), 9.0);
        assert_eq!(v.component(3), 0.0);
    }

    #[test]
    fn test_display_cartesian() {
        assert_eq!(Vector3h::new(1.5, -2.0, 0.0).to_string(), "< 1.5 -2 0 >");
    }

    #[test]
    fn test_display_unit_vector() {
        let unit = |x, y, z| Vector3h::with_notation(x, y, z, VectorNotation::UnitVector);

        assert_eq!(unit(1.0, 2.0, -3.0).to_string(), "1i + 2j - 3k");
        assert_eq!(unit(0.0, -2.0, 3.0).to_string(), "-2j + 3k");
        assert_eq!(unit(0.0, 0.0, 0.0).to_string(), "null vector");
    }

    #[test]
    fn test_notation_does_not_affect_equality() {
        let a = Vector3h::new(1.0, 2.0, 3.0);
        let b = Vector3h::with_notation(1.0, 2.0, 3.0, VectorNotation::UnitVector);

        assert_eq!(a, b);
    }
}
