//! 4x4 homogeneous transform matrices and their text form.
//!
//! Matrices use the row-vector convention: a point `(x, y)` is transformed
//! as `[x, y, 0, 1] · M`. Only the entries that touch x, y and w take part in
//! 2D mapping:
//!
//! ```text
//! X = x·m11 + y·m21 + m41
//! Y = x·m12 + y·m22 + m42
//! W = x·m14 + y·m24 + m44
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of fields in a serialized matrix.
pub const MATRIX_FIELDS: usize = 16;

/// Determinants smaller than this are treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// Errors produced while parsing a matrix string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixParseError {
    /// The string did not contain exactly 16 `;`-separated fields.
    #[error("Transform matrix must have {MATRIX_FIELDS} fields, got {0}")]
    WrongFieldCount(usize),

    /// A field is not a decimal number.
    #[error("Transform matrix field {index} is not a number: {value:?}")]
    InvalidNumber { index: usize, value: String },

    /// A field parsed to NaN or infinity.
    #[error("Transform matrix field {index} is not finite")]
    NonFinite { index: usize },
}

/// A row-major 4x4 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMatrix {
    values: [f32; MATRIX_FIELDS],
}

impl TransformMatrix {
    /// The identity matrix.
    pub const IDENTITY: TransformMatrix = TransformMatrix {
        values: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Build a matrix from row-major values.
    pub fn from_row_major(values: [f32; MATRIX_FIELDS]) -> Self {
        Self { values }
    }

    /// A pure translation by (tx, ty).
    pub fn translation(tx: f32, ty: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.values[12] = tx;
        m.values[13] = ty;
        m
    }

    /// A scale by (sx, sy) around the origin.
    pub fn scale(sx: f32, sy: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.values[0] = sx;
        m.values[5] = sy;
        m
    }

    /// Row-major values.
    pub fn values(&self) -> &[f32; MATRIX_FIELDS] {
        &self.values
    }

    /// Entry at 1-based (row, column), matching the `mRC` naming.
    #[inline]
    fn m(&self, row: usize, col: usize) -> f64 {
        self.values[(row - 1) * 4 + (col - 1)] as f64
    }

    /// Whether this is exactly the identity matrix.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// The 3x3 projective matrix acting on `[x, y, 1]` row vectors.
    pub fn projective(&self) -> Projective {
        Projective([
            [self.m(1, 1), self.m(1, 2), self.m(1, 4)],
            [self.m(2, 1), self.m(2, 2), self.m(2, 4)],
            [self.m(4, 1), self.m(4, 2), self.m(4, 4)],
        ])
    }
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl FromStr for TransformMatrix {
    type Err = MatrixParseError;

    /// Parse 16 `;`-separated numbers.
    ///
    /// Commas are treated as decimal separators, so `"1,5"` and `"1.5"` parse
    /// to the same value. Surrounding whitespace on each field is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace(',', ".");
        let fields: Vec<&str> = normalized.split(';').collect();
        if fields.len() != MATRIX_FIELDS {
            return Err(MatrixParseError::WrongFieldCount(fields.len()));
        }

        let mut values = [0.0f32; MATRIX_FIELDS];
        for (index, (slot, field)) in values.iter_mut().zip(&fields).enumerate() {
            let field = field.trim();
            let value: f32 = field.parse().map_err(|_| MatrixParseError::InvalidNumber {
                index,
                value: field.to_string(),
            })?;
            if !value.is_finite() {
                return Err(MatrixParseError::NonFinite { index });
            }
            *slot = value;
        }

        Ok(Self { values })
    }
}

impl fmt::Display for TransformMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

/// A 3x3 projective map on row vectors `[x, y, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projective([[f64; 3]; 3]);

impl Projective {
    /// Map a point, dividing by `w` clamped below by `min_w`.
    #[inline]
    fn apply(&self, x: f64, y: f64, min_w: f64) -> (f64, f64) {
        let m = &self.0;
        let px = x * m[0][0] + y * m[1][0] + m[2][0];
        let py = x * m[0][1] + y * m[1][1] + m[2][1];
        let w = (x * m[0][2] + y * m[1][2] + m[2][2]).max(min_w);
        (px / w, py / w)
    }

    /// Map a point forward, the way canvas bounds are computed.
    #[inline]
    pub fn forward(&self, x: f64, y: f64) -> (f64, f64) {
        self.apply(x, y, f32::EPSILON as f64)
    }

    /// Map a point with an unclamped homogeneous divide.
    ///
    /// Returns `None` when the point maps to (or behind) infinity.
    #[inline]
    pub fn map(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let m = &self.0;
        let w = x * m[0][2] + y * m[1][2] + m[2][2];
        if w.abs() < SINGULAR_EPSILON {
            return None;
        }
        let px = (x * m[0][0] + y * m[1][0] + m[2][0]) / w;
        let py = (x * m[0][1] + y * m[1][1] + m[2][1]) / w;
        Some((px, py))
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse via the adjugate. `None` for singular matrices.
    pub fn inverse(&self) -> Option<Projective> {
        let det = self.determinant();
        if det.abs() < SINGULAR_EPSILON || !det.is_finite() {
            return None;
        }
        let m = &self.0;
        let inv_det = 1.0 / det;
        let cofactor = |r0: usize, r1: usize, c0: usize, c1: usize| {
            m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0]
        };
        Some(Projective([
            [
                cofactor(1, 2, 1, 2) * inv_det,
                -cofactor(0, 2, 1, 2) * inv_det,
                cofactor(0, 1, 1, 2) * inv_det,
            ],
            [
                -cofactor(1, 2, 0, 2) * inv_det,
                cofactor(0, 2, 0, 2) * inv_det,
                -cofactor(0, 1, 0, 2) * inv_det,
            ],
            [
                cofactor(1, 2, 0, 1) * inv_det,
                -cofactor(0, 2, 0, 1) * inv_det,
                cofactor(0, 1, 0, 1) * inv_det,
            ],
        ]))
    }
}
