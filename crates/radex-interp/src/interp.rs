//! Linear interpolation over an axis/value table pair.
//!
//! Either axis may be interpolated in natural-log space. The log transform
//! has no internal guard: callers enabling it must supply positive axis,
//! value and query entries.

use radex_core::RadioError;

use crate::bracket::{find_bracket, Bracket};

/// What to do with a query outside the axis range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    /// Report [`RadioError::OutOfRange`].
    #[default]
    Fail,
    /// Return the value at the nearest axis end.
    Clamp,
}

/// Interpolation switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InterpOptions {
    /// Interpolate in `ln(x)`.
    pub log_axis: bool,
    /// Interpolate in `ln(y)` and exponentiate the result.
    pub log_value: bool,
    /// Out-of-range policy.
    pub overflow: Overflow,
}

impl InterpOptions {
    /// Plain linear interpolation that fails out of range.
    pub const LINEAR: Self = Self {
        log_axis: false,
        log_value: false,
        overflow: Overflow::Fail,
    };

    /// Plain linear interpolation that clamps at the table edges.
    pub const CLAMPED: Self = Self {
        log_axis: false,
        log_value: false,
        overflow: Overflow::Clamp,
    };
}

/// Interpolate `values` over `axis` at `x`.
///
/// # Errors
///
/// - [`RadioError::LengthMismatch`] when the tables differ in length.
/// - [`RadioError::DegenerateAxis`] / [`RadioError::SearchDiverged`] from
///   the bracket search.
/// - [`RadioError::OutOfRange`] for an out-of-range query under
///   [`Overflow::Fail`].
pub fn interp_1d(
    x: f64,
    axis: &[f64],
    values: &[f64],
    options: InterpOptions,
) -> Result<f64, RadioError> {
    if axis.len() != values.len() {
        return Err(RadioError::LengthMismatch {
            expected: axis.len(),
            actual: values.len(),
        });
    }
    let n = axis.len();
    let id1 = match find_bracket(axis, x)? {
        Bracket::Within(i) => i,
        Bracket::Below => return edge(x, axis, values[0], options.overflow),
        Bracket::Above => return edge(x, axis, values[n - 1], options.overflow),
    };
    let id2 = id1 + 1;

    let (x1, x2, x_) = if options.log_axis {
        (axis[id1].ln(), axis[id2].ln(), x.ln())
    } else {
        (axis[id1], axis[id2], x)
    };
    let (y1, y2) = if options.log_value {
        (values[id1].ln(), values[id2].ln())
    } else {
        (values[id1], values[id2])
    };

    let r = (y2 - y1) / (x2 - x1) * (x_ - x1) + y1;
    Ok(if options.log_value { r.exp() } else { r })
}

fn edge(x: f64, axis: &[f64], nearest: f64, overflow: Overflow) -> Result<f64, RadioError> {
    match overflow {
        Overflow::Clamp => Ok(nearest),
        Overflow::Fail => Err(RadioError::OutOfRange {
            value: x,
            first: axis[0],
            last: axis[axis.len() - 1],
        }),
    }
}

/// A validated axis/value table with fixed interpolation options.
#[derive(Clone, Copy, Debug)]
pub struct Table<'a> {
    pub(crate) axis: &'a [f64],
    pub(crate) values: &'a [f64],
    pub(crate) options: InterpOptions,
}

impl<'a> Table<'a> {
    /// Pair an axis with its values.
    ///
    /// # Errors
    ///
    /// [`RadioError::LengthMismatch`] if the slices differ in length,
    /// [`RadioError::DegenerateAxis`] if the axis has fewer than two
    /// entries or equal endpoints.
    pub fn new(axis: &'a [f64], values: &'a [f64], options: InterpOptions) -> Result<Self, RadioError> {
        if axis.len() != values.len() {
            return Err(RadioError::LengthMismatch {
                expected: axis.len(),
                actual: values.len(),
            });
        }
        if axis.len() < 2 || axis[0] == axis[axis.len() - 1] {
            return Err(RadioError::DegenerateAxis { len: axis.len() });
        }
        Ok(Self {
            axis,
            values,
            options,
        })
    }

    /// Interpolate at `x`.
    pub fn eval(&self, x: f64) -> Result<f64, RadioError> {
        interp_1d(x, self.axis, self.values, self.options)
    }

    /// The `(first, last)` axis entries.
    pub fn range(&self) -> (f64, f64) {
        (self.axis[0], self.axis[self.axis.len() - 1])
    }

    /// Number of tabulated points.
    pub fn len(&self) -> usize {
        self.axis.len()
    }

    /// Whether the table has no points. [`Table::new`] requires at least two.
    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }
}
