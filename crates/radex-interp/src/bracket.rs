//! Binary bracket search over a monotonic axis.
//!
//! The axis direction is detected from its endpoints rather than assumed,
//! so tables tabulated in either order work unchanged.

use radex_core::RadioError;

/// Iteration cap for [`find_bracket`]. A well-formed axis converges in
/// `log2(len)` steps; hitting the cap means the axis is corrupt.
pub const MAX_SEARCH_ITERATIONS: usize = 100;

/// Ordering of a monotonic axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// `axis[0] < axis[n - 1]`.
    Ascending,
    /// Anything else, including equal endpoints.
    Descending,
}

impl Direction {
    /// Detect the direction of `axis` from its first and last entries.
    ///
    /// Returns `None` for an empty axis.
    pub fn detect(axis: &[f64]) -> Option<Self> {
        let (first, last) = (axis.first()?, axis.last()?);
        if first < last {
            Some(Self::Ascending)
        } else {
            Some(Self::Descending)
        }
    }
}

/// Where a query lies relative to an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bracket {
    /// Before the first entry (in the axis direction).
    Below,
    /// Between `axis[i]` and `axis[i + 1]`.
    Within(usize),
    /// Past the last entry (in the axis direction).
    Above,
}

impl Bracket {
    /// Flat index form: `-1` below, `i` within, `len` above.
    pub fn to_index(self, len: usize) -> isize {
        match self {
            Self::Below => -1,
            Self::Within(i) => i as isize,
            Self::Above => len as isize,
        }
    }
}

/// Find the bracket of `x` on a monotonic `axis`.
///
/// For an ascending axis a query strictly inside the range satisfies
/// `axis[i] <= x < axis[i + 1]`; for a descending one
/// `axis[i] > x >= axis[i + 1]`. A query equal to the last entry falls in
/// the final interval. Values beyond the first entry are
/// [`Bracket::Below`], beyond the last [`Bracket::Above`].
///
/// # Errors
///
/// [`RadioError::DegenerateAxis`] if the axis has fewer than two entries
/// or equal endpoints, [`RadioError::SearchDiverged`] if the search exceeds
/// [`MAX_SEARCH_ITERATIONS`].
pub fn find_bracket(axis: &[f64], x: f64) -> Result<Bracket, RadioError> {
    let n = axis.len();
    if n < 2 || axis[0] == axis[n - 1] {
        return Err(RadioError::DegenerateAxis { len: n });
    }
    let mut lo = 0usize;
    let mut hi = n - 1;
    let (first, last) = (axis[lo], axis[hi]);

    let direction = if first < last {
        Direction::Ascending
    } else {
        Direction::Descending
    };
    match direction {
        Direction::Ascending => {
            if x > last {
                return Ok(Bracket::Above);
            }
            if x < first {
                return Ok(Bracket::Below);
            }
        }
        Direction::Descending => {
            if x < last {
                return Ok(Bracket::Above);
            }
            if x > first {
                return Ok(Bracket::Below);
            }
        }
    }

    let mut iterations = 0;
    loop {
        iterations += 1;
        if hi == lo + 1 {
            return Ok(Bracket::Within(lo));
        }
        if iterations > MAX_SEARCH_ITERATIONS {
            return Err(RadioError::SearchDiverged {
                query: x,
                iterations,
            });
        }
        // Half-away-from-zero rounding of the midpoint.
        let mid = ((lo + hi) as f64 / 2.0).round() as usize;
        let pivot = axis[mid];
        match direction {
            Direction::Ascending => {
                if x < pivot {
                    hi = mid;
                } else {
                    lo = mid;
                }
            }
            Direction::Descending => {
                if x < pivot {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
        }
    }
}
