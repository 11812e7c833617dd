// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Tolerance-Aware Comparisons
//!
//! Free functions for comparing floating-point quantities under a small
//! absolute tolerance. The LP relaxation and the branch-and-bound search
//! accumulate sums of many terms; exact comparisons would spuriously reject
//! feasible points whose constraint slack is a rounding error away from zero.
//!
//! All helpers are generic over `num_traits::Float` and take the tolerance
//! explicitly so callers can thread a configured value through.

use num_traits::Float;

/// Returns `true` if `a ≤ b` within the given tolerance.
///
/// # Examples
///
/// ```rust
/// # use dispatch_core::num::approx::approx_le;
/// assert!(approx_le(1.0_f64, 1.0 + 1e-9, 1e-6));
/// assert!(approx_le(1.0 + 1e-9, 1.0_f64, 1e-6));
/// assert!(!approx_le(1.1_f64, 1.0, 1e-6));
/// ```
#[inline]
pub fn approx_le<T>(a: T, b: T, tolerance: T) -> bool
where
    T: Float,
{
    a <= b + tolerance
}

/// Returns `true` if `a ≥ b` within the given tolerance.
#[inline]
pub fn approx_ge<T>(a: T, b: T, tolerance: T) -> bool
where
    T: Float,
{
    a + tolerance >= b
}

/// Returns `true` if `value` is within the given tolerance of an integer.
///
/// # Examples
///
/// ```rust
/// # use dispatch_core::num::approx::is_integral;
/// assert!(is_integral(1.0 - 1e-9_f64, 1e-6));
/// assert!(is_integral(0.0_f64, 1e-6));
/// assert!(!is_integral(0.5_f64, 1e-6));
/// ```
#[inline]
pub fn is_integral<T>(value: T, tolerance: T) -> bool
where
    T: Float,
{
    (value - value.round()).abs() <= tolerance
}

/// Returns the distance of `value`'s fractional part from one half.
///
/// A return value of zero means the value is maximally fractional (exactly
/// halfway between two integers); a value of one half means it is integral.
/// The "most fractional" branching rule minimizes this quantity.
#[inline]
pub fn distance_to_half<T>(value: T) -> T
where
    T: Float,
{
    let half = T::one() / (T::one() + T::one());
    ((value - value.floor()) - half).abs()
}
