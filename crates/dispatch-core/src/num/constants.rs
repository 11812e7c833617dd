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

/// A trait for floating-point types that carry a default comparison
/// tolerance as an associated constant.
///
/// Feasibility and integrality checks throughout the engine compare
/// accumulated floating-point sums against bounds. A small absolute
/// tolerance keeps near-equal sums from rejecting a true-optimal integral
/// solution. The constant is scaled to the precision of the type.
pub trait Tolerance {
    /// The default absolute tolerance for the implementing type.
    const TOLERANCE: Self;
}

macro_rules! impl_tolerance_for {
    ($t:ty, $value:expr) => {
        impl Tolerance for $t {
            const TOLERANCE: Self = $value;
        }
    };
}

impl_tolerance_for!(f64, 1e-6);
impl_tolerance_for!(f32, 1e-4);
