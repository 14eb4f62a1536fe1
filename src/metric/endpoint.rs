//! Endpoint distance.

use super::{Measurement, Metric};
use crate::tract::Curve;
use num_traits::Float;

/// Mean distance between the curves' corresponding endpoints.
///
/// Only the first and last samples are compared, so curves that start and end
/// in the same places match regardless of their course in between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Endpoints;

impl<F: Float> Metric<F> for Endpoints {
    fn name(&self) -> &'static str {
        "endpoints"
    }

    fn measure(&self, a: &Curve<F>, b: &Curve<F>) -> Measurement<F> {
        let (Some(a0), Some(a1), Some(b0), Some(b1)) = (a.start(), a.end(), b.start(), b.end())
        else {
            return Measurement::new(F::zero(), false);
        };
        let two = F::one() + F::one();
        Measurement::best_of(
            (a0.distance(b0) + a1.distance(b1)) / two,
            (a0.distance(b1) + a1.distance(b0)) / two,
        )
    }
}
