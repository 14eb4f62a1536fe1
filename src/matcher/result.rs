//! Per-bundle match results.

use num_traits::Float;

/// Best match for every bundle of the first collection.
///
/// `indices`, `distances` and the completion flags are index-aligned with the
/// first collection. A slot without a match holds `None` and infinity. That
/// happens when the bundle had no tracts, the second collection was empty,
/// every candidate distance was non-finite, or the search was cancelled.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<F> {
    indices: Vec<Option<usize>>,
    distances: Vec<F>,
    complete: Vec<bool>,
}

/// One outer-loop slot as produced by a worker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Slot<F> {
    pub index: Option<usize>,
    pub distance: F,
    pub complete: bool,
}

impl<F: Float> Slot<F> {
    /// The "no match yet" sentinel.
    pub fn pending() -> Self {
        Self {
            index: None,
            distance: F::infinity(),
            complete: false,
        }
    }
}

impl<F: Float> MatchResult<F> {
    pub(crate) fn from_slots(slots: Vec<Slot<F>>) -> Self {
        let mut result = Self {
            indices: Vec::with_capacity(slots.len()),
            distances: Vec::with_capacity(slots.len()),
            complete: Vec::with_capacity(slots.len()),
        };
        for slot in slots {
            result.indices.push(slot.index);
            result.distances.push(slot.distance);
            result.complete.push(slot.complete);
        }
        result
    }

    /// Index of the best candidate per bundle.
    pub fn indices(&self) -> &[Option<usize>] {
        &self.indices
    }

    /// Aggregate distance to the best candidate per bundle.
    pub fn distances(&self) -> &[F] {
        &self.distances
    }

    /// Best candidate and its distance for bundle `i`.
    pub fn best(&self, i: usize) -> Option<(usize, F)> {
        let index = (*self.indices.get(i)?)?;
        Some((index, self.distances[i]))
    }

    /// True if bundle `i` was searched against every candidate.
    pub fn is_slot_complete(&self, i: usize) -> bool {
        self.complete.get(i).copied().unwrap_or(false)
    }

    /// True if every bundle was searched to the end.
    pub fn is_complete(&self) -> bool {
        self.complete.iter().all(|&c| c)
    }

    /// Indices of bundles left unsearched by a cancellation.
    pub fn incomplete(&self) -> impl Iterator<Item = usize> + '_ {
        self.complete
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| if c { None } else { Some(i) })
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Splits into the index and distance sequences.
    pub fn into_parts(self) -> (Vec<Option<usize>>, Vec<F>) {
        (self.indices, self.distances)
    }
}
