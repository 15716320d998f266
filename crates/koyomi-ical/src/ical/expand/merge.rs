//! Merging per-rule occurrence streams into one ordered stream.

use super::stream::{Occurrence, OccurrenceStream};

/// Merges a set of occurrence streams into a single sorted stream.
///
/// One front occurrence is buffered per source. Every call selects the
/// minimum start among the fronts, then refills every front holding that
/// start, so coincident candidates from different sources collapse into a
/// single emission and all contributing sources advance past it. With equal
/// starts the earliest-constructed source supplies the emitted value.
#[derive(Debug)]
pub struct OccurrenceMerger {
    sources: Vec<Box<dyn OccurrenceStream>>,
    fronts: Vec<Option<Occurrence>>,
    bounded: bool,
}

impl OccurrenceMerger {
    /// Builds a merger over the given streams, priming one front per stream.
    #[must_use]
    pub fn new(mut sources: Vec<Box<dyn OccurrenceStream>>) -> Self {
        let bounded = sources.iter().all(|s| s.is_bounded());
        let fronts = sources
            .iter_mut()
            .map(|s| s.next_occurrence())
            .collect();
        Self {
            sources,
            fronts,
            bounded,
        }
    }

    /// A merger over no streams: bounded and immediately exhausted.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
            fronts: Vec::new(),
            bounded: true,
        }
    }
}

impl OccurrenceStream for OccurrenceMerger {
    fn next_occurrence(&mut self) -> Option<Occurrence> {
        let min_start = self.fronts.iter().flatten().map(|o| o.start).min()?;

        let mut result = None;
        for (front, source) in self.fronts.iter_mut().zip(&mut self.sources) {
            if front.is_some_and(|o| o.start == min_start) {
                let taken = std::mem::replace(front, source.next_occurrence());
                if result.is_none() {
                    result = taken;
                }
            }
        }
        result
    }

    /// Bounded iff every constituent stream is bounded; vacuously true for
    /// zero streams.
    fn is_bounded(&self) -> bool {
        self.bounded
    }
}
