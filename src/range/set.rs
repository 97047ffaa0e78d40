use std::collections::BTreeMap;

use crate::foundation::core::{Instant, Interval};
use crate::foundation::error::{FramespanError, FramespanResult};

/// A normalized set of half-open intervals over one temporal axis.
///
/// The set answers "which instants does this hold for" for descriptor
/// validity and similar per-frame flags. Stored intervals are pairwise
/// disjoint, sorted ascending, and never adjacent: the axis is discrete, so
/// an interval ending exactly where another starts is the same covered
/// stretch and is kept merged. All mutation goes through [`IntervalSet::add`];
/// readers only ever see normalized intervals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalSet<I: Instant> {
    spans: BTreeMap<I, I>, // start -> end (exclusive); contiguous spans always merged
}

impl<I: Instant> IntervalSet<I> {
    /// Creates a new, empty set.
    pub fn new() -> Self {
        Self {
            spans: BTreeMap::new(),
        }
    }

    /// True iff no instant is covered.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Number of disjoint intervals, not the number of covered instants.
    pub fn interval_count(&self) -> usize {
        self.spans.len()
    }

    /// Subsumes `[start, end)` into the set.
    ///
    /// Existing intervals that overlap or touch the added span collapse into
    /// a single interval spanning the union. Runs in time proportional to
    /// the number of intervals touched. Returns whether the set changed;
    /// adding an empty span is a no-op.
    pub fn add(&mut self, start: I, end: I) -> FramespanResult<bool> {
        if start > end {
            return Err(FramespanError::invalid_range(format!(
                "cannot add span with start {start:?} after end {end:?}"
            )));
        }
        if start == end {
            return Ok(false);
        }

        let mut lo = start;
        let mut hi = end;

        // The interval starting at or before `start` either already covers
        // the whole span, or extends it to the left when it overlaps or
        // touches.
        if let Some((&s, &e)) = self.spans.range(..=start).next_back() {
            if e >= end {
                return Ok(false);
            }
            if e >= start {
                lo = s;
            }
        }

        // Every interval starting inside `[lo, hi]` is absorbed; the last
        // one may push the union's end further right. The inclusive upper
        // bound is what folds in an interval starting exactly at `end`.
        let absorbed: Vec<I> = self.spans.range(lo..=hi).map(|(&s, _)| s).collect();
        if let Some(last) = absorbed.last() {
            let last_end = self.spans[last];
            if last_end > hi {
                hi = last_end;
            }
        }
        for s in absorbed {
            self.spans.remove(&s);
        }

        self.spans.insert(lo, hi);
        Ok(true)
    }

    /// [`IntervalSet::add`], taking the span as an interval.
    pub fn add_interval(&mut self, interval: Interval<I>) -> FramespanResult<bool> {
        self.add(interval.start, interval.end)
    }

    /// Subsumes the single instant `at`.
    pub fn add_instant(&mut self, at: I) -> FramespanResult<bool> {
        self.add(at, at.next())
    }

    /// True iff some interval covers `at`.
    pub fn contains(&self, at: I) -> bool {
        match self.spans.range(..=at).next_back() {
            Some((_, &e)) => e > at,
            None => false,
        }
    }

    /// True iff every instant of `[start, end)` is covered.
    ///
    /// Contiguous coverage always lives in one stored interval, so a single
    /// neighbor lookup decides this.
    pub fn contains_span(&self, start: I, end: I) -> bool {
        if start >= end {
            return true;
        }
        match self.spans.range(..=start).next_back() {
            Some((_, &e)) => e >= end,
            None => false,
        }
    }

    /// Smallest interval covering the whole set, empty when the set is.
    pub fn span(&self) -> Interval<I> {
        match (self.spans.first_key_value(), self.spans.last_key_value()) {
            (Some((&start, _)), Some((_, &end))) => Interval { start, end },
            _ => Interval::empty_at(I::zero()),
        }
    }

    /// The normalized intervals in ascending order.
    pub fn intervals(&self) -> impl Iterator<Item = Interval<I>> + '_ {
        self.spans
            .iter()
            .map(|(&start, &end)| Interval { start, end })
    }

    /// The intervals cropped to `window`, in ascending order.
    pub fn intervals_within(&self, window: Interval<I>) -> impl Iterator<Item = Interval<I>> + '_ {
        self.intervals()
            .filter(move |iv| iv.intersects(window))
            .map(move |iv| iv.intersection(window))
    }

    /// Walk every covered instant in ascending order.
    ///
    /// Lazy and restartable; bounded by the set's span.
    pub fn instants(&self) -> impl Iterator<Item = I> + '_ {
        self.intervals().flat_map(Interval::instants)
    }
}

impl<I: Instant> Default for IntervalSet<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Instant> FromIterator<Interval<I>> for IntervalSet<I> {
    /// Collects intervals, dropping empties and normalizing as it goes.
    fn from_iter<T: IntoIterator<Item = Interval<I>>>(iter: T) -> Self {
        let mut set = Self::new();
        for iv in iter {
            if iv.start <= iv.end {
                // add only fails on reversed bounds, excluded above
                let _ = set.add(iv.start, iv.end);
            }
        }
        set
    }
}

// Serialized as the normalized interval list; the map encoding stays
// private and deserialization re-normalizes whatever it is handed.
impl<I: Instant + serde::Serialize> serde::Serialize for IntervalSet<I> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.intervals())
    }
}

impl<'de, I: Instant + serde::Deserialize<'de>> serde::Deserialize<'de> for IntervalSet<I> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<Interval<I>>::deserialize(deserializer)?;
        let mut set = Self::new();
        for iv in items {
            set.add(iv.start, iv.end).map_err(serde::de::Error::custom)?;
        }
        Ok(set)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/range/set.rs"]
mod tests;
