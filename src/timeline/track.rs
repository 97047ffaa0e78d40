use std::collections::BTreeMap;

use crate::foundation::core::{Instant, Interval};
use crate::foundation::error::{FramespanError, FramespanResult};

/// A half-open span of instants paired with the value held across it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Run<I, V> {
    /// The covered span.
    pub span: Interval<I>,
    /// The value every instant of the span takes.
    pub value: V,
}

/// A sparse run-length mapping from instant to value.
///
/// Timelines hold per-frame attribute data over long videos, so the
/// representation is runs rather than one entry per frame. Runs are sorted,
/// non-overlapping, and maximally compressed: no two adjacent runs carry an
/// equal value. Every mutation restores that invariant before returning;
/// nothing else in the crate ever re-compresses a timeline after the fact.
///
/// Instants not covered by any run are unset. Values only need `Clone` and
/// value equality; equality is what decides every merge.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline<I: Instant, V> {
    runs: BTreeMap<I, (I, V)>, // start -> (end exclusive, value); adjacent equal runs always merged
}

impl<I: Instant, V> Timeline<I, V> {
    /// Creates a new, empty timeline.
    pub fn new() -> Self {
        Self {
            runs: BTreeMap::new(),
        }
    }

    /// True iff no instant is set.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Number of stored runs.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// The value covering `at`, or `None` when `at` is unset.
    pub fn get(&self, at: I) -> Option<&V> {
        let (_, &(end, ref value)) = self.runs.range(..=at).next_back()?;
        (end > at).then_some(value)
    }

    /// Smallest interval covering every set instant, empty when none is.
    pub fn span(&self) -> Interval<I> {
        match (self.runs.first_key_value(), self.runs.last_key_value()) {
            (Some((&start, _)), Some((_, &(end, _)))) => Interval { start, end },
            _ => Interval::empty_at(I::zero()),
        }
    }

    /// The runs in ascending order, as read-only snapshots.
    pub fn runs(&self) -> impl Iterator<Item = Run<I, V>> + '_
    where
        V: Clone,
    {
        self.runs.iter().map(|(&start, &(end, ref value))| Run {
            span: Interval { start, end },
            value: value.clone(),
        })
    }
}

impl<I: Instant, V: Clone + PartialEq> Timeline<I, V> {
    /// Overwrites `[start, end)` with `value`.
    ///
    /// Runs partially overlapping the write keep their non-overlapping
    /// remainder with the original value; a run strictly containing the
    /// write is split around it. The written span then merges with an
    /// equal-valued neighbor on either side, so compression is restored
    /// before the call returns. Writing an empty span is a no-op.
    pub fn set(&mut self, start: I, end: I, value: V) -> FramespanResult<()> {
        if start > end {
            return Err(FramespanError::invalid_range(format!(
                "cannot set span with start {start:?} after end {end:?}"
            )));
        }
        if start == end {
            return Ok(());
        }

        let mut lo = start;
        let mut hi = end;

        // Left neighbor: a run starting strictly before the write. An
        // equal-valued one that reaches the write absorbs it; otherwise an
        // overlapping one is trimmed, and split when it spills past the end.
        if let Some((s, e, held)) = self
            .runs
            .range(..lo)
            .next_back()
            .map(|(&s, &(e, ref v))| (s, e, v.clone()))
        {
            if e >= lo && held == value {
                lo = s;
            } else if e > lo {
                self.runs.insert(s, (lo, held.clone()));
                if e > hi {
                    self.runs.insert(hi, (e, held));
                }
            }
        }

        // Runs starting inside the write are overwritten. The last one may
        // spill past the end: an equal value extends the write, a different
        // one keeps its remainder.
        let overwritten: Vec<I> = self.runs.range(lo..hi).map(|(&s, _)| s).collect();
        if let Some(last) = overwritten.last() {
            let (e, held) = self.runs[last].clone();
            if held == value {
                if e > hi {
                    hi = e;
                }
            } else if e > hi {
                self.runs.insert(hi, (e, held));
            }
        }
        for s in overwritten {
            self.runs.remove(&s);
        }

        // Right neighbor: a run starting exactly at the end merges when it
        // carries the same value.
        if let Some(&(e, ref held)) = self.runs.get(&hi) {
            if *held == value {
                self.runs.remove(&hi);
                hi = e;
            }
        }

        self.runs.insert(lo, (hi, value));
        Ok(())
    }

    /// Unsets every instant of `[start, end)`.
    ///
    /// Runs partially overlapping the cleared span are trimmed to their
    /// remainder; a run strictly containing it is split around it. Returns
    /// whether anything was unset.
    pub fn clear(&mut self, start: I, end: I) -> FramespanResult<bool> {
        if start > end {
            return Err(FramespanError::invalid_range(format!(
                "cannot clear span with start {start:?} after end {end:?}"
            )));
        }
        if start == end {
            return Ok(false);
        }

        let mut removed = false;

        // A run entering the cleared span from the left keeps its prefix;
        // one containing the whole span also keeps its suffix, and nothing
        // else can overlap.
        if let Some((s, e, held)) = self
            .runs
            .range(..start)
            .next_back()
            .map(|(&s, &(e, ref v))| (s, e, v.clone()))
        {
            if e > start {
                removed = true;
                self.runs.insert(s, (start, held.clone()));
                if e > end {
                    self.runs.insert(end, (e, held));
                    return Ok(true);
                }
            }
        }

        // Runs starting inside the span vanish; the last may leave a suffix.
        let inside: Vec<I> = self.runs.range(start..end).map(|(&s, _)| s).collect();
        if let Some(last) = inside.last() {
            removed = true;
            let (e, held) = self.runs[last].clone();
            if e > end {
                self.runs.insert(end, (e, held));
            }
        }
        for s in inside {
            self.runs.remove(&s);
        }

        Ok(removed)
    }
}

impl<I: Instant, V> Default for Timeline<I, V> {
    fn default() -> Self {
        Self::new()
    }
}

// Serialized as the run list; deserialization rebuilds through `set`, so a
// hand-edited or stale document comes back normalized.
impl<I, V> serde::Serialize for Timeline<I, V>
where
    I: Instant + serde::Serialize,
    V: Clone + serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.runs())
    }
}

impl<'de, I, V> serde::Deserialize<'de> for Timeline<I, V>
where
    I: Instant + serde::Deserialize<'de>,
    V: Clone + PartialEq + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<Run<I, V>>::deserialize(deserializer)?;
        let mut timeline = Self::new();
        for run in items {
            timeline
                .set(run.span.start, run.span.end, run.value)
                .map_err(serde::de::Error::custom)?;
        }
        Ok(timeline)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/track.rs"]
mod tests;
