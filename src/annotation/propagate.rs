use crate::annotation::model::AnnotationSet;
use crate::foundation::core::{FrameIndex, Instant};
use crate::foundation::error::{FramespanError, FramespanResult};
use crate::interp::engine::interpolate_values;
use crate::range::set::IntervalSet;

/// Copies the attribute values a descriptor holds at `source` over every
/// instant of `targets`, extending its validity to match.
///
/// Static attributes already hold one value everywhere and are left alone;
/// dynamic attributes with no value at `source` have nothing to copy.
#[tracing::instrument(skip(set, targets))]
pub fn propagate(
    set: &mut AnnotationSet,
    id: u64,
    source: FrameIndex,
    targets: &IntervalSet<FrameIndex>,
) -> FramespanResult<()> {
    let desc = set
        .descriptor_mut(id)
        .ok_or(FramespanError::UnknownDescriptor(id))?;

    for attr in desc.attributes_mut() {
        if !attr.config().dynamic {
            continue;
        }
        let Some(value) = attr.value_at(source).cloned() else {
            continue;
        };
        for window in targets.intervals() {
            attr.set_span(window.start, window.end, value.clone())?;
        }
    }
    for window in targets.intervals() {
        desc.mark_valid(window.start, window.end)?;
    }
    Ok(())
}

/// Fills the gap between two keyframed frames of a descriptor.
///
/// Each dynamic attribute with values at both `start` and `end` has the
/// frames of `[start, end)` rewritten with the engine's compressed output;
/// the value at `end` owns that boundary and is untouched. An attribute
/// missing one boundary value propagates the known side across the gap
/// instead, and one missing both is left alone. The whole `[start, end]`
/// becomes valid.
#[tracing::instrument(skip(set))]
pub fn interpolate_descriptor(
    set: &mut AnnotationSet,
    id: u64,
    start: FrameIndex,
    end: FrameIndex,
) -> FramespanResult<()> {
    if start > end {
        return Err(FramespanError::invalid_range(format!(
            "cannot interpolate from {start:?} back to {end:?}"
        )));
    }
    let desc = set
        .descriptor_mut(id)
        .ok_or(FramespanError::UnknownDescriptor(id))?;
    if start == end {
        desc.mark_valid(start, end.next())?;
        return Ok(());
    }

    let steps = end.offset_from(start);
    for attr in desc.attributes_mut() {
        if !attr.config().dynamic {
            continue;
        }
        let at_start = attr.value_at(start).cloned();
        let at_end = attr.value_at(end).cloned();
        match (at_start, at_end) {
            (Some(a), Some(b)) => {
                let filled = interpolate_values::<FrameIndex>(&a, &b, steps)?;
                for run in filled.runs() {
                    let from = start.advance(run.span.start.offset_from(FrameIndex::zero()));
                    let to = start.advance(run.span.end.offset_from(FrameIndex::zero()));
                    attr.set_span(from, to, run.value)?;
                }
            }
            (Some(a), None) => attr.set_span(start, end, a)?,
            (None, Some(b)) => attr.set_span(start, end, b)?,
            (None, None) => {}
        }
    }
    desc.mark_valid(start, end.next())?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/propagate.rs"]
mod tests;
