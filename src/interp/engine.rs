use crate::foundation::core::Instant;
use crate::foundation::error::{FramespanError, FramespanResult};
use crate::timeline::track::Timeline;
use crate::timeline::value::AttrValue;

/// Per-type step function for filling the gap between two keyframed values.
///
/// `step_value(a, b, index, steps)` is the value at `index` of `steps` equal
/// steps from `a` toward `b`. The contract: index `0` yields exactly `a`,
/// outputs move monotonically toward `b` as the index grows, and the end
/// boundary itself (index `steps`) is never produced; it belongs to whatever
/// run follows the gap.
///
/// The rounding rule is pinned: numeric and geometric kinds interpolate
/// linearly at fraction `index / steps` and round half-away-from-zero onto
/// the integer grid. Discrete kinds (booleans, labels) hold `a` across the
/// whole gap.
pub trait StepValue: Sized {
    /// The value at `index` of `steps` steps from `a` toward `b`.
    fn step_value(a: &Self, b: &Self, index: u64, steps: u64) -> Self;
}

fn lerp_round(a: f64, b: f64, index: u64, steps: u64) -> f64 {
    (a + (index as f64) * (b - a) / (steps as f64)).round()
}

impl StepValue for i64 {
    fn step_value(a: &Self, b: &Self, index: u64, steps: u64) -> Self {
        lerp_round(*a as f64, *b as f64, index, steps) as i64
    }
}

impl StepValue for bool {
    fn step_value(a: &Self, _b: &Self, _index: u64, _steps: u64) -> Self {
        *a
    }
}

impl StepValue for String {
    fn step_value(a: &Self, _b: &Self, _index: u64, _steps: u64) -> Self {
        a.clone()
    }
}

impl StepValue for kurbo::Point {
    fn step_value(a: &Self, b: &Self, index: u64, steps: u64) -> Self {
        kurbo::Point::new(
            lerp_round(a.x, b.x, index, steps),
            lerp_round(a.y, b.y, index, steps),
        )
    }
}

impl StepValue for kurbo::Rect {
    fn step_value(a: &Self, b: &Self, index: u64, steps: u64) -> Self {
        kurbo::Rect::new(
            lerp_round(a.x0, b.x0, index, steps),
            lerp_round(a.y0, b.y0, index, steps),
            lerp_round(a.x1, b.x1, index, steps),
            lerp_round(a.y1, b.y1, index, steps),
        )
    }
}

impl StepValue for AttrValue {
    fn step_value(a: &Self, b: &Self, index: u64, steps: u64) -> Self {
        match (a, b) {
            (Self::Integer(a), Self::Integer(b)) => {
                Self::Integer(i64::step_value(a, b, index, steps))
            }
            (Self::Boolean(a), Self::Boolean(b)) => {
                Self::Boolean(bool::step_value(a, b, index, steps))
            }
            (Self::Label(a), Self::Label(b)) => Self::Label(String::step_value(a, b, index, steps)),
            (Self::Point(a), Self::Point(b)) => {
                Self::Point(kurbo::Point::step_value(a, b, index, steps))
            }
            (Self::Bbox(a), Self::Bbox(b)) => {
                Self::Bbox(kurbo::Rect::step_value(a, b, index, steps))
            }
            // Kind mismatches are rejected before dispatch; holding the
            // start value keeps the function total.
            _ => a.clone(),
        }
    }
}

/// Fills the half-open gap between two boundary values with a compressed
/// timeline over `[zero, zero + steps)`.
///
/// Index `0` carries `start`; the value owning the end boundary (index
/// `steps`) is not part of the result. Consecutive equal step values
/// coalesce into one run while the result is built, so the returned
/// timeline already satisfies the compression invariant.
#[tracing::instrument(skip(start, end))]
pub fn interpolate<I, V>(start: &V, end: &V, steps: u64) -> FramespanResult<Timeline<I, V>>
where
    I: Instant,
    V: StepValue + Clone + PartialEq,
{
    if steps == 0 {
        return Err(FramespanError::invalid_domain(
            "interpolation needs at least one step",
        ));
    }

    let mut out = Timeline::new();
    let mut run_start = I::zero();
    let mut cursor = I::zero();
    let mut current = V::step_value(start, end, 0, steps);
    for index in 1..steps {
        let value = V::step_value(start, end, index, steps);
        let at = cursor.next();
        if value != current {
            out.set(run_start, at, std::mem::replace(&mut current, value))?;
            run_start = at;
        }
        cursor = at;
    }
    out.set(run_start, cursor.next(), current)?;
    Ok(out)
}

/// [`interpolate`] over dynamically-typed boundaries.
///
/// The two values must be of the same kind; mixed kinds have no defined
/// intermediate and are rejected.
pub fn interpolate_values<I: Instant>(
    start: &AttrValue,
    end: &AttrValue,
    steps: u64,
) -> FramespanResult<Timeline<I, AttrValue>> {
    if start.kind() != end.kind() {
        return Err(FramespanError::incompatible_value(format!(
            "cannot interpolate {} toward {}",
            start.kind().name(),
            end.kind().name()
        )));
    }
    interpolate(start, end, steps)
}

#[cfg(test)]
#[path = "../../tests/unit/interp/engine.rs"]
mod tests;
