//! Framespan is the temporal data core of a video-annotation editor.
//!
//! Annotation tools attach typed attribute values to drawn shapes, frame by
//! frame, over sequences that run to hundreds of thousands of frames. Storing
//! one entry per frame does not survive that scale; storing runs does. This
//! crate provides the three structures everything else is built on:
//!
//! 1. **Validity**: [`IntervalSet`] holds the set of frames a descriptor
//!    exists on as disjoint, merged, half-open intervals.
//! 2. **Values**: [`Timeline`] holds per-frame attribute data run-length
//!    encoded, maximally compressed (no two adjacent runs share a value).
//! 3. **Gaps**: [`interpolate`] fills the frames between two keyframed
//!    values, producing a compressed timeline directly.
//!
//! On top sit the annotation records ([`Descriptor`], [`AnnotationSet`]),
//! the editing flows that consume the core ([`propagate`],
//! [`interpolate_descriptor`]), and a scoped [`EditSession`] that rolls an
//! edit back unless it is committed.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Invariants restored per call**: every mutation leaves interval sets
//!   normalized and timelines compressed; no deferred fix-up passes.
//! - **Synchronous and single-writer**: no locking inside; concurrent
//!   readers are safe whenever no mutation is in flight.
//! - **Two interchangeable axes**: everything is generic over [`Instant`],
//!   with [`FrameIndex`] and [`MediaTime`] as the concrete axes.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod annotation;
mod foundation;
mod interp;
mod range;
mod timeline;

pub use annotation::model::{AnnotationSet, Attribute, Descriptor};
pub use annotation::propagate::{interpolate_descriptor, propagate};
pub use annotation::schema::{AttrConfig, DescConfig};
pub use annotation::session::EditSession;
pub use foundation::core::{FrameIndex, Instant, Interval, MediaTime};
pub use foundation::error::{FramespanError, FramespanResult};
pub use interp::engine::{StepValue, interpolate, interpolate_values};
pub use range::set::IntervalSet;
pub use timeline::track::{Run, Timeline};
pub use timeline::value::{AttrValue, ValueKind};
