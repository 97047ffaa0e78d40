use std::collections::BTreeMap;

use crate::annotation::schema::{AttrConfig, DescConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FramespanError, FramespanResult};
use crate::range::set::IntervalSet;
use crate::timeline::track::Timeline;
use crate::timeline::value::AttrValue;

/// A single typed attribute instance owned by a descriptor.
///
/// Static attributes hold one value for the descriptor's whole life;
/// dynamic ones hold a per-frame timeline. Every write is checked against
/// the configured kind, so a timeline only ever mixes values of one kind.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Attribute {
    config: AttrConfig,
    static_value: Option<AttrValue>,
    timeline: Timeline<FrameIndex, AttrValue>,
}

impl Attribute {
    /// Builds an unset attribute for the given config.
    pub fn new(config: AttrConfig) -> Self {
        Self {
            config,
            static_value: None,
            timeline: Timeline::new(),
        }
    }

    /// The attribute's config.
    pub fn config(&self) -> &AttrConfig {
        &self.config
    }

    /// The per-frame timeline; empty for static attributes.
    pub fn timeline(&self) -> &Timeline<FrameIndex, AttrValue> {
        &self.timeline
    }

    fn check_kind(&self, value: &AttrValue) -> FramespanResult<()> {
        if value.kind() != self.config.kind {
            return Err(FramespanError::incompatible_value(format!(
                "attribute {:?} stores {}, got {}",
                self.config.name,
                self.config.kind.name(),
                value.kind().name()
            )));
        }
        Ok(())
    }

    /// Sets the static value. Fails on dynamic attributes or a kind
    /// mismatch; `None` unsets.
    pub fn set_static(&mut self, value: Option<AttrValue>) -> FramespanResult<()> {
        if self.config.dynamic {
            return Err(FramespanError::incompatible_value(format!(
                "attribute {:?} is dynamic, set it over a span",
                self.config.name
            )));
        }
        if let Some(v) = &value {
            self.check_kind(v)?;
        }
        self.static_value = value;
        Ok(())
    }

    /// Writes `value` over the frames `[start, end)`. Fails on static
    /// attributes or a kind mismatch.
    pub fn set_span(
        &mut self,
        start: FrameIndex,
        end: FrameIndex,
        value: AttrValue,
    ) -> FramespanResult<()> {
        if !self.config.dynamic {
            return Err(FramespanError::incompatible_value(format!(
                "attribute {:?} is static, set a single value",
                self.config.name
            )));
        }
        self.check_kind(&value)?;
        self.timeline.set(start, end, value)
    }

    /// Unsets the frames `[start, end)` of a dynamic attribute.
    pub fn clear_span(&mut self, start: FrameIndex, end: FrameIndex) -> FramespanResult<bool> {
        self.timeline.clear(start, end)
    }

    /// The value at `at`: the covering run for dynamic attributes, the
    /// static value otherwise.
    pub fn value_at(&self, at: FrameIndex) -> Option<&AttrValue> {
        if self.config.dynamic {
            self.timeline.get(at)
        } else {
            self.static_value.as_ref()
        }
    }
}

/// One annotated entity over a stretch of video.
///
/// A descriptor pairs a validity set (the frames it exists on) with its
/// typed attributes. Attribute values are only reported inside the validity
/// set; the stored timelines may extend past it while an edit is in flight.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Descriptor {
    id: u64,
    config_name: String,
    valid: IntervalSet<FrameIndex>,
    attrs: BTreeMap<String, Attribute>,
}

impl Descriptor {
    fn from_config(id: u64, config: &DescConfig) -> Self {
        Self {
            id,
            config_name: config.name.clone(),
            valid: IntervalSet::new(),
            attrs: config
                .attrs
                .iter()
                .map(|a| (a.name.clone(), Attribute::new(a.clone())))
                .collect(),
        }
    }

    /// The descriptor's id within its owning set.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Name of the descriptor type this was created from.
    pub fn config_name(&self) -> &str {
        &self.config_name
    }

    /// The frames this descriptor is valid for.
    pub fn valid(&self) -> &IntervalSet<FrameIndex> {
        &self.valid
    }

    /// Marks `[start, end)` valid.
    pub fn mark_valid(&mut self, start: FrameIndex, end: FrameIndex) -> FramespanResult<bool> {
        self.valid.add(start, end)
    }

    /// True iff the descriptor exists on frame `at`.
    pub fn is_valid_at(&self, at: FrameIndex) -> bool {
        self.valid.contains(at)
    }

    /// Looks up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attrs.get(name)
    }

    /// Looks up an attribute by name for mutation.
    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attrs.get_mut(name)
    }

    /// The attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.values()
    }

    /// The attributes in name order, for mutation.
    pub fn attributes_mut(&mut self) -> impl Iterator<Item = &mut Attribute> {
        self.attrs.values_mut()
    }

    /// The value of attribute `name` at frame `at`, gated on validity.
    pub fn value_at(&self, name: &str, at: FrameIndex) -> Option<&AttrValue> {
        if !self.is_valid_at(at) {
            return None;
        }
        self.attrs.get(name)?.value_at(at)
    }
}

/// Owning collection of descriptors for one annotated media file.
///
/// Descriptors are addressed by the id handed out at creation; removal is
/// by id on the owning set, so records never point back at their owner.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnnotationSet {
    next_id: u64,
    descriptors: BTreeMap<u64, Descriptor>,
}

impl AnnotationSet {
    /// Creates a new, empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a descriptor of the given type and returns its id.
    pub fn create_descriptor(&mut self, config: &DescConfig) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.descriptors.insert(id, Descriptor::from_config(id, config));
        id
    }

    /// Removes a descriptor by id; returns whether one was removed.
    pub fn remove_descriptor(&mut self, id: u64) -> bool {
        self.descriptors.remove(&id).is_some()
    }

    /// Looks up a descriptor by id.
    pub fn descriptor(&self, id: u64) -> Option<&Descriptor> {
        self.descriptors.get(&id)
    }

    /// Looks up a descriptor by id for mutation.
    pub fn descriptor_mut(&mut self, id: u64) -> Option<&mut Descriptor> {
        self.descriptors.get_mut(&id)
    }

    /// The descriptors in id order.
    pub fn descriptors(&self) -> impl Iterator<Item = &Descriptor> {
        self.descriptors.values()
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// True iff the set holds no descriptor.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/model.rs"]
mod tests;
