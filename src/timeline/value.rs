use crate::foundation::error::{FramespanError, FramespanResult};

/// The closed set of attribute value kinds a timeline can store.
///
/// Every kind has defined value equality, which the timeline compression
/// invariant depends on. Schema-layer type names resolve through
/// [`ValueKind::from_name`]; anything outside this set is rejected rather
/// than stored with identity comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ValueKind {
    /// Signed integer measurement.
    Integer,
    /// Boolean flag.
    Boolean,
    /// Enumerated string label.
    Label,
    /// 2D point on the frame.
    Point,
    /// Axis-aligned bounding box on the frame.
    Bbox,
}

impl ValueKind {
    /// Resolve a schema-layer attribute type name.
    pub fn from_name(name: &str) -> FramespanResult<Self> {
        match name {
            "dvalue" => Ok(Self::Integer),
            "bvalue" => Ok(Self::Boolean),
            "lvalue" => Ok(Self::Label),
            "point" => Ok(Self::Point),
            "bbox" => Ok(Self::Bbox),
            other => Err(FramespanError::unsupported_value_type(format!(
                "no equality-bearing value kind named {other:?}"
            ))),
        }
    }

    /// The schema-layer name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Integer => "dvalue",
            Self::Boolean => "bvalue",
            Self::Label => "lvalue",
            Self::Point => "point",
            Self::Bbox => "bbox",
        }
    }
}

/// A single dynamically-typed attribute value.
///
/// The editor stores whichever kind the attribute's schema declares; the
/// variant is fixed per attribute at construction and checked on every
/// write, never re-inspected per comparison.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AttrValue {
    /// Signed integer measurement.
    Integer(i64),
    /// Boolean flag.
    Boolean(bool),
    /// Enumerated string label.
    Label(String),
    /// 2D point on the frame.
    Point(kurbo::Point),
    /// Axis-aligned bounding box on the frame.
    Bbox(kurbo::Rect),
}

impl AttrValue {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Label(_) => ValueKind::Label,
            Self::Point(_) => ValueKind::Point,
            Self::Bbox(_) => ValueKind::Bbox,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/value.rs"]
mod tests;
