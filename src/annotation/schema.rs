use crate::foundation::error::FramespanResult;
use crate::timeline::value::ValueKind;

/// Typed attribute definition within a descriptor type.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AttrConfig {
    /// Attribute name, unique within its descriptor type.
    pub name: String,
    /// Kind of value the attribute stores.
    pub kind: ValueKind,
    /// Whether the attribute varies per frame or holds one static value.
    pub dynamic: bool,
}

impl AttrConfig {
    /// Builds a config from a raw schema type name.
    ///
    /// Unknown type names are rejected here, before any descriptor exists,
    /// so a timeline never holds a value without defined equality.
    pub fn from_type_name(
        name: impl Into<String>,
        type_name: &str,
        dynamic: bool,
    ) -> FramespanResult<Self> {
        Ok(Self {
            name: name.into(),
            kind: ValueKind::from_name(type_name)?,
            dynamic,
        })
    }
}

/// Descriptor type definition: a named set of attribute configs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DescConfig {
    /// Descriptor type name.
    pub name: String,
    /// Attribute definitions, in schema order.
    pub attrs: Vec<AttrConfig>,
}

impl DescConfig {
    /// Builds a descriptor type from its attribute configs.
    pub fn new(name: impl Into<String>, attrs: Vec<AttrConfig>) -> Self {
        Self {
            name: name.into(),
            attrs,
        }
    }

    /// Looks up an attribute config by name.
    pub fn attr(&self, name: &str) -> Option<&AttrConfig> {
        self.attrs.iter().find(|a| a.name == name)
    }
}
