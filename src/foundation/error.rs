/// Convenience result type used across framespan.
pub type FramespanResult<T> = Result<T, FramespanError>;

/// Top-level error taxonomy used by the temporal data APIs.
#[derive(thiserror::Error, Debug)]
pub enum FramespanError {
    /// A half-open span whose start lies after its end.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// An interpolation domain without room for a single step.
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// A value whose concrete kind does not match what the operation expects.
    #[error("incompatible value: {0}")]
    IncompatibleValue(String),

    /// An attribute type outside the closed set of kinds with defined equality.
    #[error("unsupported value type: {0}")]
    UnsupportedValueType(String),

    /// A descriptor id that does not name a descriptor in the set.
    #[error("unknown descriptor: {0}")]
    UnknownDescriptor(u64),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramespanError {
    /// Build a [`FramespanError::InvalidRange`] value.
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    /// Build a [`FramespanError::InvalidDomain`] value.
    pub fn invalid_domain(msg: impl Into<String>) -> Self {
        Self::InvalidDomain(msg.into())
    }

    /// Build a [`FramespanError::IncompatibleValue`] value.
    pub fn incompatible_value(msg: impl Into<String>) -> Self {
        Self::IncompatibleValue(msg.into())
    }

    /// Build a [`FramespanError::UnsupportedValueType`] value.
    pub fn unsupported_value_type(msg: impl Into<String>) -> Self {
        Self::UnsupportedValueType(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
