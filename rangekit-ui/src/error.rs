//! Errors raised at the setter boundary of a range model.

use std::fmt;

use thiserror::Error;

/// Names a settable property of a range model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeProperty {
    /// Lower bound.
    Minimum,
    /// Upper bound.
    Maximum,
    /// Lower endpoint of the selected interval.
    StartValue,
    /// Upper endpoint of the selected interval.
    EndValue,
    /// Smallest permitted interval width.
    MinRangeValue,
    /// Width of the selected interval.
    RangeValue,
    /// Small step size.
    SmallChange,
    /// Large step size.
    LargeChange,
}

impl fmt::Display for RangeProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Minimum => "Minimum",
            Self::Maximum => "Maximum",
            Self::StartValue => "StartValue",
            Self::EndValue => "EndValue",
            Self::MinRangeValue => "MinRangeValue",
            Self::RangeValue => "RangeValue",
            Self::SmallChange => "SmallChange",
            Self::LargeChange => "LargeChange",
        };
        f.write_str(name)
    }
}

/// A write that was rejected before it reached the model.
///
/// Whenever a setter returns one of these the property keeps its previous
/// value. Invariant violations are never reported here; they are repaired by
/// coercion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    /// The candidate does not map onto a finite double.
    #[error("{property} rejected non-finite value {value}")]
    NonFinite {
        /// Property being written.
        property: RangeProperty,
        /// Offending double projection.
        value: f64,
    },
    /// A width or step property was given a negative value.
    #[error("{property} must not be negative, got {value}")]
    Negative {
        /// Property being written.
        property: RangeProperty,
        /// Offending double projection.
        value: f64,
    },
    /// The coerced double has no counterpart in the concrete value type.
    #[error("{property} value {value} is not representable by the value type")]
    Unrepresentable {
        /// Property being written.
        property: RangeProperty,
        /// Coerced double that failed to convert back.
        value: f64,
    },
}

impl RangeError {
    /// Property the rejected write targeted.
    pub fn property(&self) -> RangeProperty {
        match self {
            Self::NonFinite { property, .. }
            | Self::Negative { property, .. }
            | Self::Unrepresentable { property, .. } => *property,
        }
    }
}
