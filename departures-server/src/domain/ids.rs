//! Provider-assigned identifiers.
//!
//! PTV identifies everything with small integers. They are opaque to us:
//! the only validation is that they parse as integers, which serde does.
//! Wrapping them keeps a stop id from being passed where a route id belongs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Transit mode tag, as defined by the provider.
///
/// # Examples
///
/// ```
/// use departures_server::domain::RouteType;
///
/// assert_eq!(RouteType::TRAIN.to_string(), "0");
/// assert_eq!(RouteType::TRAM, RouteType(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteType(pub u32);

impl RouteType {
    pub const TRAIN: Self = Self(0);
    pub const TRAM: Self = Self(1);
    pub const BUS: Self = Self(2);
    pub const VLINE: Self = Self(3);
    pub const NIGHT_BUS: Self = Self(4);
}

/// Stop identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(pub u32);

/// Route identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub u32);

/// Direction of travel along a route (e.g. towards the city).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectionId(pub u32);

/// Identifier of a single vehicle run. The provider uses negative values
/// for some scheduled-only runs, hence signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub i64);

macro_rules! display_inner {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

display_inner!(RouteType, StopId, RouteId, DirectionId, RunId);
