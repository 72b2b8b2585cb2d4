use serde::{Deserialize, Serialize};

use crate::CoordinatePair;

/// One stop in the user's route.
///
/// Identity for uniqueness is `address`, compared case-sensitively.
///
/// # Examples
/// ```
/// use waypoint_core::{CoordinatePair, Waypoint};
///
/// let stop = Waypoint::new(CoordinatePair::new(20.5, 54.7), "Street 1");
/// assert_eq!(stop.address, "Street 1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Resolved position.
    pub pos: CoordinatePair,
    /// Resolved address, unique within a route.
    pub address: String,
}

impl Waypoint {
    /// Construct a waypoint.
    pub fn new(pos: CoordinatePair, address: impl Into<String>) -> Self {
        Self {
            pos,
            address: address.into(),
        }
    }
}

/// A confirmed address candidate not yet committed to the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAddress {
    /// Candidate position.
    pub pos: CoordinatePair,
    /// Short place name as reported by the provider.
    pub name: String,
    /// Full formatted address.
    pub address: String,
}

impl PendingAddress {
    /// The waypoint this pending address commits as.
    #[must_use]
    pub fn to_waypoint(&self) -> Waypoint {
        Waypoint::new(self.pos, self.address.clone())
    }
}

/// The locality that scopes address queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultCity {
    /// Locality position, used to recenter the map.
    pub pos: CoordinatePair,
    /// Full address, prefixed to address queries.
    pub address: String,
}
