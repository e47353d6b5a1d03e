//! Routing attributes of a land-plot listing.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::identifier::{IntId, ListingKey};

/// The minimal listing projection needed to compute a canonical path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingAttributes {
    /// Primary key.
    pub id: Uuid,

    /// Short public number; legacy rows may not have one.
    #[serde(default, deserialize_with = "positive_int_id")]
    pub int_id: Option<IntId>,

    /// Administrative region name.
    #[serde(default)]
    pub district: Option<String>,

    /// Settlement name.
    #[serde(default)]
    pub location: Option<String>,
}

impl RoutingAttributes {
    /// Whether this row is the one a key refers to.
    pub fn matches(&self, key: &ListingKey) -> bool {
        match key {
            ListingKey::Uuid(id) => self.id == *id,
            ListingKey::IntId(int_id) => self.int_id == Some(*int_id),
        }
    }
}

/// Store rows carry a signed, nullable column; zero and negatives mean "unassigned".
fn positive_int_id<'de, D>(deserializer: D) -> Result<Option<IntId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.and_then(IntId::from_signed))
}
