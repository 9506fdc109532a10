use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub type DomainIndex = BTreeMap<String, DomainRecord>;

/// `None` marks a lookup that came back empty. It is still a hit.
pub type GeocodeCache = BTreeMap<String, Option<Coordinates>>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Hand-curated index files are not uniform: coordinates show up as numbers or strings, some
/// entries lack a name, some carry extra fields. All of that has to load, and extra fields are
/// written back as they came.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DomainRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub lat: Option<f64>,

    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub lng: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Numbers, numeric strings and `null`. Anything else reads as unknown.
fn lenient_coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(value.filter(|v| v.is_finite()))
}

impl DomainRecord {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        }
    }

    /// Both coordinates are known, so the record must not be touched by a merge.
    pub fn is_curated(&self) -> bool {
        self.coordinates().is_some()
    }
}
