use serde::Deserialize;

pub const SOURCE_ENDPOINT: &str = "https://raw.githubusercontent.com/Hipo/university-domains-list/master/world_universities_and_domains.json";

pub const GEOCODE_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

pub const USER_AGENT: &str = "UniStartupBoard/1.0 (https://unistartupboard.vercel.app)";

/// One entry of the world universities dataset.
#[derive(Deserialize, Debug, Clone)]
pub struct University {
    pub name: String,

    #[serde(default)]
    pub domains: Vec<String>,

    #[serde(default)]
    pub alpha_two_code: String,

    #[serde(rename = "state-province", default)]
    pub state_province: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub name: String,
    pub domain: String,
    pub locality: String,
}

/// A ranked geocoder hit. Nominatim sends coordinates as strings, others as numbers.
#[derive(Deserialize, Debug)]
pub struct Candidate {
    pub lat: Coordinate,
    pub lon: Coordinate,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            Coordinate::Number(value) => Some(*value),
            Coordinate::Text(text) => text.trim().parse::<f64>().ok(),
        };

        value.filter(|value| value.is_finite())
    }
}
