use super::errors::{ParseError, ParseResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// One of the coffee-shop chains the directory knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Brand {
    #[serde(rename = "Starbucks")]
    Starbucks,
    #[serde(rename = "Dutch Bros")]
    DutchBros,
    #[serde(rename = "Dunkin'")]
    Dunkin,
}

impl Brand {
    pub const ALL: [Brand; 3] = [Brand::Starbucks, Brand::DutchBros, Brand::Dunkin];

    pub fn display_name(self) -> &'static str {
        match self {
            Brand::Starbucks => "Starbucks",
            Brand::DutchBros => "Dutch Bros",
            Brand::Dunkin => "Dunkin'",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl FromStr for Position {
    type Err = ParseError;

    /// Parses `"LAT,LON"`, e.g. `"34.0522,-118.2437"`.
    fn from_str(s: &str) -> ParseResult<Self> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| ParseError::InvalidPosition(s.to_string()))?;
        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidPosition(s.to_string()))?;
        let longitude = lon
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidPosition(s.to_string()))?;

        let position = Position::new(latitude, longitude);
        if !position.is_valid() {
            return Err(ParseError::OutOfRange { latitude, longitude });
        }
        Ok(position)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

/// An immutable coffee shop record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: Uuid,
    pub name: String,
    pub brand: Brand,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
}

impl Shop {
    pub fn new(
        name: impl Into<String>,
        brand: Brand,
        latitude: f64,
        longitude: f64,
        address: Option<&str>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            brand,
            latitude,
            longitude,
            address: address.map(str::to_string),
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }

    pub fn has_valid_coordinates(&self) -> bool {
        self.position().is_valid()
    }

    /// The seed list loaded at startup.
    pub fn sample_shops() -> Vec<Shop> {
        vec![
            Shop::new(
                "Starbucks - Main St",
                Brand::Starbucks,
                34.052235,
                -118.243683,
                Some("123 Main St, Los Angeles, CA"),
            ),
            Shop::new(
                "Dutch Bros - Downtown",
                Brand::DutchBros,
                34.053235,
                -118.244683,
                Some("456 Central Ave, Los Angeles, CA"),
            ),
            Shop::new(
                "Dunkin' - City Center",
                Brand::Dunkin,
                34.054235,
                -118.245683,
                Some("789 Broadway, Los Angeles, CA"),
            ),
            Shop::new(
                "Starbucks - Riverwalk",
                Brand::Starbucks,
                33.448376,
                -112.074036,
                Some("101 River Rd, Phoenix, AZ"),
            ),
            Shop::new(
                "Dutch Bros - Northside",
                Brand::DutchBros,
                33.684566,
                -117.826508,
                Some("202 North St, Irvine, CA"),
            ),
        ]
    }
}

/// A choice in the distance picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceOption {
    pub label: &'static str,
    pub meters: f64,
}

impl DistanceOption {
    /// Picker choices, nearest first.
    pub const ALL: [DistanceOption; 5] = [
        DistanceOption { label: "1 mile", meters: 1609.34 },
        DistanceOption { label: "3 miles", meters: 4828.03 },
        DistanceOption { label: "5 miles", meters: 8046.72 },
        DistanceOption { label: "10 miles", meters: 16093.4 },
        DistanceOption { label: "20 miles", meters: 32186.9 },
    ];

    pub const DEFAULT_INDEX: usize = 3;

    pub fn default_option() -> Self {
        Self::ALL[Self::DEFAULT_INDEX]
    }
}
