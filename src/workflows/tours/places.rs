use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const CITY_MIN_ATTRACTIONS: usize = 3;
const CITY_MIN_POPULATION: u32 = 100_000;
const CITY_MAX_CALM_DECIBELS: u32 = 20;
const TOWN_FOUNDING_YEAR_CUTOFF: i32 = 1800;
const LITTORAL_PROVINCES: [&str; 3] = ["Entre Rios", "Corrientes", "Misiones"];
const CALM_PROVINCE: &str = "La Pampa";
const BEACH_MIN_METRES: u32 = 300;

/// Stable code identifying a destination across tours and regulator reports.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlaceCode(pub String);

/// A destination a tour can require.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub code: PlaceCode,
    pub name: String,
    #[serde(flatten)]
    pub kind: PlaceKind,
}

/// Attribute sets for the supported destination kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaceKind {
    City {
        population: u32,
        decibels: u32,
        #[serde(default)]
        attractions: Vec<String>,
    },
    Town {
        area_km2: u32,
        founded_on: NaiveDate,
        province: String,
    },
    Beach {
        beach_metres: u32,
        dangerous_sea: bool,
        pedestrian_promenade: bool,
    },
}

impl Place {
    pub fn new(code: impl Into<String>, name: impl Into<String>, kind: PlaceKind) -> Self {
        Self {
            code: PlaceCode(code.into()),
            name: name.into(),
            kind,
        }
    }

    /// A place is lively when its name has an even number of letters and its
    /// kind-specific condition holds.
    pub fn is_lively(&self) -> bool {
        let letters = self.name.chars().filter(|c| c.is_alphabetic()).count();
        letters % 2 == 0 && self.kind.is_lively()
    }

    pub fn is_calm(&self) -> bool {
        self.kind.is_calm()
    }
}

impl PlaceKind {
    fn is_lively(&self) -> bool {
        match self {
            PlaceKind::City {
                population,
                attractions,
                ..
            } => attractions.len() > CITY_MIN_ATTRACTIONS && *population > CITY_MIN_POPULATION,
            PlaceKind::Town {
                founded_on,
                province,
                ..
            } => {
                founded_on.year() < TOWN_FOUNDING_YEAR_CUTOFF
                    || LITTORAL_PROVINCES.contains(&province.as_str())
            }
            PlaceKind::Beach {
                beach_metres,
                dangerous_sea,
                ..
            } => *beach_metres > BEACH_MIN_METRES && *dangerous_sea,
        }
    }

    fn is_calm(&self) -> bool {
        match self {
            PlaceKind::City { decibels, .. } => *decibels < CITY_MAX_CALM_DECIBELS,
            PlaceKind::Town { province, .. } => province == CALM_PROVINCE,
            PlaceKind::Beach {
                pedestrian_promenade,
                ..
            } => !pedestrian_promenade,
        }
    }
}
