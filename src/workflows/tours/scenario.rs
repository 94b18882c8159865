use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;

use super::allocation::{AllocationEngine, AllocationError};
use super::domain::{Tour, TourId, Traveler};
use super::observers::ObserverChain;
use super::places::{Place, PlaceCode};

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to read scenario")]
    Io(#[from] std::io::Error),
    #[error("invalid scenario JSON")]
    Json(#[from] serde_json::Error),
    #[error("place code {code} is declared more than once")]
    DuplicatePlace { code: String },
    #[error("tour {tour} references unknown place {code}")]
    UnknownPlace { tour: TourId, code: String },
    #[error(transparent)]
    Registration(#[from] AllocationError),
}

/// Planning input: the destinations, the tours on offer and the travelers
/// queued for allocation, each in registration order.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub places: Vec<Place>,
    #[serde(default)]
    pub tours: Vec<TourSpec>,
    #[serde(default)]
    pub travelers: Vec<Traveler>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TourSpec {
    pub id: String,
    pub departure: NaiveDate,
    pub price_per_traveler: u64,
    pub capacity: usize,
    #[serde(default)]
    pub places: Vec<PlaceCode>,
}

impl Scenario {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Registers places, tours and travelers, in file order, on a new engine.
    pub fn into_engine(self, observers: ObserverChain) -> Result<AllocationEngine, ScenarioError> {
        let mut places: HashMap<PlaceCode, Arc<Place>> = HashMap::new();
        for place in self.places {
            let code = place.code.clone();
            if places.insert(code.clone(), Arc::new(place)).is_some() {
                return Err(ScenarioError::DuplicatePlace { code: code.0 });
            }
        }

        let mut engine = AllocationEngine::new(observers);

        for spec in self.tours {
            let mut tour = Tour::new(
                spec.id,
                spec.departure,
                spec.price_per_traveler,
                spec.capacity,
            );
            for code in spec.places {
                let place = places
                    .get(&code)
                    .ok_or_else(|| ScenarioError::UnknownPlace {
                        tour: tour.id().clone(),
                        code: code.0.clone(),
                    })?;
                tour.add_place(Arc::clone(place));
            }
            engine.register_tour(tour)?;
        }

        for traveler in self.travelers {
            engine.register_traveler(traveler)?;
        }

        Ok(engine)
    }
}
