use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{ConfirmationObserver, DeliveryError, NotificationSettings, ObserverError};
use crate::workflows::tours::domain::{Tour, TravelerId, TravelerRoster};
use crate::workflows::tours::places::PlaceCode;

/// Payload submitted to the tax regulator for high-value tours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulatorReport {
    pub place_codes: Vec<PlaceCode>,
    pub traveler_ids: Vec<TravelerId>,
}

pub trait RegulatorGateway: Send + Sync {
    fn submit(&self, report: RegulatorReport) -> Result<(), DeliveryError>;
}

/// Reports tours whose per-traveler price reaches the configured threshold.
pub struct RegulatorNotifier {
    gateway: Arc<dyn RegulatorGateway>,
    threshold: u64,
}

impl RegulatorNotifier {
    pub fn new(gateway: Arc<dyn RegulatorGateway>, settings: &NotificationSettings) -> Self {
        Self {
            gateway,
            threshold: settings.regulator_threshold,
        }
    }

    pub fn applies_to(&self, tour: &Tour) -> bool {
        tour.price_per_traveler() >= self.threshold
    }
}

impl ConfirmationObserver for RegulatorNotifier {
    fn name(&self) -> &'static str {
        "regulator_notifier"
    }

    fn on_confirmed(&self, tour: &Tour, _roster: &mut TravelerRoster) -> Result<(), ObserverError> {
        if !self.applies_to(tour) {
            return Ok(());
        }

        let report = RegulatorReport {
            place_codes: tour.places().iter().map(|place| place.code.clone()).collect(),
            traveler_ids: tour.travelers().to_vec(),
        };
        self.gateway.submit(report).map_err(ObserverError::Regulator)
    }
}
