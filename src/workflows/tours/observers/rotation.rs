use super::{ConfirmationObserver, ObserverError};
use crate::workflows::tours::domain::{Tour, TravelerRoster};

/// Gives every enrolled traveler with a rotating preference one extra turn,
/// on top of any rotation that happened while matching.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreferenceRotator;

impl ConfirmationObserver for PreferenceRotator {
    fn name(&self) -> &'static str {
        "preference_rotator"
    }

    fn on_confirmed(&self, tour: &Tour, roster: &mut TravelerRoster) -> Result<(), ObserverError> {
        for id in tour.travelers() {
            if let Some(rotating) = roster
                .get_mut(id)
                .and_then(|traveler| traveler.rotating_preference_mut())
            {
                rotating.rotate();
            }
        }
        Ok(())
    }
}
