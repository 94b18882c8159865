//! Tour allocation: matching waiting travelers to group tours, confirming
//! tours as they fill, and notifying the interested parties.

pub mod allocation;
pub mod domain;
pub mod observers;
pub mod places;
pub mod preference;
pub mod scenario;
pub mod views;

#[cfg(test)]
mod tests;

pub use allocation::{AllocationEngine, AllocationError, AllocationReport, Enrollment};
pub use domain::{EnrollmentOutcome, Tour, TourId, Traveler, TravelerId, TravelerRoster};
pub use observers::{
    ConfirmationObserver, DeliveryError, Mail, MailNotifier, MailSender, NotificationSettings,
    ObserverChain, ObserverError, MAX_PAYMENT_LEAD_DAYS, PreferenceRotator, RegulatorGateway, RegulatorNotifier,
    RegulatorReport, TracingMailSender, TracingRegulatorGateway,
};
pub use places::{Place, PlaceCode, PlaceKind};
pub use preference::{Preference, RotatingPreference};
pub use scenario::{Scenario, ScenarioError, TourSpec};
pub use views::{QueueView, TourStatusView};
