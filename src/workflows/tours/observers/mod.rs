//! Reactions fired when a tour becomes confirmed.
//!
//! Observers run synchronously in registration order. The first failure stops
//! the chain and is handed back to the caller; whatever earlier observers did
//! (mail already sent, preferences already rotated) stays done.

mod mail;
mod outbox;
mod regulator;
mod rotation;

pub use mail::{Mail, MailNotifier, MailSender};
pub use outbox::{TracingMailSender, TracingRegulatorGateway};
pub use regulator::{RegulatorGateway, RegulatorNotifier, RegulatorReport};
pub use rotation::PreferenceRotator;

use tracing::{debug, warn};

use super::domain::{Tour, TourId, TravelerRoster};

pub const DEFAULT_SENDER_ADDRESS: &str = "admin@admin.com";
pub const DEFAULT_PAYMENT_LEAD_DAYS: u32 = 30;
/// Upper bound accepted from configuration, roughly ten years.
pub const MAX_PAYMENT_LEAD_DAYS: u32 = 3_650;
pub const DEFAULT_REGULATOR_THRESHOLD: u64 = 10_000_000;

/// Knobs shared by the notification observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    pub sender_address: String,
    pub payment_lead_days: u32,
    /// Per-traveler price at or above which the regulator is notified.
    pub regulator_threshold: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            sender_address: DEFAULT_SENDER_ADDRESS.to_string(),
            payment_lead_days: DEFAULT_PAYMENT_LEAD_DAYS,
            regulator_threshold: DEFAULT_REGULATOR_THRESHOLD,
        }
    }
}

/// A reaction to a tour confirmation.
///
/// Observers receive the roster mutably so they can act on the enrolled
/// travelers themselves, not on copies.
pub trait ConfirmationObserver: Send {
    fn name(&self) -> &'static str;

    fn on_confirmed(&self, tour: &Tour, roster: &mut TravelerRoster) -> Result<(), ObserverError>;
}

/// Ordered list of observers.
#[derive(Default)]
pub struct ObserverChain {
    observers: Vec<Box<dyn ConfirmationObserver>>,
}

impl ObserverChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: impl ConfirmationObserver + 'static) -> Self {
        self.register(observer);
        self
    }

    pub fn register(&mut self, observer: impl ConfirmationObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.observers.iter().map(|observer| observer.name()).collect()
    }

    /// Fires every observer in order, failing fast.
    pub fn notify(&self, tour: &Tour, roster: &mut TravelerRoster) -> Result<(), ObserverError> {
        for observer in &self.observers {
            debug!(observer = observer.name(), tour = %tour.id(), "running confirmation observer");
            if let Err(err) = observer.on_confirmed(tour, roster) {
                warn!(
                    observer = observer.name(),
                    tour = %tour.id(),
                    error = %err,
                    "confirmation observer failed; skipping the rest of the chain"
                );
                return Err(err);
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for ObserverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Failure reported by an outbound notification sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// Error raised by a confirmation observer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObserverError {
    #[error("mail notifier used before a mail sender was wired")]
    MailSenderMissing,
    #[error("payment deadline {lead_days} days before tour {tour} is out of range")]
    PaymentDeadlineOutOfRange { tour: TourId, lead_days: u32 },
    #[error("confirmation mail could not be delivered")]
    Mail(#[source] DeliveryError),
    #[error("regulator notification could not be delivered")]
    Regulator(#[source] DeliveryError),
}
