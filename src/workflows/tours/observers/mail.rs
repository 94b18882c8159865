use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{ConfirmationObserver, DeliveryError, NotificationSettings, ObserverError};
use crate::workflows::tours::domain::{Tour, TravelerRoster};

const CONFIRMATION_SUBJECT: &str = "Your tour has been confirmed!";

/// Outbound mail message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Transport for outbound mail (SMTP relays, queues, test recorders).
pub trait MailSender: Send + Sync {
    fn send_mail(&self, mail: Mail) -> Result<(), DeliveryError>;
}

/// Mails every enrolled traveler the departure date, the payment deadline and
/// the itinerary.
pub struct MailNotifier {
    sender: Option<Arc<dyn MailSender>>,
    settings: NotificationSettings,
}

impl MailNotifier {
    /// Creates a notifier without a transport; it fails with
    /// [`ObserverError::MailSenderMissing`] until one is wired.
    pub fn new(settings: NotificationSettings) -> Self {
        Self {
            sender: None,
            settings,
        }
    }

    pub fn with_sender(mut self, sender: Arc<dyn MailSender>) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn wire(&mut self, sender: Arc<dyn MailSender>) {
        self.sender = Some(sender);
    }

    pub fn compose(&self, tour: &Tour, roster: &TravelerRoster) -> Result<Mail, ObserverError> {
        let lead_days = self.settings.payment_lead_days;
        let deadline = tour.payment_deadline(lead_days).ok_or_else(|| {
            ObserverError::PaymentDeadlineOutOfRange {
                tour: tour.id().clone(),
                lead_days,
            }
        })?;

        let to = tour
            .travelers()
            .iter()
            .filter_map(|id| roster.get(id))
            .map(|traveler| traveler.email.clone())
            .collect();

        let itinerary = tour
            .places()
            .iter()
            .map(|place| place.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let body = format!(
            "Departure date: {}\nPayment deadline: {}\nPlaces to visit: {}",
            tour.departure().format("%Y-%m-%d"),
            deadline.format("%Y-%m-%d"),
            itinerary
        );

        Ok(Mail {
            from: self.settings.sender_address.clone(),
            to,
            subject: CONFIRMATION_SUBJECT.to_string(),
            body,
        })
    }
}

impl ConfirmationObserver for MailNotifier {
    fn name(&self) -> &'static str {
        "mail_notifier"
    }

    fn on_confirmed(&self, tour: &Tour, roster: &mut TravelerRoster) -> Result<(), ObserverError> {
        let sender = self.sender.as_ref().ok_or(ObserverError::MailSenderMissing)?;
        let mail = self.compose(tour, roster)?;
        sender.send_mail(mail).map_err(ObserverError::Mail)
    }
}
