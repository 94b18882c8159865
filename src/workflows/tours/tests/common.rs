use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::workflows::tours::domain::{Tour, TravelerRoster};
use crate::workflows::tours::observers::{
    ConfirmationObserver, DeliveryError, Mail, MailSender, ObserverError, RegulatorGateway,
    RegulatorReport,
};
use crate::workflows::tours::places::{Place, PlaceKind};

pub(super) fn departure() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 12, 15).expect("valid departure")
}

/// Lively but not calm.
pub(super) fn lively_place(code: &str) -> Arc<Place> {
    Arc::new(Place::new(
        code,
        "Parana",
        PlaceKind::City {
            population: 250_000,
            decibels: 60,
            attractions: vec![
                "Costanera".to_string(),
                "Parque Urquiza".to_string(),
                "Puerto Viejo".to_string(),
                "Museo".to_string(),
            ],
        },
    ))
}

/// Calm but not lively: odd letter count.
pub(super) fn calm_place(code: &str) -> Arc<Place> {
    Arc::new(Place::new(
        code,
        "Mar Azul",
        PlaceKind::Beach {
            beach_metres: 500,
            dangerous_sea: true,
            pedestrian_promenade: false,
        },
    ))
}

/// Neither calm nor lively.
pub(super) fn dull_place(code: &str) -> Arc<Place> {
    Arc::new(Place::new(
        code,
        "Cordoba",
        PlaceKind::City {
            population: 1_300_000,
            decibels: 70,
            attractions: Vec::new(),
        },
    ))
}

pub(super) fn tour(id: &str, price: u64, capacity: usize, places: Vec<Arc<Place>>) -> Tour {
    places
        .into_iter()
        .fold(Tour::new(id, departure(), price, capacity), |tour, place| {
            tour.with_place(place)
        })
}

#[derive(Default, Clone)]
pub(super) struct RecordingMailSender {
    mails: Arc<Mutex<Vec<Mail>>>,
}

impl RecordingMailSender {
    pub(super) fn mails(&self) -> Vec<Mail> {
        self.mails.lock().expect("mail mutex poisoned").clone()
    }
}

impl MailSender for RecordingMailSender {
    fn send_mail(&self, mail: Mail) -> Result<(), DeliveryError> {
        self.mails.lock().expect("mail mutex poisoned").push(mail);
        Ok(())
    }
}

pub(super) struct OfflineMailSender;

impl MailSender for OfflineMailSender {
    fn send_mail(&self, _mail: Mail) -> Result<(), DeliveryError> {
        Err(DeliveryError::Transport("smtp relay offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct RecordingRegulator {
    reports: Arc<Mutex<Vec<RegulatorReport>>>,
}

impl RecordingRegulator {
    pub(super) fn reports(&self) -> Vec<RegulatorReport> {
        self.reports.lock().expect("regulator mutex poisoned").clone()
    }
}

impl RegulatorGateway for RecordingRegulator {
    fn submit(&self, report: RegulatorReport) -> Result<(), DeliveryError> {
        self.reports
            .lock()
            .expect("regulator mutex poisoned")
            .push(report);
        Ok(())
    }
}

/// Appends `"<name>:<tour>"` to a shared log on every confirmation.
pub(super) struct LoggingObserver {
    pub(super) name: &'static str,
    pub(super) log: Arc<Mutex<Vec<String>>>,
}

impl LoggingObserver {
    pub(super) fn new(name: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name,
            log: Arc::clone(log),
        }
    }
}

impl ConfirmationObserver for LoggingObserver {
    fn name(&self) -> &'static str {
        self.name
    }

    fn on_confirmed(&self, tour: &Tour, _roster: &mut TravelerRoster) -> Result<(), ObserverError> {
        self.log
            .lock()
            .expect("log mutex poisoned")
            .push(format!("{}:{}", self.name, tour.id()));
        Ok(())
    }
}

pub(super) fn entries(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    log.lock().expect("log mutex poisoned").clone()
}
