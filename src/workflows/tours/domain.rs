use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::places::Place;
use super::preference::{Preference, RotatingPreference};

/// Identifier wrapper for travelers; carries the national identity number
/// reported to the regulator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TravelerId(pub String);

impl fmt::Display for TravelerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TourId(pub String);

impl fmt::Display for TourId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A prospective traveler waiting for a tour.
///
/// The preference is owned for the traveler's whole lifetime; it can rotate
/// internally but is never swapped for another policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traveler {
    pub id: TravelerId,
    pub email: String,
    pub budget: u64,
    preference: Preference,
}

impl Traveler {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        budget: u64,
        preference: Preference,
    ) -> Self {
        Self {
            id: TravelerId(id.into()),
            email: email.into(),
            budget,
            preference,
        }
    }

    pub fn likes(&mut self, place: &Place) -> bool {
        self.preference.likes(place)
    }

    pub fn preference(&self) -> &Preference {
        &self.preference
    }

    pub fn rotating_preference_mut(&mut self) -> Option<&mut RotatingPreference> {
        self.preference.as_rotating_mut()
    }
}

/// Registered travelers keyed by identifier.
#[derive(Debug, Default)]
pub struct TravelerRoster {
    travelers: BTreeMap<TravelerId, Traveler>,
}

impl TravelerRoster {
    /// Hands the traveler back when the identifier is already taken.
    pub fn insert(&mut self, traveler: Traveler) -> Result<(), Traveler> {
        if self.travelers.contains_key(&traveler.id) {
            return Err(traveler);
        }
        self.travelers.insert(traveler.id.clone(), traveler);
        Ok(())
    }

    pub fn get(&self, id: &TravelerId) -> Option<&Traveler> {
        self.travelers.get(id)
    }

    pub fn get_mut(&mut self, id: &TravelerId) -> Option<&mut Traveler> {
        self.travelers.get_mut(id)
    }

    pub fn contains(&self, id: &TravelerId) -> bool {
        self.travelers.contains_key(id)
    }

}

/// Result of offering a traveler through the capacity-checked entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentOutcome {
    Enrolled,
    /// The traveler took the last seat and the tour is now confirmed.
    EnrolledAndConfirmed,
    /// The tour was already confirmed; nothing changed.
    Dropped,
}

/// A group excursion with a fixed seat count.
#[derive(Debug, Clone)]
pub struct Tour {
    id: TourId,
    departure: NaiveDate,
    price_per_traveler: u64,
    capacity: usize,
    places: Vec<Arc<Place>>,
    travelers: Vec<TravelerId>,
    confirmed: bool,
}

impl Tour {
    pub fn new(
        id: impl Into<String>,
        departure: NaiveDate,
        price_per_traveler: u64,
        capacity: usize,
    ) -> Self {
        Self {
            id: TourId(id.into()),
            departure,
            price_per_traveler,
            capacity,
            places: Vec::new(),
            travelers: Vec::new(),
            confirmed: false,
        }
    }

    pub fn with_place(mut self, place: Arc<Place>) -> Self {
        self.places.push(place);
        self
    }

    pub fn add_place(&mut self, place: Arc<Place>) {
        self.places.push(place);
    }

    pub fn id(&self) -> &TourId {
        &self.id
    }

    pub fn departure(&self) -> NaiveDate {
        self.departure
    }

    pub fn price_per_traveler(&self) -> u64 {
        self.price_per_traveler
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn places(&self) -> &[Arc<Place>] {
        &self.places
    }

    pub fn travelers(&self) -> &[TravelerId] {
        &self.travelers
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn is_full(&self) -> bool {
        self.travelers.len() >= self.capacity
    }

    pub fn remaining_seats(&self) -> usize {
        self.capacity.saturating_sub(self.travelers.len())
    }

    /// Last day travelers can pay, `lead_days` before departure. `None` when
    /// that day falls outside the supported calendar.
    pub fn payment_deadline(&self, lead_days: u32) -> Option<NaiveDate> {
        self.departure.checked_sub_days(Days::new(u64::from(lead_days)))
    }

    /// Enrolls while the tour is open and confirms it once the last seat is taken.
    ///
    /// The caller is responsible for firing the confirmation observers when
    /// this returns [`EnrollmentOutcome::EnrolledAndConfirmed`].
    pub fn add_traveler_checked(&mut self, traveler: TravelerId) -> EnrollmentOutcome {
        if self.confirmed {
            return EnrollmentOutcome::Dropped;
        }

        self.travelers.push(traveler);
        if self.is_full() {
            self.confirmed = true;
            EnrollmentOutcome::EnrolledAndConfirmed
        } else {
            EnrollmentOutcome::Enrolled
        }
    }

    /// Marks the tour confirmed. Returns whether the tour was still open.
    pub fn confirm(&mut self) -> bool {
        let was_open = !self.confirmed;
        self.confirmed = true;
        was_open
    }

    /// Administrative enrollment that skips the capacity and confirmation
    /// checks. Never changes the confirmation flag.
    pub fn add_traveler_unchecked(&mut self, traveler: TravelerId) {
        self.travelers.push(traveler);
    }

    /// Administrative removal of the first matching enrollment. Never
    /// reopens a confirmed tour.
    pub fn remove_traveler_unchecked(&mut self, traveler: &TravelerId) -> bool {
        match self.travelers.iter().position(|enrolled| enrolled == traveler) {
            Some(index) => {
                self.travelers.remove(index);
                true
            }
            None => false,
        }
    }
}
