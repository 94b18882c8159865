use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{EnrollmentOutcome, Tour, TourId, Traveler, TravelerId, TravelerRoster};
use super::observers::{ObserverChain, ObserverError};

/// Error raised by the allocation engine.
#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    #[error("tour {0} is already registered")]
    DuplicateTour(TourId),
    #[error("tour {0} has no seats")]
    ZeroCapacity(TourId),
    #[error("traveler {0} is already registered")]
    DuplicateTraveler(TravelerId),
    #[error("unknown tour {0}")]
    UnknownTour(TourId),
    #[error("unknown traveler {0}")]
    UnknownTraveler(TravelerId),
    /// An observer failed after `tour` was confirmed. During a pass, `report`
    /// holds everything the pass did up to and including the enrollment that
    /// confirmed the tour; explicit confirmations carry an empty report.
    #[error("confirmation of tour {tour} aborted")]
    ConfirmationAborted {
        tour: TourId,
        #[source]
        source: ObserverError,
        report: Box<AllocationReport>,
    },
}

/// A traveler seated on a tour during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrollment {
    pub traveler: TravelerId,
    pub tour: TourId,
}

/// Outcome of one allocation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllocationReport {
    pub enrollments: Vec<Enrollment>,
    pub pending: Vec<TravelerId>,
    pub confirmed_tours: Vec<TourId>,
}

/// Matches waiting travelers to open tours and fires confirmation observers.
///
/// Tours are offered in registration order and travelers are processed in
/// the order they were queued; the first eligible tour wins.
#[derive(Debug, Default)]
pub struct AllocationEngine {
    tours: Vec<Tour>,
    roster: TravelerRoster,
    waiting: Vec<TravelerId>,
    pending: Vec<TravelerId>,
    observers: ObserverChain,
}

impl AllocationEngine {
    pub fn new(observers: ObserverChain) -> Self {
        Self {
            observers,
            ..Self::default()
        }
    }

    pub fn register_tour(&mut self, tour: Tour) -> Result<(), AllocationError> {
        if tour.capacity() == 0 {
            return Err(AllocationError::ZeroCapacity(tour.id().clone()));
        }
        if self.tours.iter().any(|existing| existing.id() == tour.id()) {
            return Err(AllocationError::DuplicateTour(tour.id().clone()));
        }
        self.tours.push(tour);
        Ok(())
    }

    /// Adds the traveler to the roster and to the back of the waiting list.
    pub fn register_traveler(&mut self, traveler: Traveler) -> Result<(), AllocationError> {
        let id = traveler.id.clone();
        self.roster
            .insert(traveler)
            .map_err(|rejected| AllocationError::DuplicateTraveler(rejected.id))?;
        self.waiting.push(id);
        Ok(())
    }

    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    pub fn tour(&self, id: &TourId) -> Option<&Tour> {
        self.tours.iter().find(|tour| tour.id() == id)
    }

    pub fn traveler(&self, id: &TravelerId) -> Option<&Traveler> {
        self.roster.get(id)
    }

    pub fn waiting(&self) -> &[TravelerId] {
        &self.waiting
    }

    pub fn pending(&self) -> &[TravelerId] {
        &self.pending
    }

    pub fn observers(&self) -> &ObserverChain {
        &self.observers
    }

    /// Offers every waiting traveler the first eligible tour.
    ///
    /// Observers run synchronously whenever a traveler fills a tour. If one
    /// fails, the pass stops: travelers already seated or moved to pending
    /// stay where they are, and the traveler whose enrollment triggered the
    /// failure remains seated and at the front of the waiting list together
    /// with everyone not yet processed. The error carries the partial report.
    pub fn run_allocation_pass(&mut self) -> Result<AllocationReport, AllocationError> {
        let queue = std::mem::take(&mut self.waiting);
        let mut report = AllocationReport::default();
        let mut remaining = queue.into_iter();

        while let Some(traveler_id) = remaining.next() {
            match self.place_traveler(&traveler_id) {
                Ok(Some((tour_id, confirmed))) => {
                    if confirmed {
                        report.confirmed_tours.push(tour_id.clone());
                    }
                    report.enrollments.push(Enrollment {
                        traveler: traveler_id,
                        tour: tour_id,
                    });
                }
                Ok(None) => {
                    debug!(traveler = %traveler_id, "no eligible tour; traveler left pending");
                    self.pending.push(traveler_id.clone());
                    report.pending.push(traveler_id);
                }
                Err(err) => {
                    self.waiting = std::iter::once(traveler_id.clone())
                        .chain(remaining)
                        .collect();
                    return Err(match err {
                        AllocationError::ConfirmationAborted { tour, source, .. } => {
                            report.confirmed_tours.push(tour.clone());
                            report.enrollments.push(Enrollment {
                                traveler: traveler_id,
                                tour: tour.clone(),
                            });
                            AllocationError::ConfirmationAborted {
                                tour,
                                source,
                                report: Box::new(report),
                            }
                        }
                        other => other,
                    });
                }
            }
        }

        info!(
            enrolled = report.enrollments.len(),
            pending = report.pending.len(),
            confirmed = report.confirmed_tours.len(),
            "allocation pass complete"
        );
        Ok(report)
    }

    /// Administrative confirmation. Observers fire on every call, including
    /// for tours that are already confirmed.
    pub fn confirm_tour(&mut self, id: &TourId) -> Result<(), AllocationError> {
        let index = self.tour_index(id)?;
        let tour = &mut self.tours[index];
        if !tour.confirm() {
            warn!(tour = %id, "re-confirming an already confirmed tour");
        }
        info!(tour = %id, travelers = tour.travelers().len(), "tour confirmed");
        fire(&self.observers, &self.tours[index], &mut self.roster)
    }

    /// Seats a registered traveler regardless of capacity or confirmation.
    /// No observers fire and the traveler's waiting/pending status is untouched.
    pub fn enroll_unchecked(
        &mut self,
        tour: &TourId,
        traveler: &TravelerId,
    ) -> Result<(), AllocationError> {
        if !self.roster.contains(traveler) {
            return Err(AllocationError::UnknownTraveler(traveler.clone()));
        }
        let index = self.tour_index(tour)?;
        let tour = &mut self.tours[index];
        tour.add_traveler_unchecked(traveler.clone());
        if tour.travelers().len() > tour.capacity() {
            warn!(
                tour = %tour.id(),
                capacity = tour.capacity(),
                enrolled = tour.travelers().len(),
                "unchecked enrollment exceeds tour capacity"
            );
        }
        Ok(())
    }

    /// Removes a traveler from a tour without reopening it. Returns whether
    /// the traveler was enrolled.
    pub fn remove_from_tour(
        &mut self,
        tour: &TourId,
        traveler: &TravelerId,
    ) -> Result<bool, AllocationError> {
        let index = self.tour_index(tour)?;
        Ok(self.tours[index].remove_traveler_unchecked(traveler))
    }

    /// Moves every pending traveler back to the waiting list for the next pass.
    pub fn requeue_pending(&mut self) -> usize {
        let moved = self.pending.len();
        self.waiting.append(&mut self.pending);
        moved
    }

    fn tour_index(&self, id: &TourId) -> Result<usize, AllocationError> {
        self.tours
            .iter()
            .position(|tour| tour.id() == id)
            .ok_or_else(|| AllocationError::UnknownTour(id.clone()))
    }

    /// Seats the traveler on the first eligible tour, returning the tour and
    /// whether this enrollment confirmed it.
    fn place_traveler(
        &mut self,
        traveler_id: &TravelerId,
    ) -> Result<Option<(TourId, bool)>, AllocationError> {
        let traveler = self
            .roster
            .get_mut(traveler_id)
            .ok_or_else(|| AllocationError::UnknownTraveler(traveler_id.clone()))?;

        let Some(index) = self
            .tours
            .iter()
            .position(|tour| is_eligible(tour, traveler))
        else {
            return Ok(None);
        };

        let tour = &mut self.tours[index];
        let outcome = tour.add_traveler_checked(traveler_id.clone());
        let tour_id = tour.id().clone();
        debug!(traveler = %traveler_id, tour = %tour_id, ?outcome, "traveler enrolled");

        let confirmed = outcome == EnrollmentOutcome::EnrolledAndConfirmed;
        if confirmed {
            info!(tour = %tour_id, "tour filled and confirmed");
            fire(&self.observers, &self.tours[index], &mut self.roster)?;
        }

        Ok(Some((tour_id, confirmed)))
    }
}

/// Open, affordable, and every required place liked. Places are consulted in
/// itinerary order and the check stops at the first dislike, so a rotating
/// preference only turns on the places it actually saw.
fn is_eligible(tour: &Tour, traveler: &mut Traveler) -> bool {
    !tour.is_confirmed()
        && tour.price_per_traveler() <= traveler.budget
        && tour.places().iter().all(|place| traveler.likes(place))
}

fn fire(
    observers: &ObserverChain,
    tour: &Tour,
    roster: &mut TravelerRoster,
) -> Result<(), AllocationError> {
    observers
        .notify(tour, roster)
        .map_err(|source| AllocationError::ConfirmationAborted {
            tour: tour.id().clone(),
            source,
            report: Box::default(),
        })
}
