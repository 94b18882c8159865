use serde::Serialize;

use super::allocation::AllocationEngine;
use super::domain::{TourId, TravelerId};

/// Snapshot of a tour for reports and CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourStatusView {
    pub tour: TourId,
    pub status: &'static str,
    pub capacity: usize,
    pub enrolled: Vec<TravelerId>,
    pub remaining_seats: usize,
}

/// Travelers still waiting or left pending after the latest pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueView {
    pub waiting: Vec<TravelerId>,
    pub pending: Vec<TravelerId>,
}

pub fn tour_statuses(engine: &AllocationEngine) -> Vec<TourStatusView> {
    engine
        .tours()
        .iter()
        .map(|tour| TourStatusView {
            tour: tour.id().clone(),
            status: if tour.is_confirmed() {
                "confirmed"
            } else if tour.is_full() {
                "full"
            } else {
                "open"
            },
            capacity: tour.capacity(),
            enrolled: tour.travelers().to_vec(),
            remaining_seats: tour.remaining_seats(),
        })
        .collect()
}

pub fn queue(engine: &AllocationEngine) -> QueueView {
    QueueView {
        waiting: engine.waiting().to_vec(),
        pending: engine.pending().to_vec(),
    }
}
