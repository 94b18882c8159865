use serde::{Deserialize, Serialize};

use super::places::Place;

/// Policy answering whether a traveler likes a place.
///
/// `Calm` and `Lively` are pure. `Rotating` advances its active policy every
/// time it answers "liked", and `AnyOf` stops at the first policy that likes
/// the place, so only the policies it actually consulted can rotate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    Calm,
    Lively,
    Rotating(RotatingPreference),
    AnyOf(Vec<Preference>),
}

impl Preference {
    /// Alternates between calm and lively, starting with calm.
    pub fn bipolar() -> Self {
        Self::Rotating(RotatingPreference::default())
    }

    pub fn likes(&mut self, place: &Place) -> bool {
        match self {
            Preference::Calm => place.is_calm(),
            Preference::Lively => place.is_lively(),
            Preference::Rotating(rotating) => rotating.likes(place),
            Preference::AnyOf(options) => options.iter_mut().any(|option| option.likes(place)),
        }
    }

    pub fn as_rotating_mut(&mut self) -> Option<&mut RotatingPreference> {
        match self {
            Preference::Rotating(rotating) => Some(rotating),
            _ => None,
        }
    }
}

/// Two policies taking turns; the active one is consulted first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotatingPreference {
    active: Box<Preference>,
    next: Box<Preference>,
}

impl Default for RotatingPreference {
    fn default() -> Self {
        Self::new(Preference::Calm, Preference::Lively)
    }
}

impl RotatingPreference {
    pub fn new(active: Preference, next: Preference) -> Self {
        Self {
            active: Box::new(active),
            next: Box::new(next),
        }
    }

    pub fn active(&self) -> &Preference {
        &self.active
    }

    pub fn next(&self) -> &Preference {
        &self.next
    }

    /// Consults the active policy; a positive answer hands the turn over.
    pub fn likes(&mut self, place: &Place) -> bool {
        let liked = self.active.likes(place);
        if liked {
            self.rotate();
        }
        liked
    }

    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.active, &mut self.next);
    }
}
