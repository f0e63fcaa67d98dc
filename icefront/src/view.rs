//! Direction-agnostic access to a corrected profile.
//!
//! Ascending and descending passes cross the front from opposite ends
//! of their sample lists. Everything downstream of this module talks
//! in terms of seaward/landward and lets the view translate that into
//! physical sample indices.

use crate::{
    correct::{CorrectedProfile, CorrectedSample},
    Direction,
};

/// Which way to walk along the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    /// Toward the ice shelf.
    Landward,
    /// Toward open water.
    Seaward,
}

/// Valid samples of a profile ordered from most seaward to most
/// landward.
pub struct DirectionalView<'a> {
    corrected: &'a CorrectedProfile<'a>,
    direction: Direction,
    /// Physical indices of valid samples, seaward first.
    order: Vec<usize>,
}

impl<'a> DirectionalView<'a> {
    pub fn new(corrected: &'a CorrectedProfile<'a>) -> Self {
        let direction = corrected.profile().direction;
        let mut order: Vec<usize> = corrected
            .heights()
            .iter()
            .enumerate()
            .filter_map(|(idx, h)| h.map(|_| idx))
            .collect();
        if direction == Direction::Ascending {
            order.reverse();
        }
        Self {
            corrected,
            direction,
            order,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of valid samples.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Maps a logical (seaward-first) position to its physical index.
    pub fn physical(&self, logical: usize) -> Option<usize> {
        self.order.get(logical).copied()
    }

    /// Iterates valid samples from seaward to landward.
    pub fn iter(&self) -> impl Iterator<Item = CorrectedSample<'a>> + '_ {
        self.order.iter().filter_map(|&idx| self.corrected.get(idx))
    }

    /// Returns the sample `steps` physical indices away from `anchor`
    /// in the given heading, or `None` if that runs off the profile.
    ///
    /// Unlike [`Self::iter`] this does not skip invalid samples.
    pub fn step(
        &self,
        anchor: usize,
        steps: usize,
        heading: Heading,
    ) -> Option<CorrectedSample<'a>> {
        let sign = match heading {
            Heading::Landward => self.direction.landward_sign(),
            Heading::Seaward => -self.direction.landward_sign(),
        };
        let offset = isize::try_from(steps).ok()?.checked_mul(sign)?;
        let index = anchor.checked_add_signed(offset)?;
        self.corrected.get(index)
    }
}
