//! Rampart-moat search around a detected front.
//!
//! Both phases walk physical sample indices outward from the front's
//! landward point `b`. Walking past either end of the profile simply
//! ends the phase. Samples without a valid height are stepped over.
//!
//! The moat phase stops at the first sample that isn't a new minimum
//! above the floor, so it returns the nearest depression rather than
//! the deepest one in the window. A lower sample beyond an
//! intervening rise is never reached.

use crate::{
    correct::FeaturePoint,
    front::FrontCrossing,
    view::{DirectionalView, Heading},
    Config,
};
use log::debug;
use serde::Serialize;

/// A rampart (local high at the ice edge) and the moat behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RampartMoat {
    pub moat: FeaturePoint,
    pub rampart: FeaturePoint,
}

impl RampartMoat {
    /// Returns `None` when no moat is found landward of the front.
    pub fn detect(
        view: &DirectionalView<'_>,
        front: &FrontCrossing,
        config: &Config,
    ) -> Option<Self> {
        let Some(moat) = find_moat(view, &front.b, config) else {
            debug!("rampart-moat; no moat behind b: {}", front.b.index);
            return None;
        };
        let rampart = find_rampart(view, &front.b, config);
        debug!(
            "rampart-moat; rampart: {} ({}), moat: {} ({})",
            rampart.index, rampart.height, moat.index, moat.height
        );
        Some(Self { moat, rampart })
    }
}

/// Walks landward from `b` while heights keep strictly falling and
/// stay above `moat_h_lower_limit`.
fn find_moat(
    view: &DirectionalView<'_>,
    b: &FeaturePoint,
    config: &Config,
) -> Option<FeaturePoint> {
    let mut moat: Option<FeaturePoint> = None;
    for j in 1..=config.moat_steps() {
        let Some(candidate) = view.step(b.index, j, Heading::Landward) else {
            // Short beam.
            break;
        };
        let Some(point) = candidate.point() else {
            continue;
        };
        let running_min = moat.map_or(b.height, |m| m.height);
        if point.height < running_min && point.height > config.moat_h_lower_limit {
            moat = Some(point);
        } else {
            break;
        }
    }
    moat
}

/// Returns the highest sample within the seaward window starting at
/// `b`, `b` itself if nothing is higher.
fn find_rampart(view: &DirectionalView<'_>, b: &FeaturePoint, config: &Config) -> FeaturePoint {
    let mut rampart = *b;
    for j in 1..=config.rampart_steps() {
        let Some(candidate) = view.step(b.index, j, Heading::Seaward) else {
            break;
        };
        if let Some(point) = candidate.point() {
            if point.height > rampart.height {
                rampart = point;
            }
        }
    }
    rampart
}
