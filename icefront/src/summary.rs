//! Aggregation of per-profile results across a repeat cycle.

use crate::{pipeline::TrackRecord, Direction};
use serde::Serialize;
use std::collections::BTreeMap;

/// Detection counts and mean feature size for one cycle and pass
/// direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleSummary {
    pub cycle: u16,
    pub direction: Option<Direction>,
    pub profiles: usize,
    pub fronts: usize,
    pub features: usize,
    /// `None` when no feature was found.
    pub mean_dh: Option<f64>,
    pub mean_dx: Option<f64>,
}

#[derive(Default)]
struct Tally {
    profiles: usize,
    fronts: usize,
    features: usize,
    sum_dh: f64,
    sum_dx: f64,
}

/// Groups `records` by `(cycle, direction)`, sorted by that key.
pub fn summarize(records: &[TrackRecord]) -> Vec<CycleSummary> {
    let mut tallies: BTreeMap<(u16, Option<Direction>), Tally> = BTreeMap::new();
    for record in records {
        let tally = tallies
            .entry((record.meta.cycle, record.direction))
            .or_default();
        tally.profiles += 1;
        tally.fronts += usize::from(record.found);
        if let Some(metrics) = &record.metrics {
            tally.features += 1;
            tally.sum_dh += metrics.dh;
            tally.sum_dx += metrics.dx;
        }
    }

    tallies
        .into_iter()
        .map(|((cycle, direction), tally)| {
            #[allow(clippy::cast_precision_loss)]
            let mean = |sum: f64| (tally.features > 0).then(|| sum / tally.features as f64);
            CycleSummary {
                cycle,
                direction,
                profiles: tally.profiles,
                fronts: tally.fronts,
                features: tally.features,
                mean_dh: mean(tally.sum_dh),
                mean_dx: mean(tally.sum_dx),
            }
        })
        .collect()
}
