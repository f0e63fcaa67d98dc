//! # Ice-shelf front detection
//!
//! `icefront` finds where laser-altimetry ground tracks step up from
//! open water onto a floating ice shelf, and measures the
//! rampart-moat relief just behind that step.
//!
//! Each profile runs through the same chain: [`CorrectedProfile`]
//! drops grounded and low-quality samples with [`clean()`] and
//! references the rest to the instantaneous sea surface,
//! [`DirectionalView`] orders samples from sea to land, and
//! [`FrontCrossing`], [`RampartMoat`] and [`FeatureMetrics`] carry the
//! detections. [`process_batch`] drives the chain over many profiles
//! in parallel.

mod clean;
mod config;
mod correct;
mod error;
mod front;
mod metrics;
mod pipeline;
mod profile;
mod rampart;
mod summary;
mod view;

pub use {
    crate::{
        clean::clean,
        config::{atlas_epoch, Config},
        correct::{CorrectedProfile, CorrectedSample, FeaturePoint},
        error::{IcefrontError, ProfileError},
        front::FrontCrossing,
        metrics::FeatureMetrics,
        pipeline::{process, process_batch, process_record, TrackRecord},
        profile::{
            BeamStrength, Direction, GroundTrackProfile, Mask, ProfileRecord, Sample, TrackMeta,
        },
        rampart::RampartMoat,
        summary::{summarize, CycleSummary},
        view::{DirectionalView, Heading},
    },
    chrono, geo,
};

/// Builds a clean profile whose corrected heights equal `heights`
/// when `mdt` is zero.
///
/// Samples are 20 m and one second apart.
#[cfg(test)]
pub(crate) fn synthetic(direction: Direction, heights: &[f64]) -> GroundTrackProfile {
    use geo::point;

    let samples = heights
        .iter()
        .enumerate()
        .map(|(idx, &h)| {
            #[allow(clippy::cast_precision_loss)]
            let idx_f = idx as f64;
            Sample {
                position: point!(x: -1_500_000.0 + 20.0 * idx_f, y: 500_000.0),
                location: point!(x: -170.0, y: -78.5 + 0.000_18 * idx_f),
                x_atc: 1000.0 + 20.0 * idx_f,
                h_li: Some(h),
                geoid_h: Some(0.0),
                tide_ocean: Some(0.0),
                dac: Some(0.0),
                mask: Mask::IceShelf,
                quality: 0,
                delta_time: idx_f,
            }
        })
        .collect();
    GroundTrackProfile {
        meta: TrackMeta {
            beam: "gt1l".to_string(),
            strength: BeamStrength::Strong,
            cycle: 1,
            track: 1234,
            region: 12,
        },
        direction,
        samples,
    }
}
