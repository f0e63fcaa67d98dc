use crate::{
    correct::CorrectedProfile,
    front::FrontCrossing,
    metrics::FeatureMetrics,
    profile::{Direction, GroundTrackProfile, ProfileRecord, TrackMeta},
    rampart::RampartMoat,
    view::DirectionalView,
    Config,
};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

/// Everything detected on one ground-track profile.
///
/// `found` mirrors `front.is_some()` and `rm_flag` mirrors
/// `feature.is_some()`; `metrics` is present exactly when `feature`
/// is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRecord {
    #[serde(flatten)]
    pub meta: TrackMeta,

    /// `None` when the input carried an unrecognized direction code.
    pub direction: Option<Direction>,

    pub found: bool,
    pub front: Option<FrontCrossing>,

    pub rm_flag: bool,
    pub feature: Option<RampartMoat>,
    pub metrics: Option<FeatureMetrics>,
}

impl TrackRecord {
    fn new(
        meta: TrackMeta,
        direction: Option<Direction>,
        front: Option<FrontCrossing>,
        feature: Option<RampartMoat>,
        metrics: Option<FeatureMetrics>,
    ) -> Self {
        Self {
            meta,
            direction,
            found: front.is_some(),
            front,
            rm_flag: feature.is_some(),
            feature,
            metrics,
        }
    }

    /// A record with nothing detected.
    fn absent(meta: TrackMeta, direction: Option<Direction>) -> Self {
        Self::new(meta, direction, None, None, None)
    }
}

/// Runs the full detection chain on a single profile.
pub fn process(profile: &GroundTrackProfile, config: &Config) -> TrackRecord {
    let now = std::time::Instant::now();

    let corrected = CorrectedProfile::new(profile, config);
    let view = DirectionalView::new(&corrected);
    let front = FrontCrossing::detect(&view, config);
    let feature = front
        .as_ref()
        .and_then(|front| RampartMoat::detect(&view, front, config));
    let metrics = feature
        .as_ref()
        .map(|feature| FeatureMetrics::new(feature, config.ref_time));

    debug!(
        "process; beam: {}, cycle: {}, track: {}, len: {}, exec: {:?}",
        profile.meta.beam,
        profile.meta.cycle,
        profile.meta.track,
        profile.len(),
        now.elapsed()
    );

    TrackRecord::new(
        profile.meta.clone(),
        Some(profile.direction),
        front,
        feature,
        metrics,
    )
}

/// Validates `record` and runs [`process`] on it.
///
/// Malformed records are logged and reported with nothing detected.
pub fn process_record(record: &ProfileRecord, config: &Config) -> TrackRecord {
    match GroundTrackProfile::try_from(record) {
        Ok(profile) => process(&profile, config),
        Err(e) => {
            warn!(
                "skipping beam: {}, cycle: {}, track: {}; {e}",
                record.meta.beam, record.meta.cycle, record.meta.track
            );
            TrackRecord::absent(
                record.meta.clone(),
                Direction::try_from(record.direction).ok(),
            )
        }
    }
}

/// Processes every record in parallel.
///
/// Output order matches `records`.
pub fn process_batch(records: &[ProfileRecord], config: &Config) -> Vec<TrackRecord> {
    let now = std::time::Instant::now();
    let output: Vec<TrackRecord> = records
        .par_iter()
        .map(|record| process_record(record, config))
        .collect();
    info!(
        "batch; profiles: {}, fronts: {}, features: {}, exec: {:?}",
        output.len(),
        output.iter().filter(|r| r.found).count(),
        output.iter().filter(|r| r.rm_flag).count(),
        now.elapsed()
    );
    output
}
