//! Height above the instantaneous sea surface.

use crate::{
    clean::clean,
    profile::{GroundTrackProfile, Sample},
    Config,
};
use geo::geometry::Point;
use log::debug;
use serde::Serialize;

/// A profile paired with per-sample corrected heights and along-track
/// distances.
///
/// Heights are `None` where the sample was cleaned out, a correction
/// was missing, or the result fell outside the valid range. Distances
/// are always present.
#[derive(Debug, Clone)]
pub struct CorrectedProfile<'a> {
    profile: &'a GroundTrackProfile,
    heights: Vec<Option<f64>>,
    distances: Vec<f64>,
}

impl<'a> CorrectedProfile<'a> {
    /// Cleans `profile` and applies geoid, tide, atmosphere and MDT
    /// corrections to what remains.
    pub fn new(profile: &'a GroundTrackProfile, config: &Config) -> Self {
        let range = config.h_ss_low..=config.h_ss_high;
        let heights: Vec<Option<f64>> = profile
            .samples
            .iter()
            .zip(clean(&profile.samples))
            .map(|(sample, h_li)| {
                let h = h_li? - sample.geoid_h? - sample.tide_ocean? - sample.dac? - config.mdt;
                Some(h).filter(|h| range.contains(h))
            })
            .collect();

        let x_atc_0 = profile.samples.first().map_or(0.0, |s| s.x_atc);
        let distances = profile.samples.iter().map(|s| s.x_atc - x_atc_0).collect();

        debug!(
            "correct; beam: {}, cycle: {}, valid: {}/{}",
            profile.meta.beam,
            profile.meta.cycle,
            heights.iter().filter(|h| h.is_some()).count(),
            heights.len()
        );

        Self {
            profile,
            heights,
            distances,
        }
    }

    pub fn profile(&self) -> &'a GroundTrackProfile {
        self.profile
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn heights(&self) -> &[Option<f64>] {
        &self.heights
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Returns the sample at physical `index`, or `None` past either
    /// end of the profile.
    pub fn get(&self, index: usize) -> Option<CorrectedSample<'a>> {
        Some(CorrectedSample {
            index,
            sample: self.profile.samples.get(index)?,
            height: *self.heights.get(index)?,
            distance: *self.distances.get(index)?,
        })
    }
}

/// One sample as seen after correction.
#[derive(Debug, Clone, Copy)]
pub struct CorrectedSample<'a> {
    /// Physical index within the profile.
    pub index: usize,
    pub sample: &'a Sample,
    pub height: Option<f64>,
    /// Along-track distance from the first sample.
    pub distance: f64,
}

/// A located, valid sample reported as part of a feature.
///
/// `index` refers back into the sample list of the profile the point
/// came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeaturePoint {
    pub index: usize,
    pub position: Point<f64>,
    pub location: Point<f64>,
    pub distance: f64,
    pub height: f64,
    pub delta_time: f64,
}

impl<'a> CorrectedSample<'a> {
    /// Returns a feature point if this sample has a valid height.
    pub fn point(&self) -> Option<FeaturePoint> {
        Some(FeaturePoint {
            index: self.index,
            position: self.sample.position,
            location: self.sample.location,
            distance: self.distance,
            height: self.height?,
            delta_time: self.sample.delta_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::CorrectedProfile;
    use crate::{profile::Mask, synthetic, Config, Direction};
    use approx::assert_relative_eq;

    #[test]
    fn test_corrections_applied() {
        let mut profile = synthetic(Direction::Descending, &[30.0]);
        let sample = &mut profile.samples[0];
        sample.geoid_h = Some(-20.0);
        sample.tide_ocean = Some(0.5);
        sample.dac = Some(-0.1);
        let config = Config::default();
        let corrected = CorrectedProfile::new(&profile, &config);
        // 30 - (-20) - 0.5 - (-0.1) - (-1.4)
        assert_relative_eq!(corrected.heights()[0].unwrap(), 51.0, epsilon = 1e-9);
    }

    #[test]
    fn test_out_of_range_invalidated() {
        let profile = synthetic(Direction::Descending, &[-5.0, -5.1, 100.0, 100.1, 50.0]);
        let config = Config {
            mdt: 0.0,
            ..Config::default()
        };
        let corrected = CorrectedProfile::new(&profile, &config);
        assert_eq!(
            corrected.heights(),
            &[Some(-5.0), None, Some(100.0), None, Some(50.0)]
        );
    }

    #[test]
    fn test_missing_correction_invalidates() {
        let mut profile = synthetic(Direction::Ascending, &[10.0, 10.0]);
        profile.samples[1].tide_ocean = None;
        let config = Config::default();
        let corrected = CorrectedProfile::new(&profile, &config);
        assert!(corrected.heights()[0].is_some());
        assert!(corrected.heights()[1].is_none());
    }

    #[test]
    fn test_distances_kept_for_invalid_samples() {
        let mut profile = synthetic(Direction::Descending, &[1.0, 1.0, 1.0]);
        profile.samples[1].quality = 1;
        let config = Config::default();
        let corrected = CorrectedProfile::new(&profile, &config);
        assert!(corrected.heights()[1].is_none());
        assert_eq!(corrected.distances(), &[0.0, 20.0, 40.0]);
        assert!(corrected.get(1).unwrap().point().is_none());
        assert!(corrected.get(3).is_none());
    }

    #[test]
    fn test_cleaned_samples_stay_aligned() {
        let mut profile = synthetic(Direction::Ascending, &[5.0, 6.0, 7.0, 8.0]);
        profile.samples[0].mask = Mask::Grounded;
        profile.samples[2].h_li = Some(f64::INFINITY);
        let config = Config {
            mdt: 0.0,
            ..Config::default()
        };
        let corrected = CorrectedProfile::new(&profile, &config);
        assert_eq!(corrected.len(), profile.len());
        assert_eq!(corrected.heights(), &[None, Some(6.0), None, Some(8.0)]);
        let last = corrected.get(3).unwrap();
        assert_eq!(last.height, Some(8.0));
        assert_eq!(last.distance, 60.0);
        assert!(corrected.get(4).is_none());
    }
}
