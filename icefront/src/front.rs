use crate::{correct::FeaturePoint, view::DirectionalView, Config};
use log::debug;
use serde::Serialize;

/// Where a track steps up from open water onto the ice shelf.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrontCrossing {
    /// Seaward side of the jump (point A).
    pub a: FeaturePoint,

    /// Landward side of the jump (point B).
    pub b: FeaturePoint,

    /// Absolute height difference between `a` and `b`.
    pub h_diff: f64,

    /// Absolute along-track gap between `a` and `b`.
    pub x_gap: f64,
}

impl FrontCrossing {
    /// Scans valid samples from the sea inward and returns the first
    /// adjacent pair that looks like an ocean to ice-shelf step.
    ///
    /// A pair `(a, b)` qualifies when `a` is below
    /// `h_a_upper_limit`, the jump lies strictly between the
    /// `h_diff_*` limits, and `a` and `b` are closer than
    /// `jump_x_dist_upper_limit` along track. Later pairs are never
    /// considered once one qualifies.
    pub fn detect(view: &DirectionalView<'_>, config: &Config) -> Option<Self> {
        if view.len() < 2 {
            debug!("front; only {} valid samples", view.len());
            return None;
        }

        let crossing = view
            .iter()
            .zip(view.iter().skip(1))
            .find_map(|(seaward, landward)| {
                let a = seaward.point()?;
                let b = landward.point()?;
                let h_diff = (b.height - a.height).abs();
                let x_gap = (landward.sample.x_atc - seaward.sample.x_atc).abs();
                let qualifies = a.height < config.h_a_upper_limit
                    && config.h_diff_lower_limit < h_diff
                    && h_diff < config.h_diff_upper_limit
                    && x_gap < config.jump_x_dist_upper_limit;
                qualifies.then_some(Self {
                    a,
                    b,
                    h_diff,
                    x_gap,
                })
            });

        match &crossing {
            Some(FrontCrossing { a, b, h_diff, .. }) => {
                debug!("front; a: {}, b: {}, h_diff: {h_diff}", a.index, b.index);
            }
            None => debug!("front; no crossing"),
        }
        crossing
    }
}

#[cfg(test)]
mod tests {
    use super::FrontCrossing;
    use crate::{
        correct::CorrectedProfile, synthetic, view::DirectionalView, Config, Direction,
        GroundTrackProfile,
    };
    use approx::assert_relative_eq;

    fn config() -> Config {
        Config {
            mdt: 0.0,
            ..Config::default()
        }
    }

    fn detect(profile: &GroundTrackProfile) -> Option<FrontCrossing> {
        let config = config();
        let corrected = CorrectedProfile::new(profile, &config);
        let view = DirectionalView::new(&corrected);
        FrontCrossing::detect(&view, &config)
    }

    #[test]
    fn test_descending_jump() {
        let profile = synthetic(Direction::Descending, &[0.4, 0.5, 50.5, 49.0]);
        let crossing = detect(&profile).unwrap();
        assert_eq!(crossing.a.index, 1);
        assert_eq!(crossing.b.index, 2);
        assert_relative_eq!(crossing.h_diff, 50.0);
        assert_relative_eq!(crossing.x_gap, 20.0);
        assert_relative_eq!(crossing.b.distance, 40.0);
    }

    #[test]
    fn test_ascending_jump() {
        let profile = synthetic(Direction::Ascending, &[49.0, 50.5, 0.5, 0.4]);
        let crossing = detect(&profile).unwrap();
        assert_eq!(crossing.a.index, 2);
        assert_eq!(crossing.b.index, 1);
        assert_relative_eq!(crossing.h_diff, 50.0);
    }

    #[test]
    fn test_first_match_wins_descending() {
        let profile = synthetic(
            Direction::Descending,
            &[0.5, 30.0, 30.0, 0.5, 0.5, 60.0, 60.0],
        );
        let crossing = detect(&profile).unwrap();
        assert_eq!((crossing.a.index, crossing.b.index), (0, 1));
    }

    #[test]
    fn test_first_match_wins_ascending() {
        let profile = synthetic(
            Direction::Ascending,
            &[60.0, 60.0, 0.5, 0.5, 30.0, 30.0, 0.5],
        );
        let crossing = detect(&profile).unwrap();
        assert_eq!((crossing.a.index, crossing.b.index), (6, 5));
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        // Jump of exactly h_diff_lower_limit.
        assert!(detect(&synthetic(Direction::Descending, &[0.0, 10.0])).is_none());
        // Jump of exactly h_diff_upper_limit.
        assert!(detect(&synthetic(Direction::Descending, &[0.0, 100.0])).is_none());
        // Seaward sample at exactly h_a_upper_limit.
        assert!(detect(&synthetic(Direction::Descending, &[2.0, 40.0])).is_none());
        assert!(detect(&synthetic(Direction::Descending, &[1.9, 40.0])).is_some());
    }

    #[test]
    fn test_downward_step_is_not_a_front() {
        // Ice to water, seen in scan order, has a high seaward side.
        assert!(detect(&synthetic(Direction::Descending, &[40.0, 0.5])).is_none());
    }

    #[test]
    fn test_gap_rejection() {
        let mut profile = synthetic(Direction::Descending, &[0.5, 0.5, 0.5, 0.5, 40.0]);
        // Three dropped samples leave an 80 m gap.
        for idx in 1..4 {
            profile.samples[idx].quality = 1;
        }
        assert!(detect(&profile).is_none());

        // Two dropped samples leave a 60 m gap, which is fine.
        profile.samples[1].quality = 0;
        let crossing = detect(&profile).unwrap();
        assert_eq!((crossing.a.index, crossing.b.index), (1, 4));
        assert_relative_eq!(crossing.x_gap, 60.0);
    }

    #[test]
    fn test_too_few_valid_samples() {
        assert!(detect(&synthetic(Direction::Descending, &[])).is_none());
        assert!(detect(&synthetic(Direction::Descending, &[0.5])).is_none());
        let mut profile = synthetic(Direction::Descending, &[0.5, 40.0]);
        profile.samples[1].quality = 1;
        assert!(detect(&profile).is_none());
    }
}
