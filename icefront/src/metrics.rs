use crate::rampart::RampartMoat;
use chrono::{DateTime, Duration, Utc};
use log::warn;
use serde::Serialize;

/// Reported size and timing of a rampart-moat feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureMetrics {
    /// Rampart height minus moat height.
    pub dh: f64,

    /// Rampart along-track distance minus moat along-track distance.
    ///
    /// The sign follows the along-track coordinate, so it flips
    /// between ascending and descending passes.
    pub dx: f64,

    /// Midpoint of the rampart and moat acquisition times, `None`
    /// when it can't be represented as a UTC date.
    pub center_time: Option<DateTime<Utc>>,
}

impl FeatureMetrics {
    pub fn new(feature: &RampartMoat, ref_time: DateTime<Utc>) -> Self {
        let RampartMoat { moat, rampart } = feature;
        let dh = rampart.height - moat.height;
        // The search only adopts a moat below b and a rampart at or
        // above b.
        debug_assert!(dh > 0.0, "rampart below moat, dh: {dh}");
        if dh <= 0.0 {
            warn!(
                "rampart {} not above moat {}, dh: {dh}",
                rampart.index, moat.index
            );
        }
        let dx = rampart.distance - moat.distance;
        let center_offset = (rampart.delta_time + moat.delta_time) / 2.0;
        let center_time = seconds(center_offset).and_then(|d| ref_time.checked_add_signed(d));
        if center_time.is_none() {
            warn!(
                "center time out of range, rampart: {}, moat: {}, offset: {center_offset} s",
                rampart.index, moat.index
            );
        }
        Self {
            dh,
            dx,
            center_time,
        }
    }
}

/// Converts fractional seconds to a `Duration`, rounded to the
/// nearest microsecond.
///
/// Returns `None` for non-finite input or more microseconds than an
/// `i64` holds.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn seconds(secs: f64) -> Option<Duration> {
    let micros = (secs * 1e6).round();
    // `i64::MAX as f64` rounds up to 2^63, itself out of range.
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(Duration::microseconds(micros as i64))
}

#[cfg(test)]
mod tests {
    use super::FeatureMetrics;
    use crate::{atlas_epoch, correct::FeaturePoint, rampart::RampartMoat};
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};
    use geo::point;

    fn point(index: usize, distance: f64, height: f64, delta_time: f64) -> FeaturePoint {
        FeaturePoint {
            index,
            position: point!(x: 0.0, y: 0.0),
            location: point!(x: 0.0, y: 0.0),
            distance,
            height,
            delta_time,
        }
    }

    #[test]
    fn test_metrics() {
        let feature = RampartMoat {
            moat: point(5, 100.0, 10.0, 86_400.5),
            rampart: point(0, 0.0, 55.0, 86_399.5),
        };
        let metrics = FeatureMetrics::new(&feature, atlas_epoch());
        assert_relative_eq!(metrics.dh, 45.0);
        assert_relative_eq!(metrics.dx, -100.0);
        assert_eq!(
            metrics.center_time,
            Some(Utc.with_ymd_and_hms(2018, 1, 2, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_fractional_center_time() {
        let feature = RampartMoat {
            moat: point(1, 20.0, 10.0, 1.0),
            rampart: point(0, 0.0, 20.0, 1.5),
        };
        let metrics = FeatureMetrics::new(&feature, atlas_epoch());
        assert_eq!(
            (metrics.center_time.unwrap() - atlas_epoch()).num_microseconds(),
            Some(1_250_000)
        );
        assert_relative_eq!(metrics.dx, -20.0);
    }

    #[test]
    fn test_unrepresentable_center_time() {
        for delta_time in [1.0e13, -9.0e12, f64::NAN, f64::INFINITY] {
            let feature = RampartMoat {
                moat: point(2, 40.0, 10.0, delta_time),
                rampart: point(0, 0.0, 50.0, delta_time),
            };
            let metrics = FeatureMetrics::new(&feature, atlas_epoch());
            assert!(metrics.center_time.is_none(), "delta_time: {delta_time}");
            assert_relative_eq!(metrics.dh, 40.0);
            assert_relative_eq!(metrics.dx, -40.0);
        }
    }
}
