use crate::IcefrontError;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

/// Thresholds and constants for the detection pipeline.
///
/// All heights and distances are in meters. Any field missing from a
/// config file takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mean dynamic topography offset subtracted from every height.
    pub mdt: f64,

    /// Lowest valid corrected height (inclusive).
    pub h_ss_low: f64,

    /// Highest valid corrected height (inclusive).
    pub h_ss_high: f64,

    /// Seaward sample of a front jump must sit below this.
    pub h_a_upper_limit: f64,

    /// Front jump must be strictly higher than this.
    pub h_diff_lower_limit: f64,

    /// Front jump must be strictly lower than this.
    pub h_diff_upper_limit: f64,

    /// Largest along-track gap allowed across a front jump.
    pub jump_x_dist_upper_limit: f64,

    /// A moat must stay strictly above this height.
    pub moat_h_lower_limit: f64,

    /// Landward reach of the moat search.
    pub moat_search_dist: f64,

    /// Seaward reach of the rampart search.
    pub rampart_max_search_dist: f64,

    /// Uniform along-track spacing between samples.
    pub step_size: f64,

    /// Epoch that sample `delta_time`s are counted from.
    pub ref_time: DateTime<Utc>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mdt: -1.4,
            h_ss_low: -5.0,
            h_ss_high: 100.0,
            h_a_upper_limit: 2.0,
            h_diff_lower_limit: 10.0,
            h_diff_upper_limit: 100.0,
            jump_x_dist_upper_limit: 80.0,
            moat_h_lower_limit: 2.0,
            moat_search_dist: 2000.0,
            rampart_max_search_dist: 100.0,
            step_size: 20.0,
            ref_time: atlas_epoch(),
        }
    }
}

impl Config {
    /// Reads a JSON config from the file at `path` and validates it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, IcefrontError> {
        let rdr = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(rdr)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), IcefrontError> {
        let finite = [
            self.mdt,
            self.h_ss_low,
            self.h_ss_high,
            self.h_a_upper_limit,
            self.h_diff_lower_limit,
            self.h_diff_upper_limit,
            self.jump_x_dist_upper_limit,
            self.moat_h_lower_limit,
            self.moat_search_dist,
            self.rampart_max_search_dist,
            self.step_size,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(IcefrontError::Config("thresholds must be finite"));
        }
        if self.step_size <= 0.0 {
            return Err(IcefrontError::Config("step_size must be positive"));
        }
        if self.h_ss_low > self.h_ss_high {
            return Err(IcefrontError::Config("h_ss_low exceeds h_ss_high"));
        }
        if self.h_diff_lower_limit >= self.h_diff_upper_limit {
            return Err(IcefrontError::Config(
                "h_diff_lower_limit must be below h_diff_upper_limit",
            ));
        }
        if self.jump_x_dist_upper_limit <= 0.0 {
            return Err(IcefrontError::Config(
                "jump_x_dist_upper_limit must be positive",
            ));
        }
        if self.moat_search_dist < 0.0 || self.rampart_max_search_dist < 0.0 {
            return Err(IcefrontError::Config("search distances can't be negative"));
        }
        if self.moat_steps() == 0 {
            return Err(IcefrontError::Config(
                "moat_search_dist must span at least one step_size",
            ));
        }
        Ok(())
    }

    /// Number of landward steps in the moat window.
    pub fn moat_steps(&self) -> usize {
        window_steps(self.moat_search_dist, self.step_size)
    }

    /// Number of seaward steps in the rampart window, not counting
    /// the anchor sample itself.
    pub fn rampart_steps(&self) -> usize {
        window_steps(self.rampart_max_search_dist, self.step_size)
    }
}

/// ATLAS standard data product epoch, 2018-01-01T00:00:00Z.
pub fn atlas_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0)
        .single()
        .expect("UTC midnight is never ambiguous")
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn window_steps(distance: f64, step_size: f64) -> usize {
    (distance / step_size).floor().max(0.0) as usize
}
