use crate::{IcefrontError, ProfileError};
use geo::geometry::Point;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

/// Orbit direction the track was recorded in.
///
/// Over the Antarctic margin a descending pass starts over open water
/// and heads inland, so its first sample is the seaward end. An
/// ascending pass is the reverse.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Direction {
    Ascending = 1,
    Descending = 2,
}

impl Direction {
    /// Returns the numeric code used in input and output records.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Sign of a physical index step that moves toward the ice shelf.
    pub fn landward_sign(self) -> isize {
        match self {
            Self::Ascending => -1,
            Self::Descending => 1,
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> u8 {
        direction.code()
    }
}

impl TryFrom<u8> for Direction {
    type Error = ProfileError;

    fn try_from(code: u8) -> Result<Self, ProfileError> {
        match code {
            1 => Ok(Self::Ascending),
            2 => Ok(Self::Descending),
            other => Err(ProfileError::UnknownDirection(other)),
        }
    }
}

/// Strong/weak beam classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeamStrength {
    Strong,
    Weak,
}

/// Background surface classification of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Mask {
    Ocean = 0,
    Grounded = 1,
    IceShelf = 2,
}

impl From<Mask> for u8 {
    fn from(mask: Mask) -> u8 {
        mask as u8
    }
}

impl TryFrom<u8> for Mask {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, u8> {
        match code {
            0 => Ok(Self::Ocean),
            1 => Ok(Self::Grounded),
            2 => Ok(Self::IceShelf),
            other => Err(other),
        }
    }
}

/// Identifies one beam of one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMeta {
    /// Beam name, e.g. `gt1l`.
    pub beam: String,
    pub strength: BeamStrength,
    pub cycle: u16,
    /// Reference ground track.
    pub track: u16,
    pub region: u8,
}

/// One along-track measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Projected (polar stereographic) position in meters.
    pub position: Point<f64>,

    /// Geographic position, `x` is longitude and `y` latitude.
    pub location: Point<f64>,

    /// Along-track coordinate in meters.
    pub x_atc: f64,

    /// Land-ice height; `None` for fill values.
    pub h_li: Option<f64>,

    pub geoid_h: Option<f64>,

    /// Ocean tide correction.
    pub tide_ocean: Option<f64>,

    /// Dynamic atmosphere (inverted barometer) correction.
    pub dac: Option<f64>,

    pub mask: Mask,

    /// Quality summary, zero meaning no known problem.
    pub quality: u8,

    /// Seconds since the reference epoch.
    pub delta_time: f64,
}

/// One beam's ordered samples for one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTrackProfile {
    pub meta: TrackMeta,
    pub direction: Direction,
    pub samples: Vec<Sample>,
}

impl GroundTrackProfile {
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

/// Columnar per-beam profile as handed over by the upstream parser.
///
/// Every per-sample column must be the same length as `x_atc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(flatten)]
    pub meta: TrackMeta,
    /// Raw direction code, see [`Direction`].
    pub direction: u8,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub latitude: Vec<f64>,
    pub longitude: Vec<f64>,
    pub x_atc: Vec<f64>,
    pub h_li: Vec<Option<f64>>,
    pub geoid_h: Vec<Option<f64>>,
    pub tide_ocean: Vec<Option<f64>>,
    pub dac: Vec<Option<f64>>,
    pub mask: Vec<u8>,
    pub quality: Vec<u8>,
    pub delta_time: Vec<f64>,
}

impl ProfileRecord {
    /// Reads a JSON array of records from the file at `path`.
    pub fn read_all<P: AsRef<Path>>(path: P) -> Result<Vec<Self>, IcefrontError> {
        let rdr = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(rdr)?)
    }

    fn check_len(&self) -> Result<usize, ProfileError> {
        let expected = self.x_atc.len();
        let columns = [
            ("x", self.x.len()),
            ("y", self.y.len()),
            ("latitude", self.latitude.len()),
            ("longitude", self.longitude.len()),
            ("h_li", self.h_li.len()),
            ("geoid_h", self.geoid_h.len()),
            ("tide_ocean", self.tide_ocean.len()),
            ("dac", self.dac.len()),
            ("mask", self.mask.len()),
            ("quality", self.quality.len()),
            ("delta_time", self.delta_time.len()),
        ];
        match columns.iter().find(|(_, actual)| *actual != expected) {
            Some(&(field, actual)) => Err(ProfileError::LengthMismatch {
                field,
                expected,
                actual,
            }),
            None => Ok(expected),
        }
    }
}

impl TryFrom<&ProfileRecord> for GroundTrackProfile {
    type Error = ProfileError;

    fn try_from(record: &ProfileRecord) -> Result<Self, ProfileError> {
        let direction = Direction::try_from(record.direction)?;
        let len = record.check_len()?;
        let samples = (0..len)
            .map(|idx| {
                let mask = Mask::try_from(record.mask[idx])
                    .map_err(|code| ProfileError::UnknownMask { index: idx, code })?;
                let delta_time = record.delta_time[idx];
                if !delta_time.is_finite() {
                    return Err(ProfileError::NonFiniteTime(idx));
                }
                Ok(Sample {
                    position: Point::new(record.x[idx], record.y[idx]),
                    location: Point::new(record.longitude[idx], record.latitude[idx]),
                    x_atc: record.x_atc[idx],
                    h_li: record.h_li[idx],
                    geoid_h: record.geoid_h[idx],
                    tide_ocean: record.tide_ocean[idx],
                    dac: record.dac[idx],
                    mask,
                    quality: record.quality[idx],
                    delta_time,
                })
            })
            .collect::<Result<Vec<_>, ProfileError>>()?;
        Ok(Self {
            meta: record.meta.clone(),
            direction,
            samples,
        })
    }
}

impl From<&GroundTrackProfile> for ProfileRecord {
    fn from(profile: &GroundTrackProfile) -> Self {
        let column =
            |f: fn(&Sample) -> f64| -> Vec<f64> { profile.samples.iter().map(f).collect() };
        let optional = |f: fn(&Sample) -> Option<f64>| -> Vec<Option<f64>> {
            profile.samples.iter().map(f).collect()
        };
        Self {
            meta: profile.meta.clone(),
            direction: profile.direction.code(),
            x: column(|s| s.position.x()),
            y: column(|s| s.position.y()),
            latitude: column(|s| s.location.y()),
            longitude: column(|s| s.location.x()),
            x_atc: column(|s| s.x_atc),
            h_li: optional(|s| s.h_li),
            geoid_h: optional(|s| s.geoid_h),
            tide_ocean: optional(|s| s.tide_ocean),
            dac: optional(|s| s.dac),
            mask: profile.samples.iter().map(|s| u8::from(s.mask)).collect(),
            quality: profile.samples.iter().map(|s| s.quality).collect(),
            delta_time: column(|s| s.delta_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, GroundTrackProfile, ProfileError, ProfileRecord};
    use crate::synthetic;

    #[test]
    fn test_direction_codes() {
        assert_eq!(Direction::try_from(1), Ok(Direction::Ascending));
        assert_eq!(Direction::try_from(2), Ok(Direction::Descending));
        assert_eq!(
            Direction::try_from(0),
            Err(ProfileError::UnknownDirection(0))
        );
        assert_eq!(Direction::Ascending.reversed(), Direction::Descending);
        assert_eq!(Direction::Descending.landward_sign(), 1);
        assert_eq!(Direction::Ascending.landward_sign(), -1);
    }

    #[test]
    fn test_record_roundtrip_through_profile() {
        let profile = synthetic(Direction::Descending, &[0.5, 0.5, 50.5, 45.0]);
        let record = ProfileRecord::from(&profile);
        assert_eq!(GroundTrackProfile::try_from(&record).unwrap(), profile);
    }

    #[test]
    fn test_unknown_direction_rejected() {
        let mut record = ProfileRecord::from(&synthetic(Direction::Ascending, &[1.0, 2.0]));
        record.direction = 7;
        assert_eq!(
            GroundTrackProfile::try_from(&record),
            Err(ProfileError::UnknownDirection(7))
        );
    }

    #[test]
    fn test_column_length_mismatch_rejected() {
        let mut record = ProfileRecord::from(&synthetic(Direction::Ascending, &[1.0, 2.0, 3.0]));
        record.tide_ocean.pop();
        assert_eq!(
            GroundTrackProfile::try_from(&record),
            Err(ProfileError::LengthMismatch {
                field: "tide_ocean",
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_unknown_mask_rejected() {
        let mut record = ProfileRecord::from(&synthetic(Direction::Ascending, &[1.0, 2.0, 3.0]));
        record.mask[1] = 9;
        assert_eq!(
            GroundTrackProfile::try_from(&record),
            Err(ProfileError::UnknownMask { index: 1, code: 9 })
        );
    }

    #[test]
    fn test_non_finite_time_rejected() {
        let mut record = ProfileRecord::from(&synthetic(Direction::Ascending, &[1.0, 2.0, 3.0]));
        record.delta_time[2] = f64::NAN;
        assert_eq!(
            GroundTrackProfile::try_from(&record),
            Err(ProfileError::NonFiniteTime(2))
        );
    }

    #[test]
    fn test_record_json_fields() {
        let record = ProfileRecord::from(&synthetic(Direction::Descending, &[1.0]));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["beam"], "gt1l");
        assert_eq!(json["strength"], "strong");
        assert_eq!(json["direction"], 2);
        let parsed: ProfileRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }
}
