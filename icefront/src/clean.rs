//! Drops elevations that can't describe floating ice or open water.

use crate::profile::{Mask, Sample};
use log::debug;

/// Returns each sample's elevation, or `None` where the sample lies
/// over grounded ice or carries a quality warning.
///
/// Output is index-aligned with `samples`.
pub fn clean(samples: &[Sample]) -> Vec<Option<f64>> {
    let cleaned: Vec<Option<f64>> = samples
        .iter()
        .map(|sample| match sample {
            Sample {
                mask: Mask::Grounded,
                ..
            } => None,
            Sample { quality, .. } if *quality != 0 => None,
            Sample { h_li, .. } => h_li.filter(|h| h.is_finite()),
        })
        .collect();
    debug!(
        "clean; len: {}, invalid: {}",
        cleaned.len(),
        cleaned.iter().filter(|h| h.is_none()).count()
    );
    cleaned
}

#[cfg(test)]
mod tests {
    use super::clean;
    use crate::{profile::Mask, synthetic, Direction};

    #[test]
    fn test_clean_preserves_order_and_len() {
        let mut profile = synthetic(Direction::Descending, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        profile.samples[1].mask = Mask::Grounded;
        profile.samples[2].quality = 1;
        profile.samples[3].mask = Mask::IceShelf;
        profile.samples[4].h_li = Some(f64::NAN);
        let cleaned = clean(&profile.samples);
        assert_eq!(cleaned, vec![Some(1.0), None, None, Some(4.0), None]);
    }

    #[test]
    fn test_clean_empty() {
        assert!(clean(&[]).is_empty());
    }
}
