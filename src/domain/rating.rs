//! Rating Classifier
//!
//! Maps (market cap, age) to one of a fixed set of emoji ratings. The rules
//! are evaluated in order and the first match wins - the ranges overlap, so
//! the ordering is load-bearing (a 12k cap that is 5 minutes old must be Hot,
//! not merely Good).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cap threshold above which a token is Hot regardless of age.
pub const HOT_CAP: f64 = 50_000.0;
/// Cap threshold that combines with recency for a Hot rating.
pub const HOT_NEW_CAP: f64 = 10_000.0;
/// Cap threshold for a Good rating on its own.
pub const GOOD_CAP: f64 = 7_000.0;
/// Below this cap an aged token is Dead.
pub const DEAD_CAP: f64 = 5_000.0;
/// A token at most this many minutes old counts as new.
pub const NEW_AGE_MINUTES: u64 = 10;
/// A token at most this many minutes old gets the "very new" display glyph.
pub const VERY_NEW_AGE_MINUTES: u64 = 3;

/// Fixed-category token quality rating.
///
/// `Neutral` is part of the closed set but is currently never produced by
/// [`classify`] - the default bucket returns `Good`, matching observed
/// behavior. Its glyph anchors the neutral market-status phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    /// High cap, or high cap combined with recency
    Hot,
    /// Solid cap, also the default bucket
    Good,
    /// Decent cap and newly created
    DecentNew,
    /// Reserved middle ground, unreached by the classifier today
    Neutral,
    /// Low cap and past the launch window
    Dead,
}

impl Rating {
    /// Display glyph for this rating.
    pub fn glyph(self) -> &'static str {
        match self {
            Rating::Hot => "\u{1F525}",       // fire
            Rating::Good => "\u{1F44D}",      // thumbs up
            Rating::DecentNew => "\u{1F199}", // UP! button
            Rating::Neutral => "\u{1F610}",   // neutral face
            Rating::Dead => "\u{1F480}",      // skull
        }
    }

    /// Hot, Good and DecentNew all count as positive signals.
    pub fn is_positive(self) -> bool {
        matches!(self, Rating::Hot | Rating::Good | Rating::DecentNew)
    }

    /// Only Hot and Good count toward high-potential tallies.
    pub fn is_high_potential(self) -> bool {
        matches!(self, Rating::Hot | Rating::Good)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Classify a token from its numeric market cap and age in minutes.
///
/// Total function, ordered rule chain:
/// 1. cap >= 50k                      -> Hot (cap dominates age entirely)
/// 2. cap >= 10k and age <= 10        -> Hot
/// 3. cap >= 7k                       -> Good
/// 4. cap < 5k and age > 10           -> Dead
/// 5. 5k..7k and age <= 10            -> DecentNew
/// 6. 5k..7k (older)                  -> Good
/// 7. everything else                 -> Good (default bucket)
pub fn classify(market_cap: f64, age_minutes: u64) -> Rating {
    if market_cap >= HOT_CAP {
        Rating::Hot
    } else if market_cap >= HOT_NEW_CAP && age_minutes <= NEW_AGE_MINUTES {
        Rating::Hot
    } else if market_cap >= GOOD_CAP {
        Rating::Good
    } else if market_cap < DEAD_CAP && age_minutes > NEW_AGE_MINUTES {
        Rating::Dead
    } else if (DEAD_CAP..GOOD_CAP).contains(&market_cap) {
        if age_minutes <= NEW_AGE_MINUTES {
            Rating::DecentNew
        } else {
            Rating::Good
        }
    } else {
        Rating::Good
    }
}

/// Display glyph with the "very new good token" refinement.
///
/// A Good token with cap >= 7k that is at most 3 minutes old gets a compound
/// "new + thumbs up" glyph. Purely a presentation concern layered on top of
/// [`classify`], not a sixth rating.
pub fn display_glyph(market_cap: f64, age_minutes: u64) -> String {
    let rating = classify(market_cap, age_minutes);
    if rating == Rating::Good && market_cap >= GOOD_CAP && age_minutes <= VERY_NEW_AGE_MINUTES {
        format!("\u{1F195} {}", Rating::Good.glyph()) // NEW button + thumbs up
    } else {
        rating.glyph().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_cap_dominates_age() {
        assert_eq!(classify(60_000.0, 9_999), Rating::Hot);
        assert_eq!(classify(50_000.0, 0), Rating::Hot);
    }

    #[test]
    fn cap_plus_recency_is_hot() {
        assert_eq!(classify(10_500.0, 5), Rating::Hot);
        assert_eq!(classify(10_000.0, 10), Rating::Hot);
        // Same cap, past the launch window: drops to Good
        assert_eq!(classify(10_500.0, 50), Rating::Good);
    }

    #[test]
    fn good_cap_regardless_of_age() {
        assert_eq!(classify(7_000.0, 10_000), Rating::Good);
        assert_eq!(classify(9_999.0, 5), Rating::Good);
    }

    #[test]
    fn low_cap_old_is_dead() {
        assert_eq!(classify(4_000.0, 20), Rating::Dead);
        assert_eq!(classify(4_999.0, 11), Rating::Dead);
    }

    #[test]
    fn decent_cap_band() {
        assert_eq!(classify(6_000.0, 5), Rating::DecentNew);
        assert_eq!(classify(6_000.0, 20), Rating::Good);
        assert_eq!(classify(5_000.0, 10), Rating::DecentNew);
    }

    #[test]
    fn default_bucket_is_good() {
        // Low cap but still inside the launch window
        assert_eq!(classify(4_000.0, 5), Rating::Good);
        assert_eq!(classify(1_000.0, 0), Rating::Good);
    }

    #[test]
    fn positive_and_high_potential_membership() {
        assert!(Rating::Hot.is_positive());
        assert!(Rating::Good.is_positive());
        assert!(Rating::DecentNew.is_positive());
        assert!(!Rating::Dead.is_positive());
        assert!(!Rating::Neutral.is_positive());

        assert!(Rating::Hot.is_high_potential());
        assert!(Rating::Good.is_high_potential());
        assert!(!Rating::DecentNew.is_high_potential());
    }

    #[test]
    fn very_new_good_compound_glyph() {
        assert_eq!(display_glyph(8_000.0, 2), "\u{1F195} \u{1F44D}");
        assert_eq!(display_glyph(8_000.0, 3), "\u{1F195} \u{1F44D}");
        // Past the very-new window: plain glyph
        assert_eq!(display_glyph(8_000.0, 4), Rating::Good.glyph());
        // Hot stays hot even when very new
        assert_eq!(display_glyph(12_000.0, 2), Rating::Hot.glyph());
        // Default-bucket Good under 7k never gets the compound glyph
        assert_eq!(display_glyph(4_000.0, 2), Rating::Good.glyph());
    }

    #[test]
    fn glyphs_are_distinct() {
        let glyphs = [
            Rating::Hot.glyph(),
            Rating::Good.glyph(),
            Rating::DecentNew.glyph(),
            Rating::Neutral.glyph(),
            Rating::Dead.glyph(),
        ];
        for (i, a) in glyphs.iter().enumerate() {
            for b in &glyphs[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
