//! Quantity Parsers
//!
//! Normalizes the page's compact market-cap notation ("12.5k") and free-form
//! relative-age phrases ("3 minutes ago") into numbers. Both parsers are total:
//! malformed input falls back to a conservative default instead of erroring,
//! so downstream classification never has to handle a parse failure. The
//! defaults bias toward "not special" - a garbage cap reads as 1k and a
//! garbage age reads as a full day old.

/// Default market cap when the text cannot be parsed (1k, not 0, so ratio
/// computations downstream never divide by zero).
pub const DEFAULT_MARKET_CAP: f64 = 1_000.0;

/// Default age when the phrase is unrecognized: a full day, which suppresses
/// any "new token" classification for unparseable input.
pub const DEFAULT_AGE_MINUTES: u64 = 1_440;

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 1_440;

/// Parse a market-cap text token into a numeric USD value.
///
/// A trailing `k` multiplies the prefix by 1000; anything else is parsed as a
/// plain float. If the result comes out suspiciously low (< 100) for a
/// k-suffixed input, the suffix correction is re-applied - a best-effort
/// guard against a lost multiplier, not a general fix.
pub fn parse_market_cap(text: &str) -> f64 {
    let clean = text.trim().to_lowercase();

    let parsed = if let Some(prefix) = clean.strip_suffix('k') {
        prefix.trim().parse::<f64>().map(|v| v * 1_000.0)
    } else {
        clean.parse::<f64>()
    };

    let mut value = match parsed {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!(input = %text, "unparseable market cap, using default");
            return DEFAULT_MARKET_CAP;
        }
    };

    if value < 100.0 {
        tracing::warn!(input = %text, value, "suspiciously low market cap value");
        if let Some(prefix) = clean.strip_suffix('k') {
            if let Ok(base) = prefix.trim().parse::<f64>() {
                value = base * 1_000.0;
            }
        }
    }

    value
}

/// Parse a relative-age phrase into whole minutes.
///
/// Recognizes the article forms the page uses ("a minute ago", "an hour ago",
/// "a day ago") and the counted forms ("5 minutes ago", "2 hours ago",
/// "3 days ago"). Anything else yields [`DEFAULT_AGE_MINUTES`].
pub fn parse_age_minutes(text: &str) -> u64 {
    let clean = text.trim().to_lowercase();

    match clean.as_str() {
        "a minute ago" => return 1,
        "an hour ago" => return MINUTES_PER_HOUR,
        "a day ago" => return MINUTES_PER_DAY,
        _ => {}
    }

    let unit_multiplier = if clean.contains("minute ago") || clean.contains("minutes ago") {
        1
    } else if clean.contains("hour ago") || clean.contains("hours ago") {
        MINUTES_PER_HOUR
    } else if clean.contains("day") {
        MINUTES_PER_DAY
    } else {
        tracing::debug!(input = %text, "unknown age format, using max age");
        return DEFAULT_AGE_MINUTES;
    };

    match clean.split_whitespace().next().and_then(|n| n.parse::<u64>().ok()) {
        Some(count) => count * unit_multiplier,
        None => {
            tracing::warn!(input = %text, "unparseable age count, using max age");
            DEFAULT_AGE_MINUTES
        }
    }
}
