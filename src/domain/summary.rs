//! Market Summarizer
//!
//! Aggregates a snapshot into per-cycle market statistics: positive-rating
//! tallies over the most recent records, a qualitative status line, the list
//! of promising tokens and the top ten by market cap. Recomputed in full on
//! every cycle, never diffed incrementally.

use super::quantity::{parse_age_minutes, parse_market_cap};
use super::rating::{classify, display_glyph, Rating, GOOD_CAP};
use super::token::{AgentToken, Snapshot};

/// Description truncation applied to promising-token entries.
const DESCRIPTION_MAX_CHARS: usize = 100;
/// Size of the top-by-market-cap list.
const TOP_CAP_LIMIT: usize = 10;

/// A promising token (rating Hot, Good or DecentNew) from the recent window.
#[derive(Debug, Clone, PartialEq)]
pub struct PromisingToken {
    pub name: String,
    pub symbol: String,
    pub market_cap: String,
    pub age_text: String,
    pub rating: Rating,
    /// Description capped at 100 characters
    pub description: String,
}

/// One row of the top-by-market-cap list.
#[derive(Debug, Clone, PartialEq)]
pub struct TopCapEntry {
    pub name: String,
    pub symbol: String,
    /// Raw page text, e.g. "56.2k"
    pub market_cap: String,
    /// Parsed numeric value
    pub market_cap_value: f64,
    /// Display glyph including the very-new refinement
    pub glyph: String,
    pub age_text: String,
}

/// Derived, transient aggregate over one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSummary {
    /// How many recent records the window covers
    pub recent_limit: usize,
    /// Records actually analyzed (<= recent_limit)
    pub total: usize,
    /// Positive ratings (Hot, Good, DecentNew) in the window
    pub positive_count: usize,
    /// positive_count / total
    pub avg_positive: f64,
    /// Hot or Good ratings in the window
    pub high_potential_count: usize,
    /// high_potential_count / total, as a percentage
    pub high_potential_pct: f64,
    /// Minutes-old records with cap >= 7k in the window
    pub new_promising_count: usize,
    /// Qualitative status phrases, joined with " | "
    pub status: String,
    pub promising: Vec<PromisingToken>,
    /// Top records by numeric cap over the whole snapshot
    pub top_by_cap: Vec<TopCapEntry>,
}

/// Summarize a snapshot, bounding the statistics window to the `recent_limit`
/// most recent records.
///
/// "Most recent" is a descending string sort on the raw age text. That is a
/// lexicographic ordering of free-form phrases, not a chronological one; it is
/// preserved deliberately for parity with observed behavior (see DESIGN.md).
pub fn summarize(snapshot: &Snapshot, recent_limit: usize) -> MarketSummary {
    let mut recent: Vec<&AgentToken> = snapshot.iter().collect();
    recent.sort_by(|a, b| b.age_text.cmp(&a.age_text));
    recent.truncate(recent_limit);

    let total = recent.len();
    let mut positive_count = 0usize;
    let mut high_potential_count = 0usize;
    let mut promising = Vec::new();

    for token in &recent {
        let cap = parse_market_cap(&token.market_cap);
        let age = parse_age_minutes(&token.age_text);
        let rating = classify(cap, age);

        if rating.is_high_potential() {
            positive_count += 1;
            high_potential_count += 1;
        } else if rating == Rating::DecentNew {
            positive_count += 1;
        }

        if rating.is_positive() {
            promising.push(PromisingToken {
                name: token.name.clone(),
                symbol: token.symbol.clone(),
                market_cap: token.market_cap.clone(),
                age_text: token.age_text.clone(),
                rating,
                description: token.truncated_description(DESCRIPTION_MAX_CHARS),
            });
        }
    }

    // Fresh launches that already cleared the Good cap threshold. The age
    // check is a substring match on the raw phrase, so hour- and day-old
    // records never qualify.
    let new_promising_count = recent
        .iter()
        .filter(|t| {
            t.age_text.contains("minutes ago") && parse_market_cap(&t.market_cap) >= GOOD_CAP
        })
        .count();

    let avg_positive = if total > 0 {
        positive_count as f64 / total as f64
    } else {
        0.0
    };
    let high_potential_pct = if total > 0 {
        high_potential_count as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    // An empty window reads as neutral, not cold - there is no activity to judge
    let status = if total == 0 {
        format!("{} NEUTRAL - Average market activity", Rating::Neutral.glyph())
    } else {
        market_status(avg_positive, high_potential_pct, new_promising_count)
    };

    // Top list ranks the whole snapshot, not just the recent window
    let mut by_cap: Vec<&AgentToken> = snapshot.iter().collect();
    by_cap.sort_by(|a, b| {
        parse_market_cap(&b.market_cap).total_cmp(&parse_market_cap(&a.market_cap))
    });
    let top_by_cap = by_cap
        .into_iter()
        .take(TOP_CAP_LIMIT)
        .map(|token| {
            let value = parse_market_cap(&token.market_cap);
            let age = parse_age_minutes(&token.age_text);
            TopCapEntry {
                name: token.name.clone(),
                symbol: token.symbol.clone(),
                market_cap: token.market_cap.clone(),
                market_cap_value: value,
                glyph: display_glyph(value, age),
                age_text: token.age_text.clone(),
            }
        })
        .collect();

    MarketSummary {
        recent_limit,
        total,
        positive_count,
        avg_positive,
        high_potential_count,
        high_potential_pct,
        new_promising_count,
        status,
        promising,
        top_by_cap,
    }
}

/// Qualitative market status from three independent metrics.
///
/// Every matching phrase is appended - the labels are not mutually exclusive,
/// a market can read HOT and GROWING at once. Only when nothing matches does
/// the single neutral phrase appear.
pub fn market_status(
    avg_positive: f64,
    high_potential_pct: f64,
    new_promising_count: usize,
) -> String {
    let mut status = Vec::new();

    if avg_positive > 1.5 && high_potential_pct > 50.0 {
        status.push(format!(
            "{} HOT - High activity with many promising agents",
            Rating::Hot.glyph()
        ));
    }
    if new_promising_count >= 2 {
        status.push("\u{1F331} GROWING - New promising agents appearing".to_string());
    }
    if avg_positive > 0.5 || high_potential_pct > 30.0 {
        status.push("\u{1F4C8} ACTIVE - Good number of potential opportunities".to_string());
    }
    if avg_positive < 0.2 && high_potential_pct < 20.0 {
        status.push("\u{1F976} COLD - Very limited activity".to_string());
    }
    if status.is_empty() {
        status.push(format!(
            "{} NEUTRAL - Average market activity",
            Rating::Neutral.glyph()
        ));
    }

    status.join(" | ")
}

impl MarketSummary {
    /// Render the full human-readable summary block.
    pub fn render(&self) -> String {
        let mut out = format!(
            "=== Market Summary (Last {} Agents) ===\n\
             Recent Agents Analyzed: {}\n\
             Total Positive Ratings: {} (Average: {:.2} per agent)\n\
             High Potential Agents: {} ({:.1}%)\n\
             New Promising Coins: {}\n\
             \n\
             Market Status: {}\n\
             \n\
             \u{1F31F} PROMISING TOKENS \u{1F31F}\n",
            self.recent_limit,
            self.total,
            self.positive_count,
            self.avg_positive,
            self.high_potential_count,
            self.high_potential_pct,
            self.new_promising_count,
            self.status,
        );

        if self.promising.is_empty() {
            out.push_str("\nNo highly promising tokens found in recent analysis.\n");
        } else {
            for token in &self.promising {
                out.push_str(&format!(
                    "\n{}\n\
                     Name: {} ({})\n\
                     Market Cap: {}\n\
                     Time Created: {}\n\
                     Rating: {}\n\
                     \n\
                     Description:\n{}\n",
                    "-".repeat(50),
                    token.name,
                    token.symbol,
                    token.market_cap,
                    token.age_text,
                    token.rating.glyph(),
                    token.description,
                ));
            }
        }

        out.push_str(&format!(
            "{}\n\u{1F4CA} Top Market Cap Tokens (by USD value):\n",
            "-".repeat(50)
        ));
        for entry in &self.top_by_cap {
            out.push_str(&format!(
                "- {} ({}) - {} (${}) - {} - {}\n",
                entry.name,
                entry.symbol,
                entry.market_cap,
                format_usd(entry.market_cap_value),
                entry.glyph,
                entry.age_text,
            ));
        }

        out
    }
}

/// Format a USD value with comma grouping and no decimals, e.g. 56200 -> "56,200".
fn format_usd(value: f64) -> String {
    let whole = value.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
