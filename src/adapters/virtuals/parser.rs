//! Virtuals.io card extraction.
//!
//! CSS-selector scraping of the listing markup, brittle by construction and
//! specific to this one site. Selectors match on class fragments rather than
//! exact class lists so Tailwind reorderings do not break extraction. A card
//! that cannot be parsed is skipped with a warning; the rest of the page
//! still produces records.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::domain::{AgentToken, Snapshot, NO_DESCRIPTION, UNKNOWN_CREATOR};
use crate::ports::extractor::SnapshotExtractor;

/// Selector-based extractor for the fun.virtuals.io listing page.
pub struct VirtualsParser {
    cards: Selector,
    inner: Selector,
    name: Selector,
    symbol: Selector,
    market_cap: Selector,
    market_cap_value: Selector,
    creator: Selector,
    age: Selector,
    description: Selector,
}

impl Default for VirtualsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualsParser {
    pub fn new() -> Self {
        // Static selectors, parse cannot fail
        let parse = |s: &str| Selector::parse(s).expect("static selector");

        Self {
            cards: parse(r#"a[href^="/agents/"]"#),
            inner: parse(r#"div[class*="flex flex-col w-full"]"#),
            name: parse(r#"div[class*="bg-[#44BCC3]"] p[class*="text-white"][class*="text-lg"]"#),
            symbol: parse(r#"div[class*="bg-[#44BCC3]"] p[class*="text-white/50"]"#),
            market_cap: parse(r#"p[class*="text-[#00FFA3]"]"#),
            market_cap_value: parse(r#"span[class*="text-lg"]"#),
            creator: parse(r#"a[href*="/profile/"] p[class*="text-[#FCE94B]"][class*="text-lg"]"#),
            age: parse(r#"p[class*="text-[#FCE94B]"][class*="text-sm"]"#),
            description: parse(r#"p[class*="text-[#A0CFCB]"]"#),
        }
    }

    fn text_of(element: ElementRef<'_>) -> String {
        element.text().collect::<String>().trim().to_string()
    }

    /// Parse one card into a record. Name, symbol and market cap are
    /// required; creator, age and description degrade to sentinels.
    fn parse_card(&self, card: ElementRef<'_>) -> Option<AgentToken> {
        let inner = card.select(&self.inner).next()?;

        let name = inner.select(&self.name).next().map(Self::text_of)?;
        if name.is_empty() {
            return None;
        }

        let symbol = inner
            .select(&self.symbol)
            .next()
            .map(Self::text_of)?
            .replace(['(', ')'], "")
            .trim()
            .to_string();

        let market_cap = inner
            .select(&self.market_cap)
            .next()
            .and_then(|p| p.select(&self.market_cap_value).next())
            .map(Self::text_of)?;

        let creator = inner
            .select(&self.creator)
            .next()
            .map(Self::text_of)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_CREATOR.to_string());

        // The age label is the last small yellow paragraph on the card
        let age_text = inner
            .select(&self.age)
            .last()
            .map(Self::text_of)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        let description = inner
            .select(&self.description)
            .next()
            .map(Self::text_of)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        Some(AgentToken {
            name,
            symbol,
            market_cap,
            creator,
            age_text,
            description,
        })
    }
}

impl SnapshotExtractor for VirtualsParser {
    fn extract(&self, html: &str) -> Snapshot {
        let document = Html::parse_document(html);
        let mut snapshot = Snapshot::new();

        for card in document.select(&self.cards) {
            match self.parse_card(card) {
                Some(token) => {
                    debug!(name = %token.name, "parsed agent card");
                    snapshot.insert(token);
                }
                None => {
                    warn!("skipping agent card with missing required fields");
                }
            }
        }

        if snapshot.is_empty() {
            warn!("no agent cards found in page content");
        }
        snapshot
    }
}
