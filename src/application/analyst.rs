//! AI token analysis.
//!
//! Builds the analysis prompt for a token, calls the narrative generator,
//! and enforces that the returned text carries the locally computed rating
//! glyph. The rating is decided here, never by the model; the model only
//! writes prose around it. Analysis never fails outward: when the generator
//! misbehaves the caller still gets a usable string.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::{classify, parse_age_minutes, parse_market_cap, AgentToken};
use crate::ports::narrative::NarrativeGenerator;

/// Produces rating-anchored narratives for individual tokens.
#[derive(Clone)]
pub struct TokenAnalyst {
    narrative: Arc<dyn NarrativeGenerator>,
    max_attempts: u32,
}

impl TokenAnalyst {
    pub fn new(narrative: Arc<dyn NarrativeGenerator>) -> Self {
        Self {
            narrative,
            max_attempts: 3,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    fn build_prompt(token: &AgentToken, cap_value: f64, age_minutes: u64, glyph: &str) -> String {
        format!(
            "Analyze this virtuals.io AI agent token and provide a brief, clear explanation:\n\
             \n\
             Name: {name}\n\
             Symbol: {symbol}\n\
             Market Cap: {cap_text} ({cap_value:.0})\n\
             Age: {age_minutes} minutes\n\
             Creator: {creator}\n\
             Time Created: {age_text}\n\
             Description: {description}\n\
             \n\
             Rating Rules Applied:\n\
             - Market Cap: {cap_value:.0}\n\
             - Age: {age_minutes} minutes\n\
             - Assigned Rating: {glyph}\n\
             \n\
             You MUST use this exact rating in your analysis: {glyph}\n\
             \n\
             Format your response with the rating at the start:\n\
             {glyph}\n\
             \n\
             1. Risk: (brief risk assessment)\n\
             2. Potential: (growth potential analysis)\n\
             3. Verdict: (final recommendation including the exact rating emoji: {glyph})",
            name = token.name,
            symbol = token.symbol,
            cap_text = token.market_cap,
            cap_value = cap_value,
            age_minutes = age_minutes,
            creator = token.creator,
            age_text = token.age_text,
            description = token.description,
            glyph = glyph,
        )
    }

    /// Analyze one token. The returned text always contains the rating glyph.
    pub async fn analyze(&self, token: &AgentToken) -> String {
        let cap_value = parse_market_cap(&token.market_cap);
        let age_minutes = parse_age_minutes(&token.age_text);
        let glyph = classify(cap_value, age_minutes).glyph();

        debug!(
            name = %token.name,
            market_cap = cap_value,
            age_minutes,
            rating = glyph,
            "rating computed for analysis"
        );

        let system = format!(
            "You are a crypto analyst. You MUST use exactly this rating emoji in your analysis: {glyph}"
        );
        let prompt = Self::build_prompt(token, cap_value, age_minutes, glyph);

        let mut last_reply: Option<String> = None;
        for attempt in 1..=self.max_attempts {
            match self.narrative.generate(&system, &prompt).await {
                Ok(reply) => {
                    if reply.contains(glyph) {
                        debug!(name = %token.name, rating = glyph, "analysis generated");
                        return reply;
                    }
                    warn!(
                        name = %token.name,
                        attempt,
                        max_attempts = self.max_attempts,
                        "analysis missing rating emoji, retrying"
                    );
                    last_reply = Some(reply);
                }
                Err(e) => {
                    error!(name = %token.name, error = %e, "narrative generation failed");
                    return format!("{glyph} Analysis unavailable");
                }
            }
        }

        // Every attempt came back without the glyph; anchor it ourselves.
        match last_reply {
            Some(reply) => format!("{glyph}\n\nRating: {glyph}\n{reply}"),
            None => format!("{glyph} Analysis unavailable"),
        }
    }
}
