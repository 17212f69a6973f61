use serde::Serialize;
use crate::market::hash::hash01;
use crate::market::types::{Market, Side};

pub const LIQUIDITY_USD: f64 = 56_488.0;
pub const END_DATE_LABEL: &str = "Dec 31, 2025";

const BASE_VOLUME: f64 = 182_450.0;
const VOLUME_PER_PROBABILITY: f64 = 50_000.0;

pub const SUGGESTIONS: [&str; 3] = [
    "Will Anthropic have the best AI model?",
    "Will OpenAI lead in 2026?",
    "Will Google win?",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestedMarket {
    pub title: String,
    pub pct: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeRow {
    pub side: Side,
    pub probability: f64,
    pub volume: f64,
}

/// Synthetic 24h volume. Not an accumulator, just a function of the quote.
pub fn volume_24h(market: &Market) -> f64 {
    BASE_VOLUME + (market.yes_probability() * VOLUME_PER_PROBABILITY).round()
}

pub fn outcome_rows(market: &Market) -> [OutcomeRow; 2] {
    let volume = (volume_24h(market) / 3.0).round();
    [
        OutcomeRow { side: Side::Yes, probability: market.yes_probability(), volume },
        OutcomeRow { side: Side::No, probability: market.no_probability(), volume },
    ]
}

/// Suggested markets quoted in [35%, 70%), stable for a given title
pub fn suggested_markets(title: &str) -> Vec<SuggestedMarket> {
    SUGGESTIONS
        .iter()
        .enumerate()
        .map(|(i, suggestion)| {
            let p = 0.35 + hash01(&format!("{}:{}:{}", title, suggestion, i)) * 0.35;
            SuggestedMarket {
                title: suggestion.to_string(),
                pct: (p * 100.0).round() as u32,
            }
        })
        .collect()
}

pub fn fmt_pct(p: f64) -> String {
    format!("{}%", (p * 100.0).round())
}

pub fn fmt_cents(p: f64) -> String {
    format!("{:.1}¢", p * 100.0)
}

pub fn fmt_usd(n: f64) -> String {
    let cents = (n.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if n < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

pub fn fmt_compact(n: f64) -> String {
    let abs = n.abs();
    if abs >= 1_000_000.0 {
        format!("{:.2}M", n / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        format!("{}", n.round())
    }
}
