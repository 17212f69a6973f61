use crate::config::ImpactConfig;
use crate::market::types::{Market, Side};

/// Linear price impact, capped per order and bounded away from 0/1.
#[derive(Debug, Clone)]
pub struct ImpactModel {
    shares_per_unit: f64,
    max_impact: f64,
    floor: f64,
    ceiling: f64,
}

impl ImpactModel {
    pub fn new(config: &ImpactConfig) -> Self {
        Self {
            shares_per_unit: config.shares_per_unit,
            max_impact: config.max_impact,
            floor: config.floor,
            ceiling: config.ceiling,
        }
    }

    /// Move the YES probability after a trade of `signed_shares` on `side`.
    ///
    /// Positive shares are buys, negative are sells. Trading NO moves YES the
    /// opposite way.
    pub fn apply(&self, signed_shares: f64, side: Side, market: &Market) -> Market {
        let impact = (signed_shares / self.shares_per_unit).clamp(-self.max_impact, self.max_impact);
        let delta = match side {
            Side::Yes => impact,
            Side::No => -impact,
        };
        let next_yes = (market.yes_probability() + delta).clamp(self.floor, self.ceiling);
        market.with_yes_probability(next_yes)
    }
}

impl Default for ImpactModel {
    fn default() -> Self {
        Self::new(&ImpactConfig::default())
    }
}
