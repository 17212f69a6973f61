use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Yes,
    No,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Side::Yes => "YES",
            Side::No => "NO",
        })
    }
}

/// Two-outcome market. Only the YES probability is stored; NO is always
/// derived from it so the pair sums to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MarketRecord")]
pub struct Market {
    title: String,
    yes_probability: f64,
}

#[derive(Deserialize)]
struct MarketRecord {
    title: String,
    yes_probability: f64,
}

impl TryFrom<MarketRecord> for Market {
    type Error = String;

    fn try_from(record: MarketRecord) -> Result<Self, Self::Error> {
        if !(record.yes_probability > 0.0 && record.yes_probability < 1.0) {
            return Err(format!(
                "yes_probability must be strictly between 0 and 1, got {}",
                record.yes_probability
            ));
        }
        Ok(Market::new(record.title, record.yes_probability))
    }
}

impl Market {
    pub fn new(title: impl Into<String>, yes_probability: f64) -> Self {
        Self {
            title: title.into(),
            yes_probability,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn yes_probability(&self) -> f64 {
        self.yes_probability
    }

    pub fn no_probability(&self) -> f64 {
        (1.0 - self.yes_probability).clamp(0.0, 1.0)
    }

    /// Quoted price for one share of `side`
    pub fn price(&self, side: Side) -> f64 {
        match side {
            Side::Yes => self.yes_probability(),
            Side::No => self.no_probability(),
        }
    }

    /// Replace the YES probability. Only the impact simulator calls this.
    pub(crate) fn with_yes_probability(&self, yes_probability: f64) -> Self {
        Self {
            title: self.title.clone(),
            yes_probability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_is_derived() {
        let market = Market::new("Will it rain?", 0.62);
        assert!((market.no_probability() - 0.38).abs() < 1e-12);
        assert!((market.yes_probability() + market.no_probability() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_price_by_side() {
        let market = Market::new("Will it rain?", 0.25);
        assert!((market.price(Side::Yes) - 0.25).abs() < 1e-12);
        assert!((market.price(Side::No) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_checks_probability() {
        let market: Market =
            serde_json::from_str(r#"{"title":"Will it rain?","yes_probability":0.4}"#).unwrap();
        assert_eq!(market, Market::new("Will it rain?", 0.4));

        assert!(serde_json::from_str::<Market>(r#"{"title":"m","yes_probability":1.0}"#).is_err());
        assert!(serde_json::from_str::<Market>(r#"{"title":"m","yes_probability":-0.2}"#).is_err());
    }

    #[test]
    fn test_side_display_pads() {
        assert_eq!(format!("[{:<3}]", Side::No), "[NO ]");
    }

    #[test]
    fn test_side_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Side::Yes).unwrap(), "\"YES\"");
        assert_eq!(serde_json::from_str::<Side>("\"NO\"").unwrap(), Side::No);
    }
}
