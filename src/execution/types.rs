use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::market::types::{Market, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
        })
    }
}

/// What the user wants to do. Price and notional are read off the market
/// at execution time, never carried on the intent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    pub action: Action,
    pub side: Side,
    pub size: f64,
}

impl OrderIntent {
    pub fn new(action: Action, side: Side, size: f64) -> Self {
        Self { action, side, size }
    }

    pub fn price(&self, market: &Market) -> f64 {
        market.price(self.side)
    }

    pub fn notional(&self, market: &Market) -> f64 {
        self.size * self.price(market)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub cash: f64,
    pub shares_yes: f64,
    pub shares_no: f64,
}

impl Account {
    pub fn new(cash: f64) -> Self {
        Self {
            cash,
            shares_yes: 0.0,
            shares_no: 0.0,
        }
    }

    pub fn position(&self, side: Side) -> f64 {
        match side {
            Side::Yes => self.shares_yes,
            Side::No => self.shares_no,
        }
    }

    pub(crate) fn position_mut(&mut self, side: Side) -> &mut f64 {
        match side {
            Side::Yes => &mut self.shares_yes,
            Side::No => &mut self.shares_no,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub market: String,
    pub action: Action,
    pub side: Side,
    pub size: f64,
    pub price: f64,
    pub notional: f64,
    pub yes_before: f64,
    pub yes_after: f64,
    pub cash_after: f64,
    pub timestamp: DateTime<Utc>,
}
