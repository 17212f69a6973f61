use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::config::SessionConfig;
use crate::execution::engine::OrderEngine;
use crate::execution::sizing::OrderSizer;
use crate::execution::types::{Account, Action, Fill, OrderIntent};
use crate::execution::validation::OrderRejection;
use crate::market::display::{self, OutcomeRow, SuggestedMarket};
use crate::market::types::{Market, Side};

/// One user's simulation: the market, their account, and the order ticket
/// they are currently editing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub market: Market,
    pub account: Account,
    pub ticket: OrderIntent,
}

/// Everything a renderer needs, recomputed from state on each read.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub title: String,
    pub yes_probability: f64,
    pub no_probability: f64,
    pub volume_24h: f64,
    pub outcomes: [OutcomeRow; 2],
    pub liquidity: f64,
    pub ends: String,
    pub cash: f64,
    pub shares_yes: f64,
    pub shares_no: f64,
    pub ticket: OrderIntent,
    pub price: f64,
    pub notional: f64,
    pub disabled: bool,
    pub button_label: String,
    pub suggested: Vec<SuggestedMarket>,
}

impl Session {
    pub fn new(title: impl Into<String>, config: &SessionConfig) -> Self {
        Self {
            market: Market::new(title, config.initial_yes_probability),
            account: Account::new(config.initial_cash),
            ticket: OrderIntent::new(Action::Buy, Side::Yes, config.initial_order_size),
        }
    }

    pub fn set_action(&mut self, action: Action) {
        self.ticket.action = action;
    }

    pub fn set_side(&mut self, side: Side) {
        self.ticket.side = side;
    }

    pub fn set_size(&mut self, size: f64) {
        self.ticket.size = size;
    }

    pub fn ticket_price(&self) -> f64 {
        self.ticket.price(&self.market)
    }

    pub fn top_up(&mut self, sizer: &OrderSizer, dollars: f64) {
        self.ticket.size = sizer.top_up(self.ticket.size, dollars, self.ticket_price());
    }

    pub fn max_size(&mut self, sizer: &OrderSizer) {
        self.ticket.size = sizer.max_affordable(self.account.cash, self.ticket_price());
    }

    /// Submit the current ticket.
    pub fn submit(&mut self, engine: &OrderEngine, now: DateTime<Utc>) -> Result<Fill, OrderRejection> {
        let ticket = self.ticket;
        self.place_order(engine, &ticket, now)
    }

    /// Run `intent` through the engine and commit the result. A rejection
    /// leaves the session untouched.
    pub fn place_order(
        &mut self,
        engine: &OrderEngine,
        intent: &OrderIntent,
        now: DateTime<Utc>,
    ) -> Result<Fill, OrderRejection> {
        let execution = engine.place_order(intent, &self.market, &self.account, now)?;
        self.market = execution.market;
        self.account = execution.account;
        Ok(execution.fill)
    }

    pub fn snapshot(&self, engine: &OrderEngine) -> SessionSnapshot {
        let disabled = engine
            .validator()
            .is_disabled(&self.ticket, &self.market, &self.account);
        let button_label = if disabled {
            "Unavailable".to_string()
        } else {
            format!("{} {}", self.ticket.action, self.ticket.side)
        };

        SessionSnapshot {
            title: self.market.title().to_string(),
            yes_probability: self.market.yes_probability(),
            no_probability: self.market.no_probability(),
            volume_24h: display::volume_24h(&self.market),
            outcomes: display::outcome_rows(&self.market),
            liquidity: display::LIQUIDITY_USD,
            ends: display::END_DATE_LABEL.to_string(),
            cash: self.account.cash,
            shares_yes: self.account.shares_yes,
            shares_no: self.account.shares_no,
            ticket: self.ticket,
            price: self.ticket_price(),
            notional: self.ticket.notional(&self.market),
            disabled,
            button_label,
            suggested: display::suggested_markets(self.market.title()),
        }
    }
}
