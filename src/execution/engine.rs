use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use crate::config::Config;
use crate::execution::impact::ImpactModel;
use crate::execution::types::{Account, Action, Fill, OrderIntent};
use crate::execution::validation::{OrderRejection, OrderValidator};
use crate::market::types::Market;

/// Result of a committed order: the next market and account state plus
/// the fill record.
#[derive(Debug, Clone, Serialize)]
pub struct Execution {
    pub market: Market,
    pub account: Account,
    pub fill: Fill,
}

#[derive(Debug, Clone, Default)]
pub struct OrderEngine {
    validator: OrderValidator,
    impact: ImpactModel,
}

impl OrderEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            validator: OrderValidator::new(&config.order),
            impact: ImpactModel::new(&config.impact),
        }
    }

    pub fn validator(&self) -> &OrderValidator {
        &self.validator
    }

    /// Validate and execute an order.
    ///
    /// The inputs are never modified. On rejection nothing is produced; on
    /// success the caller gets the next state to commit. The trade executes at
    /// the pre-trade quote, impact only moves later quotes. `now` stamps the
    /// fill.
    pub fn place_order(
        &self,
        intent: &OrderIntent,
        market: &Market,
        account: &Account,
        now: DateTime<Utc>,
    ) -> Result<Execution, OrderRejection> {
        if let Err(rejection) = self.validator.validate(intent, market, account) {
            warn!("Order rejected: {} {} {:.1} - {}", intent.action, intent.side, intent.size, rejection);
            return Err(rejection);
        }

        let price = intent.price(market);
        let notional = intent.size * price;
        let mut next_account = account.clone();

        let signed_shares = match intent.action {
            Action::Buy => {
                next_account.cash -= notional;
                *next_account.position_mut(intent.side) += intent.size;
                intent.size
            }
            Action::Sell => {
                *next_account.position_mut(intent.side) -= intent.size;
                next_account.cash += notional;
                -intent.size
            }
        };

        let next_market = self.impact.apply(signed_shares, intent.side, market);

        info!(
            "Order filled: {} {} {:.1} shares @ {:.3} (notional ${:.2}), YES {:.3} -> {:.3}",
            intent.action,
            intent.side,
            intent.size,
            price,
            notional,
            market.yes_probability(),
            next_market.yes_probability()
        );

        let fill = Fill {
            market: market.title().to_string(),
            action: intent.action,
            side: intent.side,
            size: intent.size,
            price,
            notional,
            yes_before: market.yes_probability(),
            yes_after: next_market.yes_probability(),
            cash_after: next_account.cash,
            timestamp: now,
        };

        Ok(Execution {
            market: next_market,
            account: next_account,
            fill,
        })
    }
}
