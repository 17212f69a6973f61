use tracing::debug;
use crate::config::OrderConfig;
use crate::execution::types::{Account, Action, OrderIntent};
use crate::market::types::{Market, Side};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderRejection {
    #[error("Invalid size: {0} (must be greater than zero)")]
    InvalidSize(f64),

    #[error("Size {size:.1} above limit of {limit:.1} shares")]
    SizeAboveLimit { size: f64, limit: f64 },

    #[error("Insufficient funds: need ${needed:.2}, have ${available:.2}")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("Insufficient position: selling {size:.1} {side}, hold {held:.1}")]
    InsufficientPosition { side: Side, size: f64, held: f64 },
}

#[derive(Debug, Clone)]
pub struct OrderValidator {
    max_order_size: Option<f64>,
}

impl OrderValidator {
    pub fn new(config: &OrderConfig) -> Self {
        Self {
            max_order_size: config.max_order_size,
        }
    }

    /// Check an intent against the current quote and account.
    pub fn validate(
        &self,
        intent: &OrderIntent,
        market: &Market,
        account: &Account,
    ) -> Result<(), OrderRejection> {
        // Also catches NaN
        if !(intent.size > 0.0) {
            return Err(OrderRejection::InvalidSize(intent.size));
        }

        if let Some(limit) = self.max_order_size {
            if intent.size > limit {
                return Err(OrderRejection::SizeAboveLimit { size: intent.size, limit });
            }
        }

        match intent.action {
            Action::Buy => {
                let notional = intent.notional(market);
                if account.cash < notional {
                    return Err(OrderRejection::InsufficientFunds {
                        needed: notional,
                        available: account.cash,
                    });
                }
            }
            Action::Sell => {
                let held = account.position(intent.side);
                if held < intent.size {
                    return Err(OrderRejection::InsufficientPosition {
                        side: intent.side,
                        size: intent.size,
                        held,
                    });
                }
            }
        }

        debug!("Order validation passed: {} {} {:.1}", intent.action, intent.side, intent.size);
        Ok(())
    }

    /// Whether the submit button should be greyed out. Advisory only; the
    /// engine validates again on every call.
    pub fn is_disabled(&self, intent: &OrderIntent, market: &Market, account: &Account) -> bool {
        self.validate(intent, market, account).is_err()
    }
}

impl Default for OrderValidator {
    fn default() -> Self {
        Self::new(&OrderConfig::default())
    }
}
