use chrono::{DateTime, Utc};
use crate::execution::types::Fill;
use crate::execution::validation::OrderRejection;
use crate::market::display::{fmt_cents, fmt_compact, fmt_pct, fmt_usd, SuggestedMarket};
use crate::session::state::SessionSnapshot;
use crate::tool::launch::ToolDescriptor;

pub const HELP: &str = "Commands: buy|sell [yes|no] <shares>, side yes|no, action buy|sell, \
size <shares>, topup <dollars>, max, submit, quote, suggest, list tools, time, echo <text>, quit";

pub fn quote(snap: &SessionSnapshot) -> String {
    let mut lines = vec![
        snap.title.clone(),
        format!(
            "Vol {} | Liquidity {} | Ends {}",
            fmt_compact(snap.volume_24h),
            fmt_usd(snap.liquidity),
            snap.ends
        ),
    ];
    lines.extend(snap.outcomes.iter().map(|row| {
        format!(
            "  {:<3} {:>4}  Buy {} {}  (Vol {})",
            row.side,
            fmt_pct(row.probability),
            row.side,
            fmt_cents(row.probability),
            fmt_compact(row.volume)
        )
    }));
    lines.extend([
        format!(
            "Balance {} | Position {:.1} YES / {:.1} NO",
            fmt_usd(snap.cash),
            snap.shares_yes,
            snap.shares_no
        ),
        format!(
            "Ticket: {} {} {:.1} @ {} = {} [{}]",
            snap.ticket.action,
            snap.ticket.side,
            snap.ticket.size,
            fmt_cents(snap.price),
            fmt_usd(snap.notional),
            snap.button_label
        ),
    ]);
    lines.join("\n")
}

pub fn fill(fill: &Fill) -> String {
    format!(
        "Filled {} {} {:.1} @ {} for {}. YES now {}. Balance {}",
        fill.action,
        fill.side,
        fill.size,
        fmt_cents(fill.price),
        fmt_usd(fill.notional),
        fmt_pct(fill.yes_after),
        fmt_usd(fill.cash_after)
    )
}

pub fn rejection(rejection: &OrderRejection) -> String {
    format!("Unavailable: {}", rejection)
}

pub fn suggestions(markets: &[SuggestedMarket]) -> String {
    markets
        .iter()
        .map(|m| format!("  {:>3}%  {}", m.pct, m.title))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn tools(descriptors: &[ToolDescriptor]) -> String {
    descriptors
        .iter()
        .map(|t| format!("  {} - {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn time(now: DateTime<Utc>) -> String {
    format!("Server time: {}", now.to_rfc3339())
}
