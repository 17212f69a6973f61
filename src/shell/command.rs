use anyhow::Result;
use regex::Regex;
use crate::execution::types::Action;
use crate::market::types::Side;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Set the ticket and submit it in one go. `side` falls back to the
    /// ticket's current side.
    Order { action: Action, side: Option<Side>, size: f64 },
    SetAction(Action),
    SetSide(Side),
    SetSize(f64),
    TopUp(f64),
    Max,
    Submit,
    Quote,
    Suggest,
    Tools,
    Time,
    Echo(String),
    Help,
    Quit,
    Unknown(String),
}

pub struct CommandParser {
    order: Regex,
    side: Regex,
    action: Regex,
    size: Regex,
    top_up: Regex,
}

const NUMBER: &str = r"(\d+(?:\.\d+)?|\.\d+)";

impl CommandParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            order: Regex::new(&format!(r"(?i)^(buy|sell)(?:\s+(yes|no))?\s+{}$", NUMBER))?,
            side: Regex::new(r"(?i)^side\s+(yes|no)$")?,
            action: Regex::new(r"(?i)^action\s+(buy|sell)$")?,
            size: Regex::new(&format!(r"(?i)^size\s+{}$", NUMBER))?,
            top_up: Regex::new(&format!(r"(?i)^(?:topup\s+|\+)\$?{}$", NUMBER))?,
        })
    }

    pub fn parse(&self, line: &str) -> Command {
        let trimmed = line.trim();

        if let Some(cap) = self.order.captures(trimmed) {
            let side = cap.get(2).map(|m| parse_side(m.as_str()));
            if let Ok(size) = cap[3].parse::<f64>() {
                return Command::Order { action: parse_action(&cap[1]), side, size };
            }
        }
        if let Some(cap) = self.side.captures(trimmed) {
            return Command::SetSide(parse_side(&cap[1]));
        }
        if let Some(cap) = self.action.captures(trimmed) {
            return Command::SetAction(parse_action(&cap[1]));
        }
        if let Some(cap) = self.size.captures(trimmed) {
            if let Ok(size) = cap[1].parse::<f64>() {
                return Command::SetSize(size);
            }
        }
        if let Some(cap) = self.top_up.captures(trimmed) {
            if let Ok(dollars) = cap[1].parse::<f64>() {
                return Command::TopUp(dollars);
            }
        }
        if let Some(prefix) = trimmed.get(..5) {
            if prefix.eq_ignore_ascii_case("echo ") {
                return Command::Echo(trimmed[5..].to_string());
            }
        }

        match trimmed.to_lowercase().as_str() {
            "max" => Command::Max,
            "submit" | "go" => Command::Submit,
            "quote" | "state" | "" => Command::Quote,
            "suggest" | "suggestions" => Command::Suggest,
            "tools" | "list tools" => Command::Tools,
            "time" | "now" | "what time is it" => Command::Time,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

fn parse_side(s: &str) -> Side {
    if s.eq_ignore_ascii_case("yes") { Side::Yes } else { Side::No }
}

fn parse_action(s: &str) -> Action {
    if s.eq_ignore_ascii_case("buy") { Action::Buy } else { Action::Sell }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        CommandParser::new().unwrap().parse(line)
    }

    #[test]
    fn test_parse_orders() {
        assert_eq!(
            parse("buy yes 50"),
            Command::Order { action: Action::Buy, side: Some(Side::Yes), size: 50.0 }
        );
        assert_eq!(
            parse("  SELL No 12.5 "),
            Command::Order { action: Action::Sell, side: Some(Side::No), size: 12.5 }
        );
        assert_eq!(
            parse("buy 10"),
            Command::Order { action: Action::Buy, side: None, size: 10.0 }
        );
    }

    #[test]
    fn test_parse_ticket_edits() {
        assert_eq!(parse("side no"), Command::SetSide(Side::No));
        assert_eq!(parse("action sell"), Command::SetAction(Action::Sell));
        assert_eq!(parse("size 120"), Command::SetSize(120.0));
        assert_eq!(parse("topup 20"), Command::TopUp(20.0));
        assert_eq!(parse("+$100"), Command::TopUp(100.0));
        assert_eq!(parse("max"), Command::Max);
        assert_eq!(parse("submit"), Command::Submit);
    }

    #[test]
    fn test_parse_chat_commands() {
        assert_eq!(parse("list tools"), Command::Tools);
        assert_eq!(parse("What time is it"), Command::Time);
        assert_eq!(parse("echo Hello There"), Command::Echo("Hello There".to_string()));
        assert_eq!(parse(""), Command::Quote);
        assert_eq!(parse("exit"), Command::Quit);
    }

    #[test]
    fn test_malformed_is_unknown() {
        // Negative sizes never parse as orders
        assert_eq!(parse("buy yes -5"), Command::Unknown("buy yes -5".to_string()));
        assert_eq!(parse("sell maybe 5"), Command::Unknown("sell maybe 5".to_string()));
    }
}
