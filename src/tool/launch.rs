use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use crate::config::Config;
use crate::session::state::Session;

pub const TOOL_NAME: &str = "demo_widget";
const WIDGET_PATH: &str = "/widgets/market";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub title: String,
    pub description: String,
    pub input_schema: Value,
}

/// Arguments accepted by the tool. Unknown fields are refused.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LaunchInput {
    #[serde(default)]
    pub market: Option<String>,
}

/// Structured payload handed back to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetLaunch {
    pub market: String,
    pub timestamp: DateTime<Utc>,
    pub widget_url: String,
}

#[derive(Debug, Clone)]
pub struct Launch {
    pub text: String,
    pub structured: WidgetLaunch,
    pub session: Session,
}

pub fn tool_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        title: "Open demo market".to_string(),
        description: "Opens a fake prediction-market trading UI (simulated).".to_string(),
        input_schema: json!({
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "market": { "type": "string", "description": "Optional market label" }
            }
        }),
    }
}

/// Trimmed label, or `default` when absent or blank
pub fn normalize_label(label: Option<&str>, default: &str) -> String {
    match label.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        _ => default.to_string(),
    }
}

pub fn widget_url(base_url: &str, label: &str) -> String {
    format!(
        "{}{}?market={}",
        base_url.trim_end_matches('/'),
        WIDGET_PATH,
        urlencoding::encode(label)
    )
}

/// Build a fresh, independent session for `label` and the payload that
/// points the host at it. Pure apart from the supplied clock reading.
pub fn launch(label: Option<&str>, config: &Config, now: DateTime<Utc>) -> Launch {
    let market = normalize_label(label, &config.session.default_title);
    let structured = WidgetLaunch {
        widget_url: widget_url(&config.widget.base_url, &market),
        market: market.clone(),
        timestamp: now,
    };

    Launch {
        text: format!("Opened demo market widget: {}", market),
        session: Session::new(market, &config.session),
        structured,
    }
}

/// Decode raw tool arguments and launch.
pub fn invoke(args: Value, config: &Config, now: DateTime<Utc>) -> Result<Launch> {
    let input: LaunchInput = if args.is_null() {
        LaunchInput::default()
    } else {
        serde_json::from_value(args).context("Invalid arguments for demo_widget")?
    };
    Ok(launch(input.market.as_deref(), config, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label(Some("  Will BTC hit 100k?  "), "d"), "Will BTC hit 100k?");
        assert_eq!(normalize_label(Some("   "), "d"), "d");
        assert_eq!(normalize_label(None, "d"), "d");
    }

    #[test]
    fn test_widget_url() {
        assert_eq!(
            widget_url("http://localhost:3000/", "Will it rain?"),
            "http://localhost:3000/widgets/market?market=Will%20it%20rain%3F"
        );
    }

    #[test]
    fn test_launch_payload() {
        let launch = launch(None, &Config::default(), now());

        assert_eq!(launch.text, "Opened demo market widget: Will it rain in NYC tomorrow?");
        let json = serde_json::to_value(&launch.structured).unwrap();
        assert_eq!(json["market"], "Will it rain in NYC tomorrow?");
        assert_eq!(json["timestamp"], "2025-06-01T12:00:00Z");
        assert!(json["widgetUrl"]
            .as_str()
            .unwrap()
            .starts_with("http://localhost:3000/widgets/market?market=Will%20it%20rain"));
    }

    #[test]
    fn test_each_launch_is_fresh() {
        let config = Config::default();
        let a = launch(Some("Will it snow?"), &config, now());
        let b = launch(Some("Will it snow?"), &config, now());

        assert_eq!(a.session, b.session);
        assert_eq!(a.session.market.title(), "Will it snow?");
        assert!((a.session.account.cash - 1000.0).abs() < 1e-12);
    }

    #[test]
    fn test_invoke_args() {
        let config = Config::default();

        let launch = invoke(json!({ "market": "Will Google win?" }), &config, now()).unwrap();
        assert_eq!(launch.structured.market, "Will Google win?");

        assert!(invoke(Value::Null, &config, now()).is_ok());
        assert!(invoke(json!({}), &config, now()).is_ok());
        assert!(invoke(json!({ "ticker": "X" }), &config, now()).is_err());
        assert!(invoke(json!({ "market": 5 }), &config, now()).is_err());
    }

    #[test]
    fn test_descriptor_schema() {
        let descriptor = serde_json::to_value(tool_descriptor()).unwrap();
        assert_eq!(descriptor["name"], TOOL_NAME);
        assert_eq!(descriptor["inputSchema"]["additionalProperties"], false);
    }
}
