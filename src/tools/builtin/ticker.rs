//! Binance spot ticker price tool
//!
//! Fetches `/api/v3/ticker/price?symbol=` and returns the price both exactly as
//! Binance formatted it and as a number. A price that does not parse to a
//! finite number is treated as a contract violation, not a fallback.

use crate::tools::adapter::{LookupAdapter, LookupTool, RequestContext};
use crate::tools::normalize::str_at;
use crate::tools::shape::{Constraints, FieldKind, FieldSpec, InputShape};
use crate::tools::upstream::{reason_phrase, ticker_price_url, Upstream, BINANCE};
use crate::tools::ToolError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NAME: &str = "binance.ticker_price.get";

pub type TickerTool = LookupTool<TickerAdapter>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TickerArgs {
    pub symbol: String,
}

impl TickerArgs {
    pub fn canonical_symbol(&self) -> String {
        self.symbol.to_uppercase()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerSummary {
    pub symbol: String,
    /// Price string exactly as returned upstream
    pub price: String,
    pub price_num: f64,
    #[serde(rename = "fetchedAt")]
    pub fetched_at: String,
    pub url: String,
}

/// Parse a decimal price string, rejecting non-finite results
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Build the summary from a ticker body (pure function)
pub fn normalize_ticker(
    args: &TickerArgs,
    url: &str,
    body: &Value,
    fetched_at: DateTime<Utc>,
) -> Result<TickerSummary, ToolError> {
    let symbol = args.canonical_symbol();

    let price = str_at(body, &["price"]).ok_or_else(|| {
        ToolError::malformed(
            BINANCE.label,
            format!("missing or non-string price for {symbol}"),
            body.to_string(),
        )
    })?;
    let price_num = parse_price(price).ok_or_else(|| {
        ToolError::malformed(
            BINANCE.label,
            format!("unexpected price format for {symbol}"),
            body.to_string(),
        )
    })?;

    Ok(TickerSummary {
        symbol: str_at(body, &["symbol"]).map(str::to_owned).unwrap_or(symbol),
        price: price.to_string(),
        price_num,
        fetched_at: fetched_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        url: url.to_string(),
    })
}

/// Spot ticker price lookup against Binance
#[derive(Debug, Clone, Copy, Default)]
pub struct TickerAdapter;

impl LookupAdapter for TickerAdapter {
    type Args = TickerArgs;
    type Output = TickerSummary;

    const NAME: &'static str = NAME;
    const DESCRIPTION: &'static str =
        "Fetch the latest price for a Binance spot symbol (e.g. BTCUSDT) from /api/v3/ticker/price.";
    const UPSTREAM: Upstream = BINANCE;
    const SHAPE: InputShape = InputShape {
        fields: &[FieldSpec {
            name: "symbol",
            kind: FieldKind::String,
            required: true,
            default: None,
            constraints: Constraints {
                pattern: Some("^[A-Za-z0-9:_-]+$"),
                pattern_hint: Some("Provide a valid Binance symbol, e.g. BTCUSDT"),
                ..Constraints::IDENTIFIER
            },
            description: "Binance symbol like \"BTCUSDT\", \"ETHUSDT\", etc.",
        }],
    };

    fn request_url(&self, base_url: &str, args: &TickerArgs) -> String {
        ticker_price_url(base_url, &args.symbol)
    }

    fn not_found_message(&self, args: &TickerArgs) -> String {
        format!("No ticker price found for \"{}\".", args.canonical_symbol())
    }

    fn upstream_error_detail(&self, args: &TickerArgs, status: u16) -> Option<String> {
        let symbol = args.canonical_symbol();
        Some(match reason_phrase(status) {
            Some(reason) => format!("{reason} for {symbol}"),
            None => format!("for {symbol}"),
        })
    }

    fn normalize(
        &self,
        args: &TickerArgs,
        ctx: RequestContext<'_>,
        body: &Value,
    ) -> Result<TickerSummary, ToolError> {
        normalize_ticker(args, ctx.url, body, Utc::now())
    }
}
