//! Wire-level payload shapes for the xAPI commands.
//!
//! These mirror the JSON the server sends: epoch-millisecond integers, coded
//! integers and nullable fields. The domain counterparts with converted
//! timestamps live in [`crate::core::types`]; `conversions` maps between the
//! two.

use crate::core::types::{Period, TradeCommand, TradeStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct LoginArguments {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireServerTime {
    pub time: i64,
    #[serde(rename = "timeString", default)]
    pub time_string: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireCalendar {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub current: String,
    #[serde(default)]
    pub forecast: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub previous: String,
    pub time: i64,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireNews {
    #[serde(default)]
    pub body: String,
    #[serde(rename = "bodylen", default)]
    pub body_length: i64,
    #[serde(default)]
    pub key: String,
    pub time: i64,
    #[serde(rename = "timeString", default)]
    pub time_string: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireSymbol {
    pub ask: f64,
    pub bid: f64,
    #[serde(rename = "categoryName")]
    pub category_name: String,
    #[serde(rename = "contractSize")]
    pub contract_size: i64,
    pub currency: String,
    #[serde(rename = "currencyPair")]
    pub currency_pair: bool,
    #[serde(rename = "currencyProfit")]
    pub currency_profit: String,
    pub description: String,
    /// Null if not applicable.
    pub expiration: Option<i64>,
    #[serde(rename = "groupName")]
    pub group_name: String,
    pub high: f64,
    #[serde(rename = "initialMargin")]
    pub initial_margin: i64,
    #[serde(rename = "instantMaxVolume")]
    pub instant_max_volume: i64,
    pub leverage: f64,
    #[serde(rename = "longOnly")]
    pub long_only: bool,
    #[serde(rename = "lotMax")]
    pub lot_max: f64,
    #[serde(rename = "lotMin")]
    pub lot_min: f64,
    #[serde(rename = "lotStep")]
    pub lot_step: f64,
    pub low: f64,
    #[serde(rename = "marginHedged")]
    pub margin_hedged: i64,
    #[serde(rename = "marginHedgedStrong")]
    pub margin_hedged_strong: bool,
    /// Null if not applicable.
    #[serde(rename = "marginMaintenance")]
    pub margin_maintenance: Option<i64>,
    #[serde(rename = "marginMode")]
    pub margin_mode: i64,
    pub percentage: f64,
    #[serde(rename = "pipsPrecision")]
    pub pips_precision: i64,
    pub precision: i64,
    #[serde(rename = "profitMode")]
    pub profit_mode: i64,
    #[serde(rename = "quoteId")]
    pub quote_id: i64,
    #[serde(rename = "shortSelling")]
    pub short_selling: bool,
    #[serde(rename = "spreadRaw")]
    pub spread_raw: f64,
    #[serde(rename = "spreadTable")]
    pub spread_table: f64,
    /// Null if not applicable.
    pub starting: Option<i64>,
    #[serde(rename = "stepRuleId")]
    pub step_rule_id: i64,
    #[serde(rename = "stopsLevel")]
    pub stops_level: i64,
    #[serde(rename = "swap_rollover3days")]
    pub swap_rollover3days: i64,
    #[serde(rename = "swapEnable")]
    pub swap_enable: bool,
    #[serde(rename = "swapLong")]
    pub swap_long: f64,
    #[serde(rename = "swapShort")]
    pub swap_short: f64,
    #[serde(rename = "swapType")]
    pub swap_type: i64,
    pub symbol: String,
    #[serde(rename = "tickSize")]
    pub tick_size: f64,
    #[serde(rename = "tickValue")]
    pub tick_value: f64,
    pub time: i64,
    #[serde(rename = "timeString")]
    pub time_string: String,
    #[serde(rename = "trailingEnabled")]
    pub trailing_enabled: bool,
    #[serde(rename = "type")]
    pub instrument_type: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireTick {
    pub ask: f64,
    #[serde(rename = "askVolume")]
    pub ask_volume: Option<i64>,
    pub bid: f64,
    #[serde(rename = "bidVolume")]
    pub bid_volume: Option<i64>,
    pub high: f64,
    pub level: i64,
    pub low: f64,
    #[serde(rename = "spreadRaw")]
    pub spread_raw: f64,
    #[serde(rename = "spreadTable")]
    pub spread_table: f64,
    pub symbol: String,
    pub timestamp: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct TickQuotations {
    #[serde(default)]
    pub quotations: Vec<WireTick>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireTrade {
    pub close_price: f64,
    /// Null if the order is not closed.
    pub close_time: Option<i64>,
    #[serde(rename = "close_timeString")]
    pub close_time_string: Option<String>,
    pub closed: bool,
    pub cmd: i64,
    pub comment: String,
    /// Null if not applicable.
    pub commission: Option<f64>,
    #[serde(rename = "customComment")]
    pub custom_comment: String,
    pub digits: i64,
    /// Null if the order is not closed.
    pub expiration: Option<i64>,
    #[serde(rename = "expirationString")]
    pub expiration_string: Option<String>,
    pub margin_rate: f64,
    pub offset: i64,
    pub open_price: f64,
    pub open_time: i64,
    #[serde(rename = "open_timeString")]
    pub open_time_string: String,
    pub order: i64,
    pub order2: i64,
    pub position: i64,
    pub profit: f64,
    pub storage: f64,
    /// Null for deposit/withdrawal operations.
    pub symbol: Option<String>,
    pub timestamp: i64,
    #[serde(rename = "sl")]
    pub stop_loss: f64,
    #[serde(rename = "tp")]
    pub take_profit: f64,
    pub volume: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireCandle {
    pub close: f64,
    #[serde(rename = "ctm")]
    pub start_time: i64,
    #[serde(rename = "ctmString")]
    pub start_time_string: String,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    #[serde(rename = "vol")]
    pub volume: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireChartInfo {
    pub digits: i64,
    #[serde(rename = "exemode")]
    pub execution_mode: i64,
    #[serde(rename = "rateInfos")]
    pub rate_infos: Vec<WireCandle>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireProfitCalculation {
    pub profit: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireTradeTransactionInfo {
    pub cmd: i64,
    #[serde(rename = "customComment")]
    pub custom_comment: String,
    pub expiration: Option<i64>,
    pub offset: i64,
    pub order: i64,
    pub price: f64,
    #[serde(rename = "sl")]
    pub stop_loss: f64,
    pub symbol: String,
    #[serde(rename = "tp")]
    pub take_profit: f64,
    #[serde(rename = "type")]
    pub order_type: i64,
    pub volume: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireTradeTransaction {
    #[serde(rename = "tradeTransInfo", default)]
    pub trade_trans_info: WireTradeTransactionInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireTradeTransactionStatus {
    pub ask: f64,
    pub bid: f64,
    #[serde(rename = "customComment")]
    pub custom_comment: String,
    pub message: Option<String>,
    pub order: i64,
    #[serde(rename = "requestStatus")]
    pub request_status: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireDayInfo {
    pub day: i64,
    /// Milliseconds from midnight CET/CEST.
    #[serde(rename = "fromT")]
    pub from: i64,
    #[serde(rename = "toT")]
    pub to: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireTradingHours {
    pub symbol: String,
    pub quotes: Vec<WireDayInfo>,
    pub trading: Vec<WireDayInfo>,
}

// ---- command argument shapes ----

#[derive(Debug, Serialize)]
pub struct GetSymbolArguments {
    pub symbol: String,
}

#[derive(Debug, Serialize)]
pub struct GetTickPricesArguments {
    pub level: i64,
    pub symbols: Vec<String>,
    /// Only ticks newer than this moment are returned, epoch milliseconds.
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
pub struct GetNewsArguments {
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Serialize)]
pub struct GetTradesArguments {
    #[serde(rename = "openedOnly")]
    pub opened_only: bool,
}

#[derive(Debug, Serialize)]
pub struct GetTradesHistoryArguments {
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Serialize)]
pub struct GetProfitCalculationArguments {
    #[serde(rename = "closePrice")]
    pub close_price: f64,
    #[serde(rename = "cmd")]
    pub command: TradeCommand,
    #[serde(rename = "openPrice")]
    pub open_price: f64,
    pub symbol: String,
    pub volume: f64,
}

#[derive(Debug, Serialize)]
pub struct GetTradeTransactionArguments {
    pub order: i64,
}

#[derive(Debug, Serialize)]
pub struct GetTradingHoursArguments {
    pub symbols: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ChartRangeInfo {
    /// End of the chart block, epoch milliseconds. Ignored when `ticks` is
    /// set.
    pub end: i64,
    pub period: Period,
    pub start: i64,
    pub symbol: String,
    /// Candle count: positive counts forward from `start`, negative counts
    /// back to it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ChartRangeArguments {
    pub info: ChartRangeInfo,
}

#[derive(Debug, Serialize)]
pub struct ChartLastInfo {
    pub period: Period,
    /// Start of the chart block, epoch milliseconds.
    pub start: i64,
    pub symbol: String,
}

#[derive(Debug, Serialize)]
pub struct ChartLastArguments {
    pub info: ChartLastInfo,
}

// ---- streaming push records (experimental channel) ----

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StreamingTick {
    pub ask: f64,
    #[serde(rename = "askVolume")]
    pub ask_volume: Option<i64>,
    pub bid: f64,
    #[serde(rename = "bidVolume")]
    pub bid_volume: Option<i64>,
    pub high: f64,
    pub level: i64,
    pub low: f64,
    #[serde(rename = "quoteId")]
    pub quote_id: i64,
    #[serde(rename = "spreadRaw")]
    pub spread_raw: f64,
    #[serde(rename = "spreadTable")]
    pub spread_table: f64,
    pub symbol: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StreamingBalance {
    pub balance: f64,
    pub credit: f64,
    pub equity: f64,
    pub margin: f64,
    #[serde(rename = "marginFree")]
    pub margin_free: f64,
    #[serde(rename = "marginLevel")]
    pub margin_level: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StreamingCandle {
    pub close: f64,
    #[serde(rename = "ctm")]
    pub start_time: i64,
    #[serde(rename = "ctmString")]
    pub start_time_string: String,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    #[serde(rename = "quoteId")]
    pub quote_id: i64,
    pub symbol: String,
    #[serde(rename = "vol")]
    pub volume: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StreamingNews {
    pub body: String,
    pub key: String,
    pub time: i64,
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamingKeepAlive {
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StreamingTrade {
    pub close_price: f64,
    pub close_time: Option<i64>,
    pub closed: bool,
    pub cmd: i64,
    pub comment: String,
    pub commission: f64,
    #[serde(rename = "customComment")]
    pub custom_comment: String,
    pub digits: i64,
    pub expiration: Option<i64>,
    pub margin_rate: f64,
    pub offset: i64,
    pub open_price: f64,
    pub open_time: i64,
    pub order: i64,
    pub order2: i64,
    pub position: i64,
    pub profit: f64,
    #[serde(rename = "sl")]
    pub stop_loss: f64,
    /// "Modified" or "Deleted"; used for detecting a pending order's
    /// cancellation.
    pub state: String,
    pub storage: f64,
    pub symbol: String,
    #[serde(rename = "tp")]
    pub take_profit: f64,
    #[serde(rename = "type")]
    pub trade_type: i64,
    pub volume: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StreamingProfit {
    pub order: i64,
    pub order2: i64,
    pub position: i64,
    pub profit: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StreamingTradeStatus {
    #[serde(rename = "customComment")]
    pub custom_comment: String,
    pub message: Option<String>,
    pub order: i64,
    pub price: f64,
    #[serde(rename = "requestStatus")]
    pub request_status: i64,
}

impl StreamingTradeStatus {
    /// The coded `requestStatus` as a typed value.
    pub fn status(&self) -> TradeStatus {
        TradeStatus::from_code(self.request_status)
    }
}
