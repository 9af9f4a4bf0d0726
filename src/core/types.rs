use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Chart period codes accepted by the chart commands. Values are minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum Period {
    M1 = 1,
    M5 = 5,
    M15 = 15,
    M30 = 30,
    H1 = 60,
    H4 = 240,
    D1 = 1440,
    W1 = 10080,
    Mn1 = 43200,
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(*self as i64)
    }
}

/// Operation codes used both as trade input and in trade records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum TradeCommand {
    Buy = 0,
    Sell = 1,
    BuyLimit = 2,
    SellLimit = 3,
    BuyStop = 4,
    SellStop = 5,
    /// Read only, deposit/withdrawal operations in trade history.
    Balance = 6,
    /// Read only.
    Credit = 7,
}

impl Serialize for TradeCommand {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(*self as i64)
    }
}

/// Request status codes reported for trade transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeStatus {
    Error,
    Pending,
    Accepted,
    Rejected,
    Unknown(i64),
}

impl TradeStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Error,
            2 => Self::Pending,
            3 => Self::Accepted,
            4 => Self::Rejected,
            other => Self::Unknown(other),
        }
    }
}

/// Quote source of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteId {
    Fixed,
    Float,
    Depth,
    Cross,
    Unknown(i64),
}

impl QuoteId {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Fixed,
            2 => Self::Float,
            3 => Self::Depth,
            4 => Self::Cross,
            other => Self::Unknown(other),
        }
    }
}

/// Margin calculation scheme of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginMode {
    Forex,
    CfdLeveraged,
    Cfd,
    Unknown(i64),
}

impl MarginMode {
    pub fn from_code(code: i64) -> Self {
        match code {
            101 => Self::Forex,
            102 => Self::CfdLeveraged,
            103 => Self::Cfd,
            other => Self::Unknown(other),
        }
    }
}

/// Profit calculation scheme of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfitMode {
    Forex,
    Cfd,
    Unknown(i64),
}

impl ProfitMode {
    pub fn from_code(code: i64) -> Self {
        match code {
            5 => Self::Forex,
            6 => Self::Cfd,
            other => Self::Unknown(other),
        }
    }
}

/// Day codes used by the trading hours command, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    Unknown(i64),
}

impl DayOfWeek {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            6 => Self::Saturday,
            7 => Self::Sunday,
            other => Self::Unknown(other),
        }
    }
}

/// Market impact level of a calendar event, sent as a coded string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketImpact {
    Low,
    Medium,
    High,
    Unknown,
}

impl MarketImpact {
    pub fn from_code(code: &str) -> Self {
        match code {
            "1" => Self::Low,
            "2" => Self::Medium,
            "3" => Self::High,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerTime {
    pub time: DateTime<Utc>,
    pub time_string: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub country: String,
    pub current: String,
    pub forecast: String,
    pub impact: MarketImpact,
    pub period: String,
    pub previous: String,
    pub title: String,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    pub body: String,
    pub body_length: i64,
    pub key: String,
    pub title: String,
    pub time_string: String,
    pub time: DateTime<Utc>,
}

/// Instrument description with calendar timestamps. Fields that the server
/// sends as null stay optional; nullable timestamps convert to the epoch zero
/// value instead.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolInfo {
    pub ask: f64,
    pub bid: f64,
    pub category_name: String,
    pub contract_size: i64,
    pub currency: String,
    pub currency_pair: bool,
    pub currency_profit: String,
    pub description: String,
    pub group_name: String,
    pub high: f64,
    pub initial_margin: i64,
    pub instant_max_volume: i64,
    pub leverage: f64,
    pub long_only: bool,
    pub lot_max: f64,
    pub lot_min: f64,
    pub lot_step: f64,
    pub low: f64,
    pub margin_hedged: i64,
    pub margin_hedged_strong: bool,
    pub margin_maintenance: Option<i64>,
    pub margin_mode: MarginMode,
    pub percentage: f64,
    pub pips_precision: i64,
    pub precision: i64,
    pub profit_mode: ProfitMode,
    pub quote_id: QuoteId,
    pub short_selling: bool,
    pub spread_raw: f64,
    pub spread_table: f64,
    pub starting: Option<i64>,
    pub step_rule_id: i64,
    pub stops_level: i64,
    pub swap_rollover3days: i64,
    pub swap_enable: bool,
    pub swap_long: f64,
    pub swap_short: f64,
    pub swap_type: i64,
    pub symbol: String,
    pub tick_size: f64,
    pub tick_value: f64,
    pub time_string: String,
    pub trailing_enabled: bool,
    pub instrument_type: i64,
    pub time: DateTime<Utc>,
    pub expiration: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub ask: f64,
    pub ask_volume: Option<i64>,
    pub bid: f64,
    pub bid_volume: Option<i64>,
    pub high: f64,
    pub level: i64,
    pub low: f64,
    pub spread_raw: f64,
    pub spread_table: f64,
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub close_price: f64,
    pub close_time_string: Option<String>,
    pub closed: bool,
    pub cmd: i64,
    pub comment: String,
    pub commission: Option<f64>,
    pub custom_comment: String,
    pub digits: i64,
    pub expiration_string: Option<String>,
    pub margin_rate: f64,
    pub offset: i64,
    pub open_price: f64,
    pub open_time_string: String,
    pub order: i64,
    pub order2: i64,
    pub position: i64,
    pub profit: f64,
    pub storage: f64,
    pub symbol: Option<String>,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub volume: f64,
    pub open_time: DateTime<Utc>,
    pub close_time: DateTime<Utc>,
    pub expiration: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub volume: f64,
    pub start_time_string: String,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartInfo {
    pub digits: i64,
    pub execution_mode: i64,
    pub candles: Vec<Candle>,
}

/// Transaction parameters behind an order number, as reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeTransactionInfo {
    pub cmd: i64,
    pub custom_comment: String,
    pub offset: i64,
    pub order: i64,
    pub price: f64,
    pub stop_loss: f64,
    pub symbol: String,
    pub take_profit: f64,
    pub order_type: i64,
    pub volume: f64,
    pub expiration: DateTime<Utc>,
}

/// Outcome of a sent trade request.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeTransactionStatus {
    pub ask: f64,
    pub bid: f64,
    pub custom_comment: String,
    pub message: Option<String>,
    pub order: i64,
    pub status: TradeStatus,
}

/// One day's session window, offsets from midnight CET/CEST.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule {
    pub day: DayOfWeek,
    pub from: Duration,
    pub to: Duration,
}

/// Quoting and trading sessions for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct TradingHours {
    pub symbol: String,
    pub quotes: Vec<DaySchedule>,
    pub trading: Vec<DaySchedule>,
}

/// Account margin summary. The wire shape needs no conversion, so it decodes
/// straight into the domain type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarginLevel {
    pub balance: f64,
    pub credit: f64,
    pub currency: String,
    pub equity: f64,
    pub margin: f64,
    #[serde(rename = "margin_free")]
    pub margin_free: f64,
    #[serde(rename = "margin_level")]
    pub margin_level: f64,
}
