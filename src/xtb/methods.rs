//! Typed command wrappers.
//!
//! Each wrapper is a thin consumer of [`XtbClient::call`]: it shapes the
//! arguments, names the command and converts the wire payload into the
//! domain types. No correlation or transport logic lives here.

use crate::core::errors::XtbError;
use crate::core::types::{
    CalendarEvent, ChartInfo, MarginLevel, NewsItem, Period, ServerTime, SymbolInfo, Tick,
    TradeCommand, TradeRecord, TradeTransactionInfo, TradeTransactionStatus, TradingHours,
};
use crate::xtb::client::XtbClient;
use crate::xtb::conversions::{
    convert_calendar, convert_chart_info, convert_news, convert_server_time, convert_symbol,
    convert_tick, convert_trade, convert_trade_transaction, convert_trade_transaction_status,
    convert_trading_hours,
};
use crate::xtb::types::{
    ChartLastArguments, ChartLastInfo, ChartRangeArguments, ChartRangeInfo, GetNewsArguments,
    GetProfitCalculationArguments, GetSymbolArguments, GetTickPricesArguments,
    GetTradeTransactionArguments, GetTradesArguments, GetTradesHistoryArguments,
    GetTradingHoursArguments, TickQuotations, VersionResponse, WireCalendar, WireChartInfo,
    WireNews, WireProfitCalculation, WireServerTime, WireSymbol, WireTrade, WireTradeTransaction,
    WireTradeTransactionStatus, WireTradingHours,
};
use chrono::{DateTime, Utc};
use serde_json::Value;

impl XtbClient {
    /// No-output keep-alive command; also usable as a connection probe.
    pub async fn ping(&self) -> Result<(), XtbError> {
        let _: Value = self.call::<Value, Value>("ping", None).await?;
        Ok(())
    }

    /// API version of the counterparty.
    pub async fn get_version(&self) -> Result<String, XtbError> {
        let response: VersionResponse = self.call::<Value, _>("getVersion", None).await?;
        Ok(response.version)
    }

    pub async fn get_server_time(&self) -> Result<ServerTime, XtbError> {
        let raw: WireServerTime = self.call::<Value, _>("getServerTime", None).await?;
        Ok(convert_server_time(raw))
    }

    /// Market event calendar.
    pub async fn get_calendar(&self) -> Result<Vec<CalendarEvent>, XtbError> {
        let raw: Vec<WireCalendar> = self.call::<Value, _>("getCalendar", None).await?;
        Ok(raw.into_iter().map(convert_calendar).collect())
    }

    /// Every instrument available for the account.
    pub async fn get_all_symbols(&self) -> Result<Vec<SymbolInfo>, XtbError> {
        let raw: Vec<WireSymbol> = self.call::<Value, _>("getAllSymbols", None).await?;
        Ok(raw.into_iter().map(convert_symbol).collect())
    }

    pub async fn get_symbol(&self, symbol: &str) -> Result<SymbolInfo, XtbError> {
        let arguments = GetSymbolArguments {
            symbol: symbol.to_string(),
        };
        let raw: WireSymbol = self.call("getSymbol", Some(arguments)).await?;
        Ok(convert_symbol(raw))
    }

    /// Current quote levels for a set of symbols, restricted to ticks newer
    /// than `since`.
    pub async fn get_tick_prices(
        &self,
        level: i64,
        symbols: Vec<String>,
        since: DateTime<Utc>,
    ) -> Result<Vec<Tick>, XtbError> {
        let arguments = GetTickPricesArguments {
            level,
            symbols,
            timestamp: since.timestamp_millis(),
        };
        let raw: TickQuotations = self.call("getTickPrices", Some(arguments)).await?;
        Ok(raw.quotations.into_iter().map(convert_tick).collect())
    }

    /// News items published between `start` and `end`.
    pub async fn get_news(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<NewsItem>, XtbError> {
        let arguments = GetNewsArguments {
            start: start.timestamp_millis(),
            end: end.timestamp_millis(),
        };
        let raw: Vec<WireNews> = self.call("getNews", Some(arguments)).await?;
        Ok(raw.into_iter().map(convert_news).collect())
    }

    pub async fn get_margin_level(&self) -> Result<MarginLevel, XtbError> {
        self.call::<Value, _>("getMarginLevel", None).await
    }

    /// Expected profit for a hypothetical trade. The server computes an
    /// estimate; it is not guaranteed to be exact.
    pub async fn get_profit_calculation(
        &self,
        symbol: &str,
        command: TradeCommand,
        volume: f64,
        open_price: f64,
        close_price: f64,
    ) -> Result<f64, XtbError> {
        let arguments = GetProfitCalculationArguments {
            close_price,
            command,
            open_price,
            symbol: symbol.to_string(),
            volume,
        };
        let raw: WireProfitCalculation = self.call("getProfitCalculation", Some(arguments)).await?;
        Ok(raw.profit)
    }

    /// Trades for the account; `opened_only` restricts to open positions.
    pub async fn get_trades(&self, opened_only: bool) -> Result<Vec<TradeRecord>, XtbError> {
        let arguments = GetTradesArguments { opened_only };
        let raw: Vec<WireTrade> = self.call("getTrades", Some(arguments)).await?;
        Ok(raw.into_iter().map(convert_trade).collect())
    }

    pub async fn get_trades_history(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TradeRecord>, XtbError> {
        let arguments = GetTradesHistoryArguments {
            start: start.timestamp_millis(),
            end: end.timestamp_millis(),
        };
        let raw: Vec<WireTrade> = self.call("getTradesHistory", Some(arguments)).await?;
        Ok(raw.into_iter().map(convert_trade).collect())
    }

    /// Transaction parameters behind an order number.
    pub async fn get_trade_transaction(
        &self,
        order: i64,
    ) -> Result<TradeTransactionInfo, XtbError> {
        let arguments = GetTradeTransactionArguments { order };
        let raw: WireTradeTransaction = self.call("tradeTransaction", Some(arguments)).await?;
        Ok(convert_trade_transaction(raw))
    }

    /// Current status of a sent trade request. The coded `requestStatus`
    /// arrives as a typed [`TradeStatus`](crate::core::types::TradeStatus).
    pub async fn get_trade_transaction_status(
        &self,
        order: i64,
    ) -> Result<TradeTransactionStatus, XtbError> {
        let arguments = GetTradeTransactionArguments { order };
        let raw: WireTradeTransactionStatus =
            self.call("tradeTransactionStatus", Some(arguments)).await?;
        Ok(convert_trade_transaction_status(raw))
    }

    /// Quoting and trading session windows for a set of symbols.
    pub async fn get_trading_hours(
        &self,
        symbols: Vec<String>,
    ) -> Result<Vec<TradingHours>, XtbError> {
        let arguments = GetTradingHoursArguments { symbols };
        let raw: Vec<WireTradingHours> = self.call("getTradingHours", Some(arguments)).await?;
        Ok(raw.into_iter().map(convert_trading_hours).collect())
    }

    /// Chart candles for an explicit time range. A non-`None` `ticks` switches
    /// to count-based selection: the server returns that many candles from
    /// `start` (negative counts back to it) and ignores `end`.
    pub async fn get_chart_range(
        &self,
        period: Period,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        ticks: Option<i64>,
        symbol: &str,
    ) -> Result<ChartInfo, XtbError> {
        let arguments = ChartRangeArguments {
            info: ChartRangeInfo {
                end: end.timestamp_millis(),
                period,
                start: start.timestamp_millis(),
                symbol: symbol.to_string(),
                ticks,
            },
        };
        let raw: WireChartInfo = self.call("getChartRangeRequest", Some(arguments)).await?;
        Ok(convert_chart_info(raw))
    }

    /// Chart candles from `start` until now for the given period.
    pub async fn get_chart_last(
        &self,
        period: Period,
        start: DateTime<Utc>,
        symbol: &str,
    ) -> Result<ChartInfo, XtbError> {
        let arguments = ChartLastArguments {
            info: ChartLastInfo {
                period,
                start: start.timestamp_millis(),
                symbol: symbol.to_string(),
            },
        };
        let raw: WireChartInfo = self.call("getChartLastRequest", Some(arguments)).await?;
        Ok(convert_chart_info(raw))
    }
}
