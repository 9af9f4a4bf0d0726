//! Wire-to-domain conversion functions.
//!
//! Every epoch-millisecond field becomes a `DateTime<Utc>`; nullable
//! timestamps fall back to the epoch zero value rather than an error, matching
//! how callers treat "no expiration" and "not closed yet".

use crate::core::types::{
    CalendarEvent, Candle, ChartInfo, DaySchedule, DayOfWeek, MarginMode, MarketImpact, NewsItem,
    ProfitMode, QuoteId, ServerTime, SymbolInfo, Tick, TradeRecord, TradeStatus,
    TradeTransactionInfo, TradeTransactionStatus, TradingHours,
};
use crate::xtb::types::{
    WireCalendar, WireCandle, WireChartInfo, WireDayInfo, WireNews, WireServerTime, WireSymbol,
    WireTick, WireTrade, WireTradeTransaction, WireTradeTransactionStatus, WireTradingHours,
};
use chrono::{DateTime, Duration, Utc};

pub fn datetime_from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
}

pub fn datetime_from_optional_millis(millis: Option<i64>) -> DateTime<Utc> {
    millis.map_or(DateTime::UNIX_EPOCH, datetime_from_millis)
}

pub fn convert_server_time(raw: WireServerTime) -> ServerTime {
    ServerTime {
        time: datetime_from_millis(raw.time),
        time_string: raw.time_string,
    }
}

pub fn convert_calendar(raw: WireCalendar) -> CalendarEvent {
    CalendarEvent {
        country: raw.country,
        current: raw.current,
        forecast: raw.forecast,
        impact: MarketImpact::from_code(&raw.impact),
        period: raw.period,
        previous: raw.previous,
        title: raw.title,
        time: datetime_from_millis(raw.time),
    }
}

pub fn convert_news(raw: WireNews) -> NewsItem {
    NewsItem {
        body: raw.body,
        body_length: raw.body_length,
        key: raw.key,
        title: raw.title,
        time_string: raw.time_string,
        time: datetime_from_millis(raw.time),
    }
}

pub fn convert_symbol(raw: WireSymbol) -> SymbolInfo {
    SymbolInfo {
        ask: raw.ask,
        bid: raw.bid,
        category_name: raw.category_name,
        contract_size: raw.contract_size,
        currency: raw.currency,
        currency_pair: raw.currency_pair,
        currency_profit: raw.currency_profit,
        description: raw.description,
        group_name: raw.group_name,
        high: raw.high,
        initial_margin: raw.initial_margin,
        instant_max_volume: raw.instant_max_volume,
        leverage: raw.leverage,
        long_only: raw.long_only,
        lot_max: raw.lot_max,
        lot_min: raw.lot_min,
        lot_step: raw.lot_step,
        low: raw.low,
        margin_hedged: raw.margin_hedged,
        margin_hedged_strong: raw.margin_hedged_strong,
        margin_maintenance: raw.margin_maintenance,
        margin_mode: MarginMode::from_code(raw.margin_mode),
        percentage: raw.percentage,
        pips_precision: raw.pips_precision,
        precision: raw.precision,
        profit_mode: ProfitMode::from_code(raw.profit_mode),
        quote_id: QuoteId::from_code(raw.quote_id),
        short_selling: raw.short_selling,
        spread_raw: raw.spread_raw,
        spread_table: raw.spread_table,
        starting: raw.starting,
        step_rule_id: raw.step_rule_id,
        stops_level: raw.stops_level,
        swap_rollover3days: raw.swap_rollover3days,
        swap_enable: raw.swap_enable,
        swap_long: raw.swap_long,
        swap_short: raw.swap_short,
        swap_type: raw.swap_type,
        symbol: raw.symbol,
        tick_size: raw.tick_size,
        tick_value: raw.tick_value,
        time_string: raw.time_string,
        trailing_enabled: raw.trailing_enabled,
        instrument_type: raw.instrument_type,
        time: datetime_from_millis(raw.time),
        expiration: datetime_from_optional_millis(raw.expiration),
    }
}

pub fn convert_tick(raw: WireTick) -> Tick {
    Tick {
        ask: raw.ask,
        ask_volume: raw.ask_volume,
        bid: raw.bid,
        bid_volume: raw.bid_volume,
        high: raw.high,
        level: raw.level,
        low: raw.low,
        spread_raw: raw.spread_raw,
        spread_table: raw.spread_table,
        symbol: raw.symbol,
        timestamp: datetime_from_millis(raw.timestamp),
    }
}

pub fn convert_trade(raw: WireTrade) -> TradeRecord {
    TradeRecord {
        close_price: raw.close_price,
        close_time_string: raw.close_time_string,
        closed: raw.closed,
        cmd: raw.cmd,
        comment: raw.comment,
        commission: raw.commission,
        custom_comment: raw.custom_comment,
        digits: raw.digits,
        expiration_string: raw.expiration_string,
        margin_rate: raw.margin_rate,
        offset: raw.offset,
        open_price: raw.open_price,
        open_time_string: raw.open_time_string,
        order: raw.order,
        order2: raw.order2,
        position: raw.position,
        profit: raw.profit,
        storage: raw.storage,
        symbol: raw.symbol,
        stop_loss: raw.stop_loss,
        take_profit: raw.take_profit,
        volume: raw.volume,
        open_time: datetime_from_millis(raw.open_time),
        close_time: datetime_from_optional_millis(raw.close_time),
        expiration: datetime_from_optional_millis(raw.expiration),
        timestamp: datetime_from_millis(raw.timestamp),
    }
}

pub fn convert_candle(raw: WireCandle) -> Candle {
    Candle {
        close: raw.close,
        high: raw.high,
        low: raw.low,
        open: raw.open,
        volume: raw.volume,
        start_time_string: raw.start_time_string,
        start_time: datetime_from_millis(raw.start_time),
    }
}

pub fn convert_trade_transaction(raw: WireTradeTransaction) -> TradeTransactionInfo {
    let info = raw.trade_trans_info;
    TradeTransactionInfo {
        cmd: info.cmd,
        custom_comment: info.custom_comment,
        offset: info.offset,
        order: info.order,
        price: info.price,
        stop_loss: info.stop_loss,
        symbol: info.symbol,
        take_profit: info.take_profit,
        order_type: info.order_type,
        volume: info.volume,
        expiration: datetime_from_optional_millis(info.expiration),
    }
}

pub fn convert_trade_transaction_status(raw: WireTradeTransactionStatus) -> TradeTransactionStatus {
    TradeTransactionStatus {
        ask: raw.ask,
        bid: raw.bid,
        custom_comment: raw.custom_comment,
        message: raw.message,
        order: raw.order,
        status: TradeStatus::from_code(raw.request_status),
    }
}

fn convert_day_info(raw: WireDayInfo) -> DaySchedule {
    DaySchedule {
        day: DayOfWeek::from_code(raw.day),
        from: Duration::milliseconds(raw.from),
        to: Duration::milliseconds(raw.to),
    }
}

pub fn convert_trading_hours(raw: WireTradingHours) -> TradingHours {
    TradingHours {
        symbol: raw.symbol,
        quotes: raw.quotes.into_iter().map(convert_day_info).collect(),
        trading: raw.trading.into_iter().map(convert_day_info).collect(),
    }
}

pub fn convert_chart_info(raw: WireChartInfo) -> ChartInfo {
    ChartInfo {
        digits: raw.digits,
        execution_mode: raw.execution_mode,
        candles: raw.rate_infos.into_iter().map(convert_candle).collect(),
    }
}
