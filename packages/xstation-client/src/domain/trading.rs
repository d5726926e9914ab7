//! Trading Types
//!
//! Numeric wire codes used by the trading commands, plus the
//! `tradeTransInfo` payload sent with `tradeTransaction`. All enums
//! serialize to their integer wire codes, never to their names.

use serde::Serialize;

/// Implements integer (de)serialization for a wire-code enum.
macro_rules! wire_code_serde {
    ($name:ident, $label:literal) => {
        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_i64(self.code())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let code = i64::deserialize(deserializer)?;
                Self::from_code(code).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        concat!("unknown ", $label, " code: {}"),
                        code
                    ))
                })
            }
        }
    };
}

// =============================================================================
// Trade Command
// =============================================================================

/// Order operation carried in the `cmd` field of a trade transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeCmd {
    /// Buy at market.
    Buy = 0,
    /// Sell at market.
    Sell = 1,
    /// Buy limit order.
    BuyLimit = 2,
    /// Sell limit order.
    SellLimit = 3,
    /// Buy stop order.
    BuyStop = 4,
    /// Sell stop order.
    SellStop = 5,
    /// Balance operation. Read-only, appears in trade history.
    Balance = 6,
    /// Credit operation. Read-only.
    Credit = 7,
}

impl TradeCmd {
    /// Integer wire code.
    #[must_use]
    pub const fn code(self) -> i64 {
        self as i64
    }

    /// Look up a command by its wire code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Buy),
            1 => Some(Self::Sell),
            2 => Some(Self::BuyLimit),
            3 => Some(Self::SellLimit),
            4 => Some(Self::BuyStop),
            5 => Some(Self::SellStop),
            6 => Some(Self::Balance),
            7 => Some(Self::Credit),
            _ => None,
        }
    }
}

wire_code_serde!(TradeCmd, "trade command");

// =============================================================================
// Trade Type
// =============================================================================

/// Transaction lifecycle action carried in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeType {
    /// Open a new order.
    Open = 0,
    /// Order placed, waiting for execution.
    Pending = 1,
    /// Close an existing order.
    Close = 2,
    /// Modify an existing order.
    Modify = 3,
    /// Delete a pending order.
    Delete = 4,
}

impl TradeType {
    /// Integer wire code.
    #[must_use]
    pub const fn code(self) -> i64 {
        self as i64
    }

    /// Look up a transaction type by its wire code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Open),
            1 => Some(Self::Pending),
            2 => Some(Self::Close),
            3 => Some(Self::Modify),
            4 => Some(Self::Delete),
            _ => None,
        }
    }
}

wire_code_serde!(TradeType, "trade type");

// =============================================================================
// Trade Status
// =============================================================================

/// Server-side verdict on a submitted transaction.
///
/// Returned in the `requestStatus` field of `tradeTransactionStatus` replies
/// and in `tradeStatus` stream pushes. Code 2 is unassigned upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeStatus {
    /// The transaction errored out.
    Error = 0,
    /// The transaction is awaiting execution.
    Pending = 1,
    /// The transaction was executed successfully.
    Accepted = 3,
    /// The transaction was rejected.
    Rejected = 4,
}

impl TradeStatus {
    /// Integer wire code.
    #[must_use]
    pub const fn code(self) -> i64 {
        self as i64
    }

    /// Look up a status by its wire code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Error),
            1 => Some(Self::Pending),
            3 => Some(Self::Accepted),
            4 => Some(Self::Rejected),
            _ => None,
        }
    }
}

wire_code_serde!(TradeStatus, "trade status");

// =============================================================================
// Chart Period
// =============================================================================

/// Chart timeframe, encoded on the wire as a duration in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// One minute.
    M1 = 1,
    /// Five minutes.
    M5 = 5,
    /// Fifteen minutes.
    M15 = 15,
    /// Thirty minutes.
    M30 = 30,
    /// One hour.
    H1 = 60,
    /// Four hours.
    H4 = 240,
    /// One day.
    D1 = 1440,
    /// One week.
    W1 = 10080,
    /// Thirty days.
    Mn1 = 43200,
}

impl Period {
    /// Duration in minutes, as sent on the wire.
    #[must_use]
    pub const fn code(self) -> i64 {
        self as i64
    }

    /// Look up a period by its duration in minutes.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::M1),
            5 => Some(Self::M5),
            15 => Some(Self::M15),
            30 => Some(Self::M30),
            60 => Some(Self::H1),
            240 => Some(Self::H4),
            1440 => Some(Self::D1),
            10080 => Some(Self::W1),
            43200 => Some(Self::Mn1),
            _ => None,
        }
    }
}

wire_code_serde!(Period, "chart period");

// =============================================================================
// Trade Transaction Payload
// =============================================================================

/// The `tradeTransInfo` object nested inside a `tradeTransaction` command.
///
/// Every field is sent on every request; the server ignores the ones that do
/// not apply to the chosen [`TradeCmd`]/[`TradeType`] combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeTransInfo {
    /// Order operation.
    pub cmd: TradeCmd,
    /// Free-form comment attached to the order.
    pub custom_comment: String,
    /// Pending order expiration, in epoch milliseconds. Zero for none.
    pub expiration: i64,
    /// Trailing offset in points. Zero for none.
    pub offset: i64,
    /// Order number, required when closing or modifying.
    pub order: i64,
    /// Trade price.
    pub price: f64,
    /// Stop-loss price. Zero for none.
    pub sl: f64,
    /// Symbol the order trades.
    pub symbol: String,
    /// Transaction lifecycle action.
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    /// Take-profit price. Zero for none.
    pub tp: f64,
    /// Volume in lots.
    pub volume: f64,
}

impl Default for TradeTransInfo {
    fn default() -> Self {
        Self {
            cmd: TradeCmd::Buy,
            custom_comment: String::new(),
            expiration: 0,
            offset: 0,
            order: 0,
            price: 0.0,
            sl: 0.0,
            symbol: String::new(),
            trade_type: TradeType::Open,
            tp: 0.0,
            volume: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    use super::*;

    #[test_case(TradeCmd::Buy, 0; "buy")]
    #[test_case(TradeCmd::Sell, 1; "sell")]
    #[test_case(TradeCmd::BuyLimit, 2; "buy limit")]
    #[test_case(TradeCmd::SellLimit, 3; "sell limit")]
    #[test_case(TradeCmd::BuyStop, 4; "buy stop")]
    #[test_case(TradeCmd::SellStop, 5; "sell stop")]
    #[test_case(TradeCmd::Balance, 6; "balance")]
    #[test_case(TradeCmd::Credit, 7; "credit")]
    fn trade_cmd_wire_codes(cmd: TradeCmd, code: i64) {
        assert_eq!(cmd.code(), code);
        assert_eq!(TradeCmd::from_code(code), Some(cmd));
    }

    #[test_case(TradeType::Open, 0; "open")]
    #[test_case(TradeType::Pending, 1; "pending")]
    #[test_case(TradeType::Close, 2; "close")]
    #[test_case(TradeType::Modify, 3; "modify")]
    #[test_case(TradeType::Delete, 4; "delete")]
    fn trade_type_wire_codes(trade_type: TradeType, code: i64) {
        assert_eq!(trade_type.code(), code);
        assert_eq!(TradeType::from_code(code), Some(trade_type));
    }

    #[test_case(TradeStatus::Error, 0; "error")]
    #[test_case(TradeStatus::Pending, 1; "pending")]
    #[test_case(TradeStatus::Accepted, 3; "accepted")]
    #[test_case(TradeStatus::Rejected, 4; "rejected")]
    fn trade_status_wire_codes(status: TradeStatus, code: i64) {
        assert_eq!(status.code(), code);
        assert_eq!(TradeStatus::from_code(code), Some(status));
    }

    #[test]
    fn trade_status_code_two_is_unassigned() {
        assert_eq!(TradeStatus::from_code(2), None);
    }

    #[test_case(Period::M1, 1; "one minute")]
    #[test_case(Period::M30, 30; "thirty minutes")]
    #[test_case(Period::H4, 240; "four hours")]
    #[test_case(Period::D1, 1440; "one day")]
    #[test_case(Period::W1, 10080; "one week")]
    #[test_case(Period::Mn1, 43200; "thirty days")]
    fn period_wire_codes(period: Period, minutes: i64) {
        assert_eq!(period.code(), minutes);
        assert_eq!(Period::from_code(minutes), Some(period));
    }

    #[test]
    fn enums_serialize_to_integer_codes() {
        assert_eq!(serde_json::to_value(TradeCmd::SellLimit).unwrap(), json!(3));
        assert_eq!(serde_json::to_value(TradeType::Delete).unwrap(), json!(4));
        assert_eq!(serde_json::to_value(Period::H1).unwrap(), json!(60));
    }

    #[test]
    fn trade_status_deserializes_from_reply_field() {
        let reply = json!({"requestStatus": 3});
        let status: TradeStatus = serde_json::from_value(reply["requestStatus"].clone()).unwrap();
        assert_eq!(status, TradeStatus::Accepted);
    }

    #[test]
    fn unknown_wire_code_fails_deserialization() {
        let err = serde_json::from_value::<TradeStatus>(json!(2)).unwrap_err();
        assert!(err.to_string().contains("unknown trade status code: 2"));
    }

    #[test]
    fn trade_trans_info_serializes_with_wire_field_names() {
        let info = TradeTransInfo {
            cmd: TradeCmd::BuyLimit,
            price: 1.2345,
            symbol: "EURUSD".to_string(),
            volume: 0.1,
            ..TradeTransInfo::default()
        };

        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            json!({
                "cmd": 2,
                "customComment": "",
                "expiration": 0,
                "offset": 0,
                "order": 0,
                "price": 1.2345,
                "sl": 0.0,
                "symbol": "EURUSD",
                "type": 0,
                "tp": 0.0,
                "volume": 0.1,
            })
        );
    }
}
