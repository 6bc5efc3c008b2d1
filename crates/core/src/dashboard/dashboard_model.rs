//! Dashboard payload models, as returned by the gateway.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exchange balance totals at both ends of the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePayload {
    /// Sum of exchange balances recorded on the start date
    pub start_balance_sum: Decimal,
    /// Sum of exchange balances recorded on the end date
    pub end_balance_sum: Decimal,
    /// `end_balance_sum - start_balance_sum`, computed by the gateway
    pub balance_difference: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Investor cash flows over the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsPayload {
    /// Net investor cash movement between the two dates
    pub transactions_difference: Decimal,
    #[serde(default)]
    pub investor_transactions: Vec<InvestorTransaction>,
    /// Cumulative cash amount up to the start date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_transactions_sum: Option<Decimal>,
    /// Cumulative cash amount up to the end date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_transactions_sum: Option<Decimal>,
}

/// A single investor deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorTransaction {
    pub id: i64,
    /// Displayed verbatim, as formatted by the gateway
    pub effective_datetime: String,
    pub transaction_type: TransactionType,
    pub cash_amount: Decimal,
    pub cash_currency_code: String,
    #[serde(default)]
    pub kind_amount: Option<Decimal>,
    #[serde(default)]
    pub kind_currency_code: Option<String>,
    #[serde(default)]
    pub investor_alias: Option<String>,
    #[serde(default)]
    pub transaction_nav: Option<Decimal>,
}

/// Direction of an investor transaction.
///
/// Accepts both the display labels and the stored type codes
/// (`dep_cash`, `dep_kind`, `red_cash`, `red_kind`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Other(String),
}

impl TransactionType {
    pub fn label(&self) -> &str {
        match self {
            TransactionType::Deposit => "Deposit",
            TransactionType::Withdrawal => "Withdrawal",
            TransactionType::Other(label) => label,
        }
    }
}

impl From<String> for TransactionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Deposit" | "dep_cash" | "dep_kind" => TransactionType::Deposit,
            "Withdrawal" | "red_cash" | "red_kind" => TransactionType::Withdrawal,
            _ => TransactionType::Other(value),
        }
    }
}

impl From<TransactionType> for String {
    fn from(value: TransactionType) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mark-to-market variation of crypto holdings over the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoPayload {
    pub total_variation: Decimal,
    #[serde(default)]
    pub variations_by_currency: Vec<CurrencyVariation>,
}

/// Variation for one crypto currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyVariation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<i64>,
    pub currency_code: String,
    /// Units held at the end of the range
    pub amount: Decimal,
    /// Average acquisition price carried into the range
    pub start_price: Decimal,
    pub end_price: Decimal,
    pub variation: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holdings_details: Vec<HoldingDetail>,
}

impl CurrencyVariation {
    /// `end_price - start_price`; `None` when it does not fit a `Decimal`.
    pub fn price_change(&self) -> Option<Decimal> {
        self.end_price.checked_sub(self.start_price)
    }

    /// Price change as a percentage of the start price; zero when the start
    /// price is zero, `None` when the ratio overflows.
    pub fn price_change_pct(&self) -> Option<Decimal> {
        if self.start_price.is_zero() {
            return Some(Decimal::ZERO);
        }
        self.price_change()?
            .checked_div(self.start_price)?
            .checked_mul(Decimal::ONE_HUNDRED)
    }
}

/// Contribution of one in-range transaction to a currency's variation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingDetail {
    pub transaction_date: String,
    pub amount: Decimal,
    pub transaction_price: Decimal,
    pub measurement_start: String,
    pub price_at_measurement_start: Decimal,
    pub price_at_end: Decimal,
    pub variation: Decimal,
    pub avg_price_after_tx: Decimal,
}

/// Profit net of investor flows and crypto price moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalProfit {
    pub value: Decimal,
}

impl TotalProfit {
    /// `balance_difference - transactions_difference - total_variation`,
    /// taken from the typed payloads. `None` when the result overflows.
    pub fn compute(
        balance: &BalancePayload,
        transactions: &TransactionsPayload,
        crypto: &CryptoPayload,
    ) -> Option<Self> {
        let value = balance
            .balance_difference
            .checked_sub(transactions.transactions_difference)?
            .checked_sub(crypto.total_variation)?;
        Some(Self { value })
    }

    pub fn is_positive(&self) -> bool {
        self.value >= Decimal::ZERO
    }
}
