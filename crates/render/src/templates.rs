//! HTML fragments for every render target.
//!
//! Markup uses Bootstrap 5 classes and Bootstrap Icons. Values coming from
//! the gateway are escaped before they are interpolated.

use rust_decimal::Decimal;

use fundboard_core::constants::QUANTITY_DECIMAL_PRECISION;
use fundboard_core::utils::format::{format_currency, format_number};
use fundboard_core::{
    BalancePayload, CryptoPayload, CurrencyVariation, HoldingDetail, InvestorTransaction,
    TotalProfit, TransactionType, TransactionsPayload,
};

/// Escape text for use inside element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn sign_class(value: Decimal) -> &'static str {
    if value >= Decimal::ZERO {
        "text-success"
    } else {
        "text-danger"
    }
}

/// Fixed-decimal quantity, or `-` when absent or zero.
fn optional_quantity(value: Option<Decimal>) -> String {
    match value {
        Some(v) if !v.is_zero() => format_number(v, QUANTITY_DECIMAL_PRECISION),
        _ => "-".to_string(),
    }
}

fn summary_card(title: &str, value: Decimal, badge: &str, icon: &str, note: &str) -> String {
    format!(
        r#"
<div class="d-flex justify-content-between align-items-start">
    <div>
        <h6 class="text-muted text-uppercase small mb-2">{title}</h6>
        <h3 class="mb-0 {class}">{value}</h3>
    </div>
    <div class="bg-{badge} bg-opacity-10 rounded p-2">
        <i class="bi bi-{icon} text-{badge} fs-4"></i>
    </div>
</div>
<small class="text-muted d-block mt-2">{note}</small>
"#,
        class = sign_class(value),
        value = format_currency(value),
    )
}

fn empty_table(message: &str) -> String {
    format!(
        r#"
<div class="text-center py-5 text-muted">
    <i class="bi bi-inbox fs-1 d-block mb-2"></i>
    <p>{message}</p>
</div>
"#
    )
}

fn total_footer(label: &str, value: Decimal) -> String {
    format!(
        r#"
<small class="text-muted">
    <strong>{label}:</strong>
    <span class="{class}">{value}</span>
</small>
"#,
        class = sign_class(value),
        value = format_currency(value),
    )
}

// Skeletons

pub fn summary_skeleton() -> String {
    r#"<div class="skeleton-card" style="height: 120px;"></div>"#.to_string()
}

pub fn details_skeleton() -> String {
    let tile = r#"
    <div class="col-md-4">
        <div class="p-3 bg-light rounded">
            <div class="skeleton skeleton-text" style="margin-bottom: 1rem;"></div>
            <div class="skeleton skeleton-heading" style="width: 100%;"></div>
        </div>
    </div>"#;
    format!("<div class=\"row g-3\">{}\n</div>", tile.repeat(3))
}

pub fn table_skeleton() -> String {
    let row = r#"
<div class="skeleton skeleton-table-row">
    <div class="skeleton-table-cell"></div>
    <div class="skeleton-table-cell"></div>
    <div class="skeleton-table-cell"></div>
</div>"#;
    row.repeat(3)
}

// Errors

/// Inline error view for a section, e.g. `Transactions Error: HTTP 500: ...`.
pub fn section_error(title: &str, message: &str) -> String {
    format!(
        r#"
<div class="alert alert-danger mb-0 d-flex align-items-center">
    <i class="bi bi-exclamation-circle me-2"></i>
    <div>
        <strong>{title}:</strong> {message}
    </div>
</div>
"#,
        message = escape_html(message),
    )
}

/// Page-level dismissable banner.
pub fn banner(id: u64, message: &str) -> String {
    format!(
        r#"
<div class="alert alert-danger error-message" id="banner-{id}" role="alert">
    <div class="d-flex align-items-center">
        <i class="bi bi-exclamation-triangle me-2 fs-5"></i>
        <div>
            <strong>Error:</strong> {message}
        </div>
        <button type="button" class="btn-close" data-bs-dismiss="alert"></button>
    </div>
</div>
"#,
        message = escape_html(message),
    )
}

// Balance

pub fn balance_summary(data: &BalancePayload) -> String {
    summary_card(
        "Balance Difference",
        data.balance_difference,
        "primary",
        "wallet2",
        &format!("End: {}", format_currency(data.end_balance_sum)),
    )
}

pub fn balance_details(data: &BalancePayload) -> String {
    let tile = |label: &str, value: Decimal, class: &str| {
        format!(
            r#"
    <div class="col-md-4">
        <div class="p-3 bg-light rounded">
            <small class="text-muted d-block mb-1">{label}</small>
            <h5 class="mb-0 {class}">{value}</h5>
        </div>
    </div>"#,
            value = format_currency(value),
        )
    };

    format!(
        "<div class=\"row g-3\">{}{}{}\n</div>",
        tile("Start Balance", data.start_balance_sum, ""),
        tile("End Balance", data.end_balance_sum, ""),
        tile(
            "Difference",
            data.balance_difference,
            sign_class(data.balance_difference)
        ),
    )
}

// Transactions

pub fn transactions_summary(data: &TransactionsPayload) -> String {
    summary_card(
        "Transactions",
        data.transactions_difference,
        "info",
        "arrow-left-right",
        &format!("{} transaction(s)", data.investor_transactions.len()),
    )
}

fn transaction_row(tx: &InvestorTransaction) -> String {
    let badge = match tx.transaction_type {
        TransactionType::Deposit => "success",
        TransactionType::Withdrawal => "danger",
        TransactionType::Other(_) => "info",
    };

    format!(
        r#"
        <tr>
            <td><span class="badge bg-secondary">#{id}</span></td>
            <td>{datetime}</td>
            <td><span class="badge bg-{badge}">{kind}</span></td>
            <td class="text-end fw-semibold">{cash}</td>
            <td><span class="badge bg-secondary">{cash_ccy}</span></td>
            <td class="text-end">{kind_amount}</td>
            <td><span class="badge bg-secondary">{kind_ccy}</span></td>
            <td>{investor}</td>
            <td class="text-end">{nav}</td>
        </tr>"#,
        id = tx.id,
        datetime = escape_html(&tx.effective_datetime),
        kind = escape_html(tx.transaction_type.label()),
        cash = format_currency(tx.cash_amount),
        cash_ccy = escape_html(&tx.cash_currency_code),
        kind_amount = optional_quantity(tx.kind_amount),
        kind_ccy = escape_html(tx.kind_currency_code.as_deref().unwrap_or("-")),
        investor = escape_html(tx.investor_alias.as_deref().unwrap_or("-")),
        nav = optional_quantity(tx.transaction_nav),
    )
}

pub fn transactions_table(data: &TransactionsPayload) -> String {
    if data.investor_transactions.is_empty() {
        return empty_table("No transactions found for the selected period");
    }

    let rows: String = data.investor_transactions.iter().map(transaction_row).collect();
    format!(
        r#"
<div class="table-responsive">
    <table class="table table-hover mb-0">
        <thead class="table-light">
            <tr>
                <th class="border-0">ID</th>
                <th class="border-0">Date/Time</th>
                <th class="border-0">Type</th>
                <th class="border-0 text-end">Cash Amount</th>
                <th class="border-0">Currency</th>
                <th class="border-0 text-end">Kind Amount</th>
                <th class="border-0">Kind Currency</th>
                <th class="border-0">Investor</th>
                <th class="border-0 text-end">NAV</th>
            </tr>
        </thead>
        <tbody>{rows}
        </tbody>
    </table>
</div>
"#
    )
}

pub fn transactions_footer(data: &TransactionsPayload) -> String {
    total_footer("Total Difference", data.transactions_difference)
}

// Crypto variation

pub fn crypto_summary(data: &CryptoPayload) -> String {
    summary_card(
        "Crypto Variation",
        data.total_variation,
        "warning",
        "currency-bitcoin",
        &format!("{} currency(ies)", data.variations_by_currency.len()),
    )
}

fn holdings_breakdown(details: &[HoldingDetail]) -> String {
    let rows: String = details
        .iter()
        .map(|d| {
            format!(
                r#"
                    <tr>
                        <td>{date}</td>
                        <td class="text-end">{amount}</td>
                        <td class="text-end">{tx_price}</td>
                        <td>{start}</td>
                        <td class="text-end">{start_price}</td>
                        <td class="text-end">{end_price}</td>
                        <td class="text-end {class}">{variation}</td>
                        <td class="text-end">{avg}</td>
                    </tr>"#,
                date = escape_html(&d.transaction_date),
                amount = format_number(d.amount, QUANTITY_DECIMAL_PRECISION),
                tx_price = format_currency(d.transaction_price),
                start = escape_html(&d.measurement_start),
                start_price = format_currency(d.price_at_measurement_start),
                end_price = format_currency(d.price_at_end),
                class = sign_class(d.variation),
                variation = format_currency(d.variation),
                avg = format_currency(d.avg_price_after_tx),
            )
        })
        .collect();

    format!(
        r#"
        <tr class="holdings-details">
            <td colspan="6">
                <details>
                    <summary class="small text-muted">{count} transaction(s) in range</summary>
                    <table class="table table-sm mb-0">
                        <thead>
                            <tr>
                                <th>Date</th>
                                <th class="text-end">Amount</th>
                                <th class="text-end">Tx Price</th>
                                <th>Measured From</th>
                                <th class="text-end">Price Then</th>
                                <th class="text-end">Price at End</th>
                                <th class="text-end">Variation</th>
                                <th class="text-end">Avg Price After</th>
                            </tr>
                        </thead>
                        <tbody>{rows}
                        </tbody>
                    </table>
                </details>
            </td>
        </tr>"#,
        count = details.len(),
    )
}

fn variation_row(v: &CurrencyVariation) -> String {
    let (change_class, change) = match v.price_change() {
        Some(change) => (sign_class(change), format_currency(change)),
        None => ("text-muted", "-".to_string()),
    };
    let pct = v
        .price_change_pct()
        .map(|pct| format_number(pct, 2))
        .unwrap_or_else(|| "-".to_string());
    let row = format!(
        r#"
        <tr>
            <td><span class="badge bg-warning text-dark">{code}</span></td>
            <td class="text-end">{amount}</td>
            <td class="text-end">{start}</td>
            <td class="text-end">{end}</td>
            <td class="text-end">
                <span class="{change_class}">{change} <small>({pct}%)</small></span>
            </td>
            <td class="text-end fw-semibold {var_class}">{variation}</td>
        </tr>"#,
        code = escape_html(&v.currency_code),
        amount = format_number(v.amount, QUANTITY_DECIMAL_PRECISION),
        start = format_currency(v.start_price),
        end = format_currency(v.end_price),
        var_class = sign_class(v.variation),
        variation = format_currency(v.variation),
    );

    if v.holdings_details.is_empty() {
        row
    } else {
        row + &holdings_breakdown(&v.holdings_details)
    }
}

pub fn crypto_table(data: &CryptoPayload) -> String {
    if data.variations_by_currency.is_empty() {
        return empty_table("No crypto variations found for the selected period");
    }

    let rows: String = data.variations_by_currency.iter().map(variation_row).collect();
    format!(
        r#"
<div class="table-responsive">
    <table class="table table-hover mb-0">
        <thead class="table-light">
            <tr>
                <th class="border-0">Currency</th>
                <th class="border-0 text-end">Amount</th>
                <th class="border-0 text-end">Start Price</th>
                <th class="border-0 text-end">End Price</th>
                <th class="border-0 text-end">Price Change</th>
                <th class="border-0 text-end">Variation</th>
            </tr>
        </thead>
        <tbody>{rows}
        </tbody>
    </table>
</div>
"#
    )
}

pub fn crypto_footer(data: &CryptoPayload) -> String {
    total_footer("Total Variation", data.total_variation)
}

// Total profit

pub fn total_profit_card(total: &TotalProfit) -> String {
    let (badge, icon) = if total.is_positive() {
        ("success", "arrow-up-circle")
    } else {
        ("danger", "arrow-down-circle")
    };
    summary_card(
        "Total Profit",
        total.value,
        badge,
        icon,
        "Balance Diff - Transactions - Crypto Variation",
    )
}

/// What the total profit card shows before any cycle computed a value.
pub fn total_profit_placeholder() -> String {
    r#"
<div>
    <h6 class="text-muted text-uppercase small mb-2">Total Profit</h6>
    <h3 class="mb-0 text-muted">$--</h3>
</div>
"#
    .to_string()
}
