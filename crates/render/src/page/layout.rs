//! Page structure: filter form, summary cards and the three section cards.

use std::collections::BTreeMap;

use fundboard_core::DateRange;

use crate::target::RenderTarget;
use crate::templates::escape_html;

/// Wrap a target's content in its addressable element; absent targets are
/// left out of the page.
fn region(slots: &BTreeMap<RenderTarget, String>, target: RenderTarget, class: &str) -> String {
    match slots.get(&target) {
        Some(content) => format!(
            r#"<div id="{id}" class="{class}">{content}</div>"#,
            id = target.id()
        ),
        None => String::new(),
    }
}

fn filter_form(range: Option<&DateRange>) -> String {
    let (start, end) = match range {
        Some(r) => (r.start.to_string(), r.end.to_string()),
        None => (String::new(), String::new()),
    };
    format!(
        r#"
        <form id="dashboard-filter-form" class="row g-2 align-items-end mb-4">
            <div class="col-auto">
                <label for="start_date" class="form-label small text-muted">Start date</label>
                <input type="date" class="form-control" id="start_date" name="start_date" value="{start}">
            </div>
            <div class="col-auto">
                <label for="end_date" class="form-label small text-muted">End date</label>
                <input type="date" class="form-control" id="end_date" name="end_date" value="{end}">
            </div>
            <div class="col-auto">
                <button type="submit" class="btn btn-primary"><i class="bi bi-funnel me-1"></i>Filter</button>
            </div>
        </form>"#,
        start = escape_html(&start),
        end = escape_html(&end),
    )
}

fn summary_column(slots: &BTreeMap<RenderTarget, String>, target: RenderTarget) -> String {
    let card = region(slots, target, "card-body");
    if card.is_empty() {
        return String::new();
    }
    format!(
        r#"
            <div class="col-md-3">
                <div class="card h-100">{card}</div>
            </div>"#
    )
}

fn section_card(
    slots: &BTreeMap<RenderTarget, String>,
    title: &str,
    icon: &str,
    body: RenderTarget,
    footer: Option<RenderTarget>,
) -> String {
    let body_html = region(slots, body, "card-body p-0");
    let footer_html = footer
        .map(|f| region(slots, f, "card-footer bg-white"))
        .unwrap_or_default();
    if body_html.is_empty() && footer_html.is_empty() {
        return String::new();
    }
    format!(
        r#"
        <div class="card mb-4">
            <div class="card-header bg-white">
                <h5 class="mb-0"><i class="bi bi-{icon} me-2"></i>{title}</h5>
            </div>
            {body_html}
            {footer_html}
        </div>"#
    )
}

/// Body of the dashboard page.
pub fn body(
    slots: &BTreeMap<RenderTarget, String>,
    banners: &[String],
    range: Option<&DateRange>,
) -> String {
    let period = range
        .map(|r| format!("<span class=\"text-muted\">{}</span>", escape_html(&r.to_string())))
        .unwrap_or_default();

    let summaries: String = [
        RenderTarget::BalanceSummary,
        RenderTarget::TransactionsSummary,
        RenderTarget::CryptoSummary,
        RenderTarget::TotalProfit,
    ]
    .into_iter()
    .map(|t| summary_column(slots, t))
    .collect();

    let balance_details = region(slots, RenderTarget::BalanceDetails, "card-body");
    let balance_card = if balance_details.is_empty() {
        String::new()
    } else {
        format!(
            r#"
        <div class="card mb-4">
            <div class="card-header bg-white">
                <h5 class="mb-0"><i class="bi bi-wallet2 me-2"></i>Exchange Balances</h5>
            </div>
            {balance_details}
        </div>"#
        )
    };

    format!(
        r#"
    <div class="banner-area">{banners}</div>
    <div class="container py-4">
        <header class="d-flex justify-content-between align-items-center mb-3">
            <h1 class="h3 mb-0">Dashboard</h1>
            {period}
        </header>
{form}
        <div class="row g-3 mb-4">{summaries}
        </div>
{balance_card}
{transactions_card}
{crypto_card}
    </div>
"#,
        banners = banners.concat(),
        form = filter_form(range),
        transactions_card = section_card(
            slots,
            "Investor Transactions",
            "arrow-left-right",
            RenderTarget::TransactionsTable,
            Some(RenderTarget::TransactionsFooter),
        ),
        crypto_card = section_card(
            slots,
            "Crypto Variation",
            "currency-bitcoin",
            RenderTarget::CryptoTable,
            Some(RenderTarget::CryptoFooter),
        ),
    )
}
