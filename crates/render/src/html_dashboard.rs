//! String-templated HTML implementation of [`DashboardView`].

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use log::debug;

use fundboard_connect::{BannerId, DashboardView};
use fundboard_core::{
    BalancePayload, CryptoPayload, DateRange, Section, TotalProfit, TransactionsPayload,
};

use crate::page;
use crate::target::RenderTarget;
use crate::templates;

#[derive(Debug, Default)]
struct PageState {
    /// Present targets and their current content.
    slots: BTreeMap<RenderTarget, String>,
    /// Banners in display order.
    banners: Vec<(BannerId, String)>,
    next_banner: u64,
    range: Option<DateRange>,
}

/// In-memory dashboard page.
///
/// Each render target is an optional slot: a page built without a target
/// silently ignores writes to it, the same way a page missing an element
/// would.
#[derive(Debug, Default)]
pub struct HtmlDashboard {
    state: Mutex<PageState>,
}

impl HtmlDashboard {
    /// Page with only the given targets present.
    pub fn new(targets: impl IntoIterator<Item = RenderTarget>) -> Self {
        let slots = targets
            .into_iter()
            .map(|t| {
                let initial = match t {
                    RenderTarget::TotalProfit => templates::total_profit_placeholder(),
                    _ => String::new(),
                };
                (t, initial)
            })
            .collect();

        Self {
            state: Mutex::new(PageState {
                slots,
                ..PageState::default()
            }),
        }
    }

    /// Page with every target present.
    pub fn with_all_targets() -> Self {
        Self::new(RenderTarget::ALL)
    }

    /// Record the range the page is showing, for the filter inputs.
    pub fn set_range(&self, range: DateRange) {
        self.lock().range = Some(range);
    }

    /// Current content of a target, `None` when the page lacks it.
    pub fn slot(&self, target: RenderTarget) -> Option<String> {
        self.lock().slots.get(&target).cloned()
    }

    /// Messages of the banners currently shown.
    pub fn banners(&self) -> Vec<String> {
        self.lock()
            .banners
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Assemble the complete HTML document from the current state.
    pub fn render_page(&self) -> String {
        let state = self.lock();
        let banners: Vec<String> = state
            .banners
            .iter()
            .map(|(id, message)| templates::banner(id.0, message))
            .collect();
        page::document(&state.slots, &banners, state.range.as_ref())
    }

    fn write(&self, target: RenderTarget, html: String) {
        let mut state = self.lock();
        if let Some(slot) = state.slots.get_mut(&target) {
            *slot = html;
        }
    }

    fn write_section(&self, section: Section, html: &str) {
        let mut state = self.lock();
        for target in RenderTarget::section_body(section) {
            if let Some(slot) = state.slots.get_mut(&target) {
                *slot = html.to_string();
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DashboardView for HtmlDashboard {
    fn show_skeleton(&self, section: Section) {
        let [summary, body] = RenderTarget::section_body(section);
        self.write(summary, templates::summary_skeleton());
        let body_html = match section {
            Section::Balance => templates::details_skeleton(),
            Section::Transactions | Section::Crypto => templates::table_skeleton(),
        };
        self.write(body, body_html);
    }

    fn render_balance(&self, data: &BalancePayload) {
        self.write(RenderTarget::BalanceSummary, templates::balance_summary(data));
        self.write(RenderTarget::BalanceDetails, templates::balance_details(data));
    }

    fn render_transactions(&self, data: &TransactionsPayload) {
        self.write(
            RenderTarget::TransactionsSummary,
            templates::transactions_summary(data),
        );
        self.write(
            RenderTarget::TransactionsTable,
            templates::transactions_table(data),
        );
        self.write(
            RenderTarget::TransactionsFooter,
            templates::transactions_footer(data),
        );
    }

    fn render_crypto_variation(&self, data: &CryptoPayload) {
        self.write(RenderTarget::CryptoSummary, templates::crypto_summary(data));
        self.write(RenderTarget::CryptoTable, templates::crypto_table(data));
        self.write(RenderTarget::CryptoFooter, templates::crypto_footer(data));
    }

    fn show_section_error(&self, section: Section, message: &str) {
        let html = templates::section_error(section.error_title(), message);
        self.write_section(section, &html);
    }

    fn render_total_profit(&self, total: &TotalProfit) {
        self.write(RenderTarget::TotalProfit, templates::total_profit_card(total));
    }

    fn show_banner(&self, message: &str) -> BannerId {
        let mut state = self.lock();
        state.next_banner += 1;
        let id = BannerId(state.next_banner);
        state.banners.push((id, message.to_string()));
        debug!("Showing banner {}", id.0);
        id
    }

    fn dismiss_banner(&self, id: BannerId) {
        self.lock().banners.retain(|(shown, _)| *shown != id);
    }
}
