//! View renderer contract for the dashboard loader.
//!
//! The loader pushes typed view-models through this trait; implementations
//! decide how to paint them (HTML fragments, a terminal table, a test
//! recorder). Every method must be a no-op when the implementation has no
//! target for it.

use fundboard_core::{BalancePayload, CryptoPayload, Section, TotalProfit, TransactionsPayload};

/// Handle of a page-level banner, used to dismiss it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BannerId(pub u64);

/// Sink for everything a load cycle shows on the page.
pub trait DashboardView: Send + Sync {
    /// Put a section into its loading (skeleton) state.
    fn show_skeleton(&self, section: Section);

    fn render_balance(&self, data: &BalancePayload);

    fn render_transactions(&self, data: &TransactionsPayload);

    fn render_crypto_variation(&self, data: &CryptoPayload);

    /// Replace a section's content with its error view.
    fn show_section_error(&self, section: Section, message: &str);

    fn render_total_profit(&self, total: &TotalProfit);

    /// Show a transient page-level error banner.
    fn show_banner(&self, message: &str) -> BannerId;

    /// Remove a banner; unknown or already dismissed ids are ignored.
    fn dismiss_banner(&self, id: BannerId);
}

/// A view that paints nothing, for headless runs.
#[derive(Debug, Clone, Default)]
pub struct NoOpView;

impl DashboardView for NoOpView {
    fn show_skeleton(&self, _section: Section) {}

    fn render_balance(&self, _data: &BalancePayload) {}

    fn render_transactions(&self, _data: &TransactionsPayload) {}

    fn render_crypto_variation(&self, _data: &CryptoPayload) {}

    fn show_section_error(&self, _section: Section, _message: &str) {}

    fn render_total_profit(&self, _total: &TotalProfit) {}

    fn show_banner(&self, _message: &str) -> BannerId {
        BannerId(0)
    }

    fn dismiss_banner(&self, _id: BannerId) {}
}
