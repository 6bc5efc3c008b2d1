//! Named regions of the dashboard page that the renderer writes into.

use fundboard_core::Section;

/// A render target, identified on the page by its element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderTarget {
    BalanceSummary,
    BalanceDetails,
    TransactionsSummary,
    TransactionsTable,
    TransactionsFooter,
    CryptoSummary,
    CryptoTable,
    CryptoFooter,
    TotalProfit,
}

impl RenderTarget {
    pub const ALL: [RenderTarget; 9] = [
        RenderTarget::BalanceSummary,
        RenderTarget::BalanceDetails,
        RenderTarget::TransactionsSummary,
        RenderTarget::TransactionsTable,
        RenderTarget::TransactionsFooter,
        RenderTarget::CryptoSummary,
        RenderTarget::CryptoTable,
        RenderTarget::CryptoFooter,
        RenderTarget::TotalProfit,
    ];

    pub fn id(self) -> &'static str {
        match self {
            RenderTarget::BalanceSummary => "balance-summary-card",
            RenderTarget::BalanceDetails => "balance-details-container",
            RenderTarget::TransactionsSummary => "transactions-summary-card",
            RenderTarget::TransactionsTable => "transactions-table-container",
            RenderTarget::TransactionsFooter => "transactions-footer",
            RenderTarget::CryptoSummary => "crypto-summary-card",
            RenderTarget::CryptoTable => "crypto-variation-table-container",
            RenderTarget::CryptoFooter => "crypto-variation-footer",
            RenderTarget::TotalProfit => "total-profit-card",
        }
    }

    /// The summary card and main body of a section. Skeleton and error
    /// views replace exactly these; footers are only written on success.
    pub fn section_body(section: Section) -> [RenderTarget; 2] {
        match section {
            Section::Balance => [RenderTarget::BalanceSummary, RenderTarget::BalanceDetails],
            Section::Transactions => [
                RenderTarget::TransactionsSummary,
                RenderTarget::TransactionsTable,
            ],
            Section::Crypto => [RenderTarget::CryptoSummary, RenderTarget::CryptoTable],
        }
    }
}
