/// Per-fetch request budget, in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// How long a page-level error banner stays up before it is dismissed.
pub const BANNER_AUTO_DISMISS_MS: u64 = 8_000;

/// Date format used by the date inputs and the gateway query string.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decimal precision for currency display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for crypto amounts and NAV display
pub const QUANTITY_DECIMAL_PRECISION: u32 = 4;

/// Message shown when a fetch exceeds its budget.
pub const TIMEOUT_MESSAGE: &str = "Request timeout - calculation took too long";

/// Banner message for a cycle whose sequencing failed.
pub const CYCLE_FAILED_MESSAGE: &str = "Failed to load dashboard data. Please try again.";

