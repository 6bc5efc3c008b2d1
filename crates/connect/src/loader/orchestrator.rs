//! Dashboard load orchestrator.
//!
//! One load cycle runs balance first, then transactions and crypto variation
//! side by side, and finally derives the total profit when all three
//! sections loaded. Each section fails on its own; a newer cycle makes the
//! results of older ones stale.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, error, info, warn};

use fundboard_core::constants::{
    BANNER_AUTO_DISMISS_MS, CYCLE_FAILED_MESSAGE, DEFAULT_REQUEST_TIMEOUT_MS,
};
use fundboard_core::{
    BalancePayload, CryptoPayload, DateRange, Section, SectionError, SectionResult, TotalProfit,
    TransactionsPayload,
};

use super::view::DashboardView;
use crate::gateway::{ApiEnvelope, DashboardGateway, GatewayResult};

/// Configuration for load cycles.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Budget for each individual section fetch.
    pub request_timeout: Duration,
    /// How long a page-level banner stays up.
    pub banner_dismiss_after: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            banner_dismiss_after: Duration::from_millis(BANNER_AUTO_DISMISS_MS),
        }
    }
}

/// Everything one load cycle produced.
#[derive(Debug, Clone)]
pub struct LoadCycleReport {
    pub generation: u64,
    pub range: DateRange,
    pub balance: SectionResult<BalancePayload>,
    pub transactions: SectionResult<TransactionsPayload>,
    pub crypto: SectionResult<CryptoPayload>,
    /// Set iff all three sections loaded in this cycle and their figures
    /// combine without overflow.
    pub total_profit: Option<TotalProfit>,
    /// The balance step failed outside its own error handling.
    pub aborted: bool,
    /// A newer cycle started before this one finished; some or all of its
    /// results never reached the view.
    pub superseded: bool,
}

impl LoadCycleReport {
    /// Error message per failed section.
    pub fn errors(&self) -> BTreeMap<Section, String> {
        let mut errors = BTreeMap::new();
        if let Err(e) = &self.balance {
            errors.insert(Section::Balance, e.to_string());
        }
        if let Err(e) = &self.transactions {
            errors.insert(Section::Transactions, e.to_string());
        }
        if let Err(e) = &self.crypto {
            errors.insert(Section::Crypto, e.to_string());
        }
        errors
    }

    pub fn is_complete(&self) -> bool {
        self.total_profit.is_some()
    }
}

#[derive(Debug, Default)]
struct CycleState {
    generation: u64,
    range: Option<DateRange>,
    errors: BTreeMap<Section, String>,
}

/// Orchestrates the dashboard load sequence.
///
/// # Example
///
/// ```ignore
/// let view = Arc::new(HtmlDashboard::with_all_targets());
/// let loader = DashboardOrchestrator::new(Arc::new(client), view, LoaderConfig::default());
/// let report = loader.run_load_cycle(range).await;
/// ```
pub struct DashboardOrchestrator<V: DashboardView + 'static> {
    gateway: Arc<dyn DashboardGateway>,
    view: Arc<V>,
    config: LoaderConfig,
    state: Mutex<CycleState>,
}

impl<V: DashboardView + 'static> DashboardOrchestrator<V> {
    pub fn new(gateway: Arc<dyn DashboardGateway>, view: Arc<V>, config: LoaderConfig) -> Self {
        Self {
            gateway,
            view,
            config,
            state: Mutex::new(CycleState::default()),
        }
    }

    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    /// Range of the most recent cycle, if any started yet.
    pub fn current_range(&self) -> Option<DateRange> {
        self.lock_state().range
    }

    /// Generation of the most recent cycle (0 before the first one).
    pub fn generation(&self) -> u64 {
        self.lock_state().generation
    }

    /// Errors of the current cycle, keyed by section.
    pub fn section_errors(&self) -> BTreeMap<Section, String> {
        self.lock_state().errors.clone()
    }

    /// First cycle on page load: the date inputs if present, else the
    /// default window ending yesterday.
    pub async fn init(&self, inputs: Option<DateRange>) -> LoadCycleReport {
        let range =
            inputs.unwrap_or_else(|| DateRange::default_for(chrono::Local::now().date_naive()));
        self.run_load_cycle(range).await
    }

    /// The filter was submitted: take the re-read inputs and start over.
    ///
    /// Cycles still in flight are not cancelled, but nothing they produce
    /// reaches the view any more.
    pub async fn rerun_on_filter_change(&self, range: DateRange) -> LoadCycleReport {
        info!("Dashboard filter changed to {}", range);
        self.run_load_cycle(range).await
    }

    /// Run one complete load cycle for `range`.
    pub async fn run_load_cycle(&self, range: DateRange) -> LoadCycleReport {
        let generation = self.begin_cycle(range);
        info!("Starting dashboard load cycle {} for {}", generation, range);

        // Step 1: balance is the primary figure and settles first.
        let balance = match self.load_balance(generation, range).await {
            Ok(result) => result,
            Err(cause) => return self.abort_cycle(generation, range, &cause),
        };

        // Step 2: the other two sections race independently.
        let (transactions, crypto) = futures::join!(
            self.load_transactions(generation, range),
            self.load_crypto_variation(generation, range)
        );

        // Step 3: derive the total only from three loaded sections.
        let total_profit = match (&balance, &transactions, &crypto) {
            (Ok(b), Ok(t), Ok(c)) => self.compute_total_profit(generation, b, t, c),
            _ => None,
        };

        let superseded = !self.is_current(generation);
        let report = LoadCycleReport {
            generation,
            range,
            balance,
            transactions,
            crypto,
            total_profit,
            aborted: false,
            superseded,
        };

        info!(
            "Dashboard load cycle {} finished: {} section error(s){}",
            generation,
            report.errors().len(),
            if superseded { " (superseded)" } else { "" }
        );
        report
    }

    /// Derive and render the total profit from three loaded payloads.
    ///
    /// A total that does not fit a `Decimal` is skipped and the card keeps
    /// its previous content.
    pub fn compute_total_profit(
        &self,
        generation: u64,
        balance: &BalancePayload,
        transactions: &TransactionsPayload,
        crypto: &CryptoPayload,
    ) -> Option<TotalProfit> {
        let Some(total) = TotalProfit::compute(balance, transactions, crypto) else {
            warn!("Total profit for cycle {} overflowed, skipping", generation);
            return None;
        };
        let state = self.lock_state();
        if state.generation == generation {
            debug!("Total profit for cycle {}: {}", generation, total.value);
            self.view.render_total_profit(&total);
        } else {
            debug!("Discarding total profit of stale cycle {}", generation);
        }
        Some(total)
    }

    fn begin_cycle(&self, range: DateRange) -> u64 {
        let mut state = self.lock_state();
        state.generation += 1;
        state.range = Some(range);
        state.errors.clear();
        for section in Section::ALL {
            self.view.show_skeleton(section);
        }
        state.generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.lock_state().generation == generation
    }

    /// Runs the balance fetch on its own task so a failure outside the
    /// fetch's error handling is caught instead of tearing down the caller.
    async fn load_balance(
        &self,
        generation: u64,
        range: DateRange,
    ) -> Result<SectionResult<BalancePayload>, String> {
        let gateway = Arc::clone(&self.gateway);
        let budget = self.config.request_timeout;
        let handle = tokio::spawn(async move {
            fetch_with_timeout(Section::Balance, budget, gateway.fetch_balance(&range)).await
        });

        let result = handle.await.map_err(|e| e.to_string())?;
        self.settle(generation, Section::Balance, &result, |view, data| {
            view.render_balance(data)
        });
        Ok(result)
    }

    async fn load_transactions(
        &self,
        generation: u64,
        range: DateRange,
    ) -> SectionResult<TransactionsPayload> {
        let result = fetch_with_timeout(
            Section::Transactions,
            self.config.request_timeout,
            self.gateway.fetch_transactions(&range),
        )
        .await;
        self.settle(generation, Section::Transactions, &result, |view, data| {
            view.render_transactions(data)
        });
        result
    }

    async fn load_crypto_variation(
        &self,
        generation: u64,
        range: DateRange,
    ) -> SectionResult<CryptoPayload> {
        let result = fetch_with_timeout(
            Section::Crypto,
            self.config.request_timeout,
            self.gateway.fetch_crypto_variation(&range),
        )
        .await;
        self.settle(generation, Section::Crypto, &result, |view, data| {
            view.render_crypto_variation(data)
        });
        result
    }

    /// Push a section outcome to the view if its cycle is still current.
    fn settle<T>(
        &self,
        generation: u64,
        section: Section,
        result: &SectionResult<T>,
        render: impl FnOnce(&V, &T),
    ) {
        let mut state = self.lock_state();
        if state.generation != generation {
            debug!(
                "Discarding stale {} result of cycle {} (current is {})",
                section, generation, state.generation
            );
            return;
        }

        match result {
            Ok(data) => {
                state.errors.remove(&section);
                render(self.view.as_ref(), data);
            }
            Err(err) => {
                let message = err.to_string();
                warn!("Error loading {} section: {}", section, message);
                self.view.show_section_error(section, &message);
                state.errors.insert(section, message);
            }
        }
    }

    /// The balance step blew up outside its handler: raise the page banner
    /// and settle every section so none is left loading.
    fn abort_cycle(&self, generation: u64, range: DateRange, cause: &str) -> LoadCycleReport {
        error!("Error loading dashboard data: {}", cause);

        let current = {
            let mut state = self.lock_state();
            let current = state.generation == generation;
            if current {
                for section in Section::ALL {
                    self.view.show_section_error(section, CYCLE_FAILED_MESSAGE);
                    state
                        .errors
                        .insert(section, CYCLE_FAILED_MESSAGE.to_string());
                }
            }
            current
        };

        if current {
            self.raise_banner(CYCLE_FAILED_MESSAGE);
        }

        LoadCycleReport {
            generation,
            range,
            balance: Err(cycle_failure()),
            transactions: Err(cycle_failure()),
            crypto: Err(cycle_failure()),
            total_profit: None,
            aborted: true,
            superseded: !current,
        }
    }

    fn raise_banner(&self, message: &str) {
        let id = self.view.show_banner(message);
        let view = Arc::clone(&self.view);
        let delay = self.config.banner_dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            view.dismiss_banner(id);
        });
    }

    fn lock_state(&self) -> MutexGuard<'_, CycleState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Dashboard loader state mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

fn cycle_failure() -> SectionError {
    SectionError::Unexpected(CYCLE_FAILED_MESSAGE.to_string())
}

/// Run one gateway call under `budget` and fold every failure mode into the
/// section's outcome.
async fn fetch_with_timeout<T, F>(section: Section, budget: Duration, request: F) -> SectionResult<T>
where
    F: Future<Output = GatewayResult<ApiEnvelope<T>>>,
{
    match tokio::time::timeout(budget, request).await {
        Err(_) => {
            debug!("{} fetch exceeded {:?}", section, budget);
            Err(SectionError::Timeout)
        }
        Ok(Err(err)) => Err(err.into()),
        Ok(Ok(envelope)) => envelope.into_section_result(section),
    }
}
