//! Unit tests for the dashboard load orchestrator.

use super::*;
use crate::gateway::{ApiEnvelope, DashboardGateway, GatewayError, GatewayResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use fundboard_core::{
    BalancePayload, CryptoPayload, DateRange, Section, SectionError, TotalProfit,
    TransactionsPayload,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

// ============================================================================
// Mock Implementations
// ============================================================================

#[derive(Debug, Clone)]
enum Behavior {
    Succeed,
    /// Succeed with this headline figure instead of the default one.
    SucceedWith(Decimal),
    Http(u16, &'static str),
    Declined(Option<&'static str>),
    Transport(&'static str),
    Hang,
    Panic,
}

#[derive(Debug, Clone)]
struct Step {
    delay: Duration,
    behavior: Behavior,
}

impl Step {
    fn now(behavior: Behavior) -> Self {
        Self {
            delay: Duration::ZERO,
            behavior,
        }
    }

    fn after(millis: u64, behavior: Behavior) -> Self {
        Self {
            delay: Duration::from_millis(millis),
            behavior,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Started,
    Settled,
}

/// Gateway whose answers are scripted per section, one step per call.
/// Sections without a script answer successfully right away.
#[derive(Default)]
struct MockGateway {
    scripts: Mutex<HashMap<Section, VecDeque<Step>>>,
    calls: Mutex<Vec<(Section, Phase, Instant)>>,
}

impl MockGateway {
    fn new() -> Self {
        Self::default()
    }

    fn script(self, section: Section, steps: Vec<Step>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(section, steps.into_iter().collect());
        self
    }

    fn calls(&self) -> Vec<(Section, Phase, Instant)> {
        self.calls.lock().unwrap().clone()
    }

    fn position(&self, section: Section, phase: Phase) -> usize {
        self.calls()
            .iter()
            .position(|(s, p, _)| *s == section && *p == phase)
            .unwrap()
    }

    fn instant(&self, section: Section, phase: Phase) -> Instant {
        self.calls()
            .into_iter()
            .find(|(s, p, _)| *s == section && *p == phase)
            .map(|(_, _, at)| at)
            .unwrap()
    }

    fn record(&self, section: Section, phase: Phase) {
        self.calls
            .lock()
            .unwrap()
            .push((section, phase, Instant::now()));
    }

    async fn respond<T>(
        &self,
        section: Section,
        payload: fn(Decimal) -> T,
    ) -> GatewayResult<ApiEnvelope<T>> {
        let step = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&section)
            .and_then(|steps| steps.pop_front())
            .unwrap_or_else(|| Step::now(Behavior::Succeed));

        self.record(section, Phase::Started);
        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }

        let outcome = match step.behavior {
            Behavior::Succeed => Ok(ApiEnvelope::ok(payload(default_figure(section)))),
            Behavior::SucceedWith(figure) => Ok(ApiEnvelope::ok(payload(figure))),
            Behavior::Http(status, text) => Err(GatewayError::Http {
                status,
                status_text: text.to_string(),
            }),
            Behavior::Declined(message) => Ok(ApiEnvelope {
                success: false,
                data: None,
                error: message.map(str::to_string),
            }),
            Behavior::Transport(message) => Err(GatewayError::Request(message.to_string())),
            Behavior::Hang => std::future::pending().await,
            Behavior::Panic => panic!("{} gateway exploded", section),
        };
        self.record(section, Phase::Settled);
        outcome
    }
}

#[async_trait]
impl DashboardGateway for MockGateway {
    async fn fetch_balance(&self, _range: &DateRange) -> GatewayResult<ApiEnvelope<BalancePayload>> {
        self.respond(Section::Balance, balance_with).await
    }

    async fn fetch_transactions(
        &self,
        _range: &DateRange,
    ) -> GatewayResult<ApiEnvelope<TransactionsPayload>> {
        self.respond(Section::Transactions, transactions_with).await
    }

    async fn fetch_crypto_variation(
        &self,
        _range: &DateRange,
    ) -> GatewayResult<ApiEnvelope<CryptoPayload>> {
        self.respond(Section::Crypto, crypto_with).await
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ViewEvent {
    Skeleton(Section),
    Balance(Decimal),
    Transactions(Decimal),
    Crypto(Decimal),
    Error(Section, String),
    Total(Decimal),
    Banner(u64, String),
    Dismissed(u64),
}

impl ViewEvent {
    /// The section this event settles, if it is a populated or error view.
    fn settles(&self) -> Option<Section> {
        match self {
            ViewEvent::Balance(_) => Some(Section::Balance),
            ViewEvent::Transactions(_) => Some(Section::Transactions),
            ViewEvent::Crypto(_) => Some(Section::Crypto),
            ViewEvent::Error(section, _) => Some(*section),
            _ => None,
        }
    }
}

#[derive(Default)]
struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
    next_banner: AtomicU64,
}

impl RecordingView {
    fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl DashboardView for RecordingView {
    fn show_skeleton(&self, section: Section) {
        self.push(ViewEvent::Skeleton(section));
    }

    fn render_balance(&self, data: &BalancePayload) {
        self.push(ViewEvent::Balance(data.balance_difference));
    }

    fn render_transactions(&self, data: &TransactionsPayload) {
        self.push(ViewEvent::Transactions(data.transactions_difference));
    }

    fn render_crypto_variation(&self, data: &CryptoPayload) {
        self.push(ViewEvent::Crypto(data.total_variation));
    }

    fn show_section_error(&self, section: Section, message: &str) {
        self.push(ViewEvent::Error(section, message.to_string()));
    }

    fn render_total_profit(&self, total: &TotalProfit) {
        self.push(ViewEvent::Total(total.value));
    }

    fn show_banner(&self, message: &str) -> BannerId {
        let id = self.next_banner.fetch_add(1, Ordering::SeqCst) + 1;
        self.push(ViewEvent::Banner(id, message.to_string()));
        BannerId(id)
    }

    fn dismiss_banner(&self, id: BannerId) {
        self.push(ViewEvent::Dismissed(id.0));
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn default_figure(section: Section) -> Decimal {
    match section {
        Section::Balance => dec!(50),
        Section::Transactions => dec!(20),
        Section::Crypto => dec!(10),
    }
}

fn balance_with(difference: Decimal) -> BalancePayload {
    BalancePayload {
        start_balance_sum: Decimal::ZERO,
        end_balance_sum: difference,
        balance_difference: difference,
        start_date: None,
        end_date: None,
    }
}

fn transactions_with(difference: Decimal) -> TransactionsPayload {
    TransactionsPayload {
        transactions_difference: difference,
        investor_transactions: Vec::new(),
        start_transactions_sum: None,
        end_transactions_sum: None,
    }
}

fn crypto_with(variation: Decimal) -> CryptoPayload {
    CryptoPayload {
        total_variation: variation,
        variations_by_currency: Vec::new(),
    }
}

fn crypto_payload() -> CryptoPayload {
    crypto_with(default_figure(Section::Crypto))
}

fn transactions_payload() -> TransactionsPayload {
    transactions_with(default_figure(Section::Transactions))
}

fn march() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    )
}

fn april() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
    )
}

fn loader(
    gateway: Arc<MockGateway>,
    view: Arc<RecordingView>,
) -> DashboardOrchestrator<RecordingView> {
    DashboardOrchestrator::new(gateway, view, LoaderConfig::default())
}

fn settle_counts(events: &[ViewEvent]) -> HashMap<Section, usize> {
    let mut counts = HashMap::new();
    for section in events.iter().filter_map(ViewEvent::settles) {
        *counts.entry(section).or_insert(0) += 1;
    }
    counts
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_successful_cycle_computes_total_profit() {
    let gateway = Arc::new(MockGateway::new());
    let view = Arc::new(RecordingView::default());
    let loader = loader(gateway, view.clone());

    let report = loader.run_load_cycle(march()).await;

    assert_eq!(report.total_profit, Some(TotalProfit { value: dec!(20) }));
    assert!(report.errors().is_empty());
    assert!(!report.aborted);
    assert!(!report.superseded);

    let events = view.events();
    assert_eq!(
        &events[..3],
        &[
            ViewEvent::Skeleton(Section::Balance),
            ViewEvent::Skeleton(Section::Transactions),
            ViewEvent::Skeleton(Section::Crypto),
        ]
    );
    assert_eq!(events[3], ViewEvent::Balance(dec!(50)));
    assert!(events.contains(&ViewEvent::Transactions(dec!(20))));
    assert!(events.contains(&ViewEvent::Crypto(dec!(10))));
    assert_eq!(events.last(), Some(&ViewEvent::Total(dec!(20))));
}

#[tokio::test(start_paused = true)]
async fn test_balance_settles_before_other_sections_start() {
    let gateway = Arc::new(
        MockGateway::new()
            .script(Section::Balance, vec![Step::after(250, Behavior::Succeed)])
            .script(Section::Crypto, vec![Step::after(40, Behavior::Succeed)]),
    );
    let view = Arc::new(RecordingView::default());
    let loader = loader(gateway.clone(), view);

    loader.run_load_cycle(march()).await;

    let balance_settled = gateway.position(Section::Balance, Phase::Settled);
    assert!(gateway.position(Section::Balance, Phase::Started) < balance_settled);
    assert!(balance_settled < gateway.position(Section::Transactions, Phase::Started));
    assert!(balance_settled < gateway.position(Section::Crypto, Phase::Started));

    let settled_at = gateway.instant(Section::Balance, Phase::Settled);
    assert!(settled_at <= gateway.instant(Section::Transactions, Phase::Started));
    assert!(settled_at <= gateway.instant(Section::Crypto, Phase::Started));
}

#[tokio::test(start_paused = true)]
async fn test_transactions_and_crypto_run_concurrently() {
    let gateway = Arc::new(
        MockGateway::new()
            .script(Section::Transactions, vec![Step::after(1_000, Behavior::Succeed)])
            .script(Section::Crypto, vec![Step::after(1_000, Behavior::Succeed)]),
    );
    let view = Arc::new(RecordingView::default());
    let loader = loader(gateway, view);

    let started = Instant::now();
    let report = loader.run_load_cycle(march()).await;

    assert!(report.is_complete());
    assert!(started.elapsed() < Duration::from_millis(1_500));
}

#[tokio::test]
async fn test_http_failure_in_transactions_leaves_crypto_intact() {
    let gateway = Arc::new(MockGateway::new().script(
        Section::Transactions,
        vec![Step::now(Behavior::Http(500, "Internal Server Error"))],
    ));
    let view = Arc::new(RecordingView::default());
    let loader = loader(gateway, view.clone());

    let report = loader.run_load_cycle(march()).await;

    assert_eq!(
        report.transactions,
        Err(SectionError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string()
        })
    );
    assert_eq!(report.crypto, Ok(crypto_payload()));
    assert_eq!(report.total_profit, None);

    let events = view.events();
    assert!(events.contains(&ViewEvent::Crypto(dec!(10))));
    assert!(events.contains(&ViewEvent::Error(
        Section::Transactions,
        "HTTP 500: Internal Server Error".to_string()
    )));
    assert!(!events.iter().any(|e| matches!(e, ViewEvent::Total(_))));
    assert_eq!(
        loader.section_errors().get(&Section::Transactions).map(String::as_str),
        Some("HTTP 500: Internal Server Error")
    );
}

#[tokio::test]
async fn test_crypto_failure_leaves_transactions_intact() {
    let gateway = Arc::new(MockGateway::new().script(
        Section::Crypto,
        vec![Step::now(Behavior::Transport("connection reset by peer"))],
    ));
    let view = Arc::new(RecordingView::default());
    let loader = loader(gateway, view.clone());

    let report = loader.run_load_cycle(march()).await;

    assert_eq!(report.transactions, Ok(transactions_payload()));
    assert_eq!(
        report.crypto,
        Err(SectionError::Unexpected("connection reset by peer".to_string()))
    );
    assert!(view.events().contains(&ViewEvent::Transactions(dec!(20))));
}

#[tokio::test]
async fn test_declared_failure_renders_gateway_message_verbatim() {
    let gateway = Arc::new(
        MockGateway::new().script(Section::Crypto, vec![Step::now(Behavior::Declined(Some("X")))]),
    );
    let view = Arc::new(RecordingView::default());
    let loader = loader(gateway, view.clone());

    let report = loader.run_load_cycle(march()).await;

    assert_eq!(report.crypto, Err(SectionError::Application("X".to_string())));
    assert!(view
        .events()
        .contains(&ViewEvent::Error(Section::Crypto, "X".to_string())));
}

#[tokio::test]
async fn test_declared_failure_without_message_uses_section_default() {
    let gateway = Arc::new(
        MockGateway::new().script(Section::Balance, vec![Step::now(Behavior::Declined(None))]),
    );
    let view = Arc::new(RecordingView::default());
    let loader = loader(gateway, view);

    let report = loader.run_load_cycle(march()).await;

    assert_eq!(
        report.errors().get(&Section::Balance).map(String::as_str),
        Some("Failed to load balance data")
    );
    // A failed balance does not stop the other two sections.
    assert!(report.transactions.is_ok());
    assert!(report.crypto.is_ok());
    assert_eq!(report.total_profit, None);
}

#[tokio::test(start_paused = true)]
async fn test_hanging_fetch_times_out_within_budget() {
    let gateway = Arc::new(MockGateway::new().script(Section::Crypto, vec![Step::now(Behavior::Hang)]));
    let view = Arc::new(RecordingView::default());
    let loader = loader(gateway, view.clone());

    let started = Instant::now();
    let report = loader.run_load_cycle(march()).await;
    let elapsed = started.elapsed();

    assert_eq!(report.crypto, Err(SectionError::Timeout));
    assert!(report.transactions.is_ok());
    assert!(elapsed >= Duration::from_secs(30));
    assert!(elapsed < Duration::from_secs(31));
    assert!(view.events().contains(&ViewEvent::Error(
        Section::Crypto,
        "Request timeout - calculation took too long".to_string()
    )));
}

#[tokio::test(start_paused = true)]
async fn test_configured_timeout_is_honoured() {
    let gateway = Arc::new(MockGateway::new().script(Section::Balance, vec![Step::now(Behavior::Hang)]));
    let view = Arc::new(RecordingView::default());
    let config = LoaderConfig {
        request_timeout: Duration::from_millis(500),
        ..LoaderConfig::default()
    };
    let loader = DashboardOrchestrator::new(gateway, view, config);

    let started = Instant::now();
    let report = loader.run_load_cycle(march()).await;

    assert_eq!(report.balance, Err(SectionError::Timeout));
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_every_section_settles_exactly_once() {
    let gateway = Arc::new(
        MockGateway::new()
            .script(Section::Balance, vec![Step::now(Behavior::Http(502, "Bad Gateway"))])
            .script(Section::Crypto, vec![Step::now(Behavior::Declined(Some("no prices")))]),
    );
    let view = Arc::new(RecordingView::default());
    let loader = loader(gateway, view.clone());

    loader.run_load_cycle(march()).await;

    let counts = settle_counts(&view.events());
    for section in Section::ALL {
        assert_eq!(counts.get(&section), Some(&1), "section {}", section);
    }
}

#[tokio::test(start_paused = true)]
async fn test_balance_task_failure_raises_banner_and_ends_cycle() {
    let gateway = Arc::new(MockGateway::new().script(Section::Balance, vec![Step::now(Behavior::Panic)]));
    let view = Arc::new(RecordingView::default());
    let loader = loader(gateway.clone(), view.clone());

    let report = loader.run_load_cycle(march()).await;

    assert!(report.aborted);
    assert_eq!(report.total_profit, None);
    assert_eq!(report.errors().len(), 3);
    // Step 2 never ran.
    assert!(!gateway
        .calls()
        .iter()
        .any(|(s, _, _)| *s != Section::Balance));

    let events = view.events();
    assert!(events.contains(&ViewEvent::Banner(
        1,
        "Failed to load dashboard data. Please try again.".to_string()
    )));
    let counts = settle_counts(&events);
    for section in Section::ALL {
        assert_eq!(counts.get(&section), Some(&1));
    }
    assert!(!events.contains(&ViewEvent::Dismissed(1)));

    tokio::time::sleep(Duration::from_millis(8_100)).await;
    assert!(view.events().contains(&ViewEvent::Dismissed(1)));
}

#[tokio::test(start_paused = true)]
async fn test_rerun_discards_stale_results_of_previous_cycle() {
    // The first cycle's balance fails late, after the second cycle started.
    let gateway = Arc::new(MockGateway::new().script(
        Section::Balance,
        vec![
            Step::after(100, Behavior::Http(500, "Internal Server Error")),
            Step::now(Behavior::Succeed),
        ],
    ));
    let view = Arc::new(RecordingView::default());
    let loader = loader(gateway, view.clone());

    let (first, second) = tokio::join!(loader.run_load_cycle(march()), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        loader.rerun_on_filter_change(april()).await
    });

    assert_eq!(first.generation, 1);
    assert!(first.superseded);
    assert!(first.balance.is_err());
    assert_eq!(second.generation, 2);
    assert!(!second.superseded);
    assert_eq!(second.total_profit, Some(TotalProfit { value: dec!(20) }));

    assert_eq!(loader.generation(), 2);
    assert_eq!(loader.current_range(), Some(april()));
    assert!(loader.section_errors().is_empty());
    assert!(!view
        .events()
        .iter()
        .any(|e| matches!(e, ViewEvent::Error(_, _))));
}

#[tokio::test(start_paused = true)]
async fn test_rerun_discards_late_successes_of_previous_cycle() {
    // Cycle 1's balance settles at 100ms, long after cycle 2 started at 10ms.
    // Steps are consumed in call order: cycle 2 reaches transactions and
    // crypto first, cycle 1 gets the second step.
    let gateway = Arc::new(
        MockGateway::new()
            .script(
                Section::Balance,
                vec![
                    Step::after(100, Behavior::SucceedWith(dec!(500))),
                    Step::now(Behavior::Succeed),
                ],
            )
            .script(
                Section::Transactions,
                vec![
                    Step::now(Behavior::Succeed),
                    Step::now(Behavior::SucceedWith(dec!(200))),
                ],
            )
            .script(
                Section::Crypto,
                vec![
                    Step::now(Behavior::Succeed),
                    Step::now(Behavior::SucceedWith(dec!(100))),
                ],
            ),
    );
    let view = Arc::new(RecordingView::default());
    let loader = loader(gateway, view.clone());

    let (first, second) = tokio::join!(loader.run_load_cycle(march()), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        loader.rerun_on_filter_change(april()).await
    });

    // The stale cycle still computed its own figures.
    assert!(first.superseded);
    assert_eq!(first.total_profit, Some(TotalProfit { value: dec!(200) }));
    assert_eq!(second.total_profit, Some(TotalProfit { value: dec!(20) }));

    // Only cycle 2 reached the view.
    let events = view.events();
    let populated: Vec<&ViewEvent> = events
        .iter()
        .filter(|e| !matches!(e, ViewEvent::Skeleton(_)))
        .collect();
    assert_eq!(populated.len(), 4, "{:?}", populated);
    assert!(populated.contains(&&ViewEvent::Balance(dec!(50))));
    assert!(populated.contains(&&ViewEvent::Transactions(dec!(20))));
    assert!(populated.contains(&&ViewEvent::Crypto(dec!(10))));
    assert_eq!(populated.last(), Some(&&ViewEvent::Total(dec!(20))));
}

#[tokio::test]
async fn test_total_overflow_is_skipped_without_failing_sections() {
    let gateway = Arc::new(
        MockGateway::new()
            .script(Section::Balance, vec![Step::now(Behavior::SucceedWith(Decimal::MAX))])
            .script(
                Section::Transactions,
                vec![Step::now(Behavior::SucceedWith(dec!(-1)))],
            ),
    );
    let view = Arc::new(RecordingView::default());
    let loader = loader(gateway, view.clone());

    let report = loader.run_load_cycle(march()).await;

    assert!(report.errors().is_empty());
    assert_eq!(report.total_profit, None);
    let events = view.events();
    assert!(events.contains(&ViewEvent::Crypto(dec!(10))));
    assert!(!events.iter().any(|e| matches!(e, ViewEvent::Total(_))));
    let counts = settle_counts(&events);
    for section in Section::ALL {
        assert_eq!(counts.get(&section), Some(&1));
    }
}

#[tokio::test]
async fn test_rerun_clears_previous_errors() {
    let gateway = Arc::new(MockGateway::new().script(
        Section::Transactions,
        vec![Step::now(Behavior::Http(500, "Internal Server Error"))],
    ));
    let view = Arc::new(RecordingView::default());
    let loader = loader(gateway, view.clone());

    loader.run_load_cycle(march()).await;
    assert_eq!(loader.section_errors().len(), 1);

    let report = loader.rerun_on_filter_change(april()).await;
    assert!(report.is_complete());
    assert!(loader.section_errors().is_empty());
    assert_eq!(view.events().last(), Some(&ViewEvent::Total(dec!(20))));
}

#[tokio::test]
async fn test_headless_cycle_uses_given_inputs() {
    let gateway = Arc::new(MockGateway::new());
    let loader = DashboardOrchestrator::new(gateway, Arc::new(NoOpView), LoaderConfig::default());

    assert_eq!(loader.generation(), 0);
    assert_eq!(loader.current_range(), None);

    let report = loader.init(Some(march())).await;
    assert_eq!(report.range, march());
    assert!(report.is_complete());
    assert_eq!(loader.current_range(), Some(march()));
}
