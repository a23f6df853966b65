//! Test doubles for the dashboard seams

use super::bindings::{ElementId, Fragment, Slot, ViewHost};
use super::charts::{Chart, ChartConfig, ChartData, ChartFactory, UpdateMode};
use crate::push::{SourceError, SourceEvent, UpdateSource};
use crate::snapshot::{CurrencyQuote, ExchangeStatus, IndexQuote, MarketSnapshot};

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

type FragmentLog = Arc<Mutex<HashMap<ElementId, Vec<Fragment>>>>;

/// A view host that records every fragment written to it.
#[derive(Clone, Default)]
pub struct FakeHost {
    missing: Vec<ElementId>,
    log: FragmentLog,
}

impl FakeHost {
    pub fn without(missing: &[ElementId]) -> Self {
        Self {
            missing: missing.to_vec(),
            log: FragmentLog::default(),
        }
    }

    pub fn last(&self, id: ElementId) -> Option<Fragment> {
        self.log
            .lock()
            .unwrap()
            .get(&id)
            .and_then(|history| history.last().cloned())
    }

    /// The current content of every written slot.
    pub fn snapshot_all(&self) -> HashMap<ElementId, Fragment> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(id, history)| history.last().map(|last| (*id, last.clone())))
            .collect()
    }
}

struct FakeSlot {
    id: ElementId,
    log: FragmentLog,
}

impl Slot for FakeSlot {
    fn replace(&mut self, fragment: Fragment) {
        self.log
            .lock()
            .unwrap()
            .entry(self.id)
            .or_default()
            .push(fragment);
    }
}

impl ViewHost for FakeHost {
    fn bind(&self, id: ElementId) -> Option<Box<dyn Slot>> {
        if self.missing.contains(&id) {
            return None;
        }
        Some(Box::new(FakeSlot {
            id,
            log: self.log.clone(),
        }))
    }
}

/// What happened to one fake chart.
#[derive(Debug, Clone, Default)]
pub struct FakeChartRecord {
    pub data: ChartData,
    pub updates: Vec<UpdateMode>,
    pub resizes: usize,
}

#[derive(Default)]
struct FactoryInner {
    declined: Vec<ElementId>,
    created: usize,
    records: HashMap<ElementId, Arc<Mutex<FakeChartRecord>>>,
}

#[derive(Clone, Default)]
pub struct FakeChartFactory {
    inner: Arc<Mutex<FactoryInner>>,
}

impl FakeChartFactory {
    pub fn declining(declined: &[ElementId]) -> Self {
        let factory = Self::default();
        factory.inner.lock().unwrap().declined = declined.to_vec();
        factory
    }

    pub fn created(&self) -> usize {
        self.inner.lock().unwrap().created
    }

    pub fn record(&self, canvas: ElementId) -> FakeChartRecord {
        self.inner
            .lock()
            .unwrap()
            .records
            .get(&canvas)
            .map(|record| record.lock().unwrap().clone())
            .unwrap_or_default()
    }
}

impl ChartFactory for FakeChartFactory {
    fn create(&mut self, canvas: ElementId, config: ChartConfig) -> Option<Box<dyn Chart>> {
        let mut inner = self.inner.lock().unwrap();
        if inner.declined.contains(&canvas) {
            return None;
        }
        inner.created += 1;
        let record = Arc::new(Mutex::new(FakeChartRecord::default()));
        inner.records.insert(canvas, record.clone());
        Some(Box::new(FakeChart {
            config,
            data: ChartData::default(),
            record,
        }))
    }
}

struct FakeChart {
    config: ChartConfig,
    data: ChartData,
    record: Arc<Mutex<FakeChartRecord>>,
}

impl Chart for FakeChart {
    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn data(&self) -> &ChartData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut ChartData {
        &mut self.data
    }

    fn update(&mut self, mode: UpdateMode) {
        let mut record = self.record.lock().unwrap();
        record.data = self.data.clone();
        record.updates.push(mode);
    }

    fn resize(&mut self) {
        self.record.lock().unwrap().resizes += 1;
    }
}

/// An update source that never connects on its own; tests inject its events.
#[derive(Clone, Default)]
pub struct FakeSource {
    requests: Arc<AtomicUsize>,
    fail_requests: Arc<AtomicBool>,
    cancel: Arc<Mutex<Option<CancellationToken>>>,
}

impl FakeSource {
    pub fn fail_requests(&self) {
        self.fail_requests.store(true, Ordering::SeqCst);
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn started(&self) -> bool {
        self.cancel.lock().unwrap().is_some()
    }

    pub fn cancelled(&self) -> bool {
        self.cancel
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}

impl UpdateSource for FakeSource {
    fn start(
        &mut self,
        events: mpsc::Sender<SourceEvent>,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        *self.cancel.lock().unwrap() = Some(cancel.clone());
        tokio::spawn(async move {
            cancel.cancelled().await;
            drop(events);
        })
    }

    fn request_update(&self) -> Result<(), SourceError> {
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(SourceError::NotConnected);
        }
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// B3 open, one alerting and one quiet quote per section.
pub fn sample_snapshot() -> MarketSnapshot {
    MarketSnapshot {
        market_status: Some(
            vec![(
                "B3".to_string(),
                ExchangeStatus {
                    is_open: true,
                    next_open: None,
                    next_close: None,
                },
            )]
            .into_iter()
            .collect(),
        ),
        cambio: Some(
            vec![
                (
                    "USD-BRL",
                    CurrencyQuote {
                        rate: 5.4321,
                        change_percent: -2.4,
                        source: "BCB".to_string(),
                        change: None,
                        timestamp: None,
                    },
                ),
                (
                    "XYZ-ABC",
                    CurrencyQuote {
                        rate: 1234.5,
                        change_percent: 0.5,
                        source: "AwesomeAPI".to_string(),
                        change: None,
                        timestamp: None,
                    },
                ),
            ]
            .into_iter()
            .collect(),
        ),
        bolsa: Some(
            vec![
                ("IBOV", index_quote(128_456.78, 3.5, 4_100_000_000.0)),
                ("SP500", index_quote(5_123.4, -0.8, 2_300_000.0)),
            ]
            .into_iter()
            .collect(),
        ),
        timestamp: Some("2025-03-14T10:15:30".to_string()),
    }
}

fn index_quote(price: f64, change_percent: f64, volume: f64) -> IndexQuote {
    IndexQuote {
        price,
        change_percent,
        volume,
        change: None,
        open: None,
        high: None,
        low: None,
        symbol: None,
        source: None,
        timestamp: None,
    }
}
