use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Local};
use log::debug;
use serde::{Deserialize, Serialize};

/// Consistent copy of the series, as returned to a polling client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    /// Most recent concentration estimate (0 before the first batch)
    pub current_concentration: f64,
    /// Concentration estimates in ingestion order
    pub concentration_history: Vec<f64>,
    /// Receipt time of each estimate, parallel to `concentration_history`
    pub time_history: Vec<DateTime<Local>>,
    /// Current trace of the most recent batch
    pub latest_current: Vec<f64>,
    /// Voltage trace of the most recent batch
    pub latest_voltage: Vec<f64>,
}

#[derive(Debug, Default)]
struct SeriesState {
    current_concentration: f64,
    concentration_history: VecDeque<f64>,
    time_history: VecDeque<DateTime<Local>>,
    latest_current: Vec<f64>,
    latest_voltage: Vec<f64>,
}

/// Append-only concentration time series shared between ingest and query.
#[derive(Debug, Default)]
pub struct SeriesStore {
    state: RwLock<SeriesState>,
    retention: Option<NonZeroUsize>,
}

impl SeriesStore {
    /// Create an empty, unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store keeping at most `retention` history entries.
    ///
    /// Once full, each append evicts the oldest entry from both histories.
    pub fn with_retention(retention: NonZeroUsize) -> Self {
        Self {
            state: RwLock::default(),
            retention: Some(retention),
        }
    }

    /// History cap, if any
    pub fn retention(&self) -> Option<NonZeroUsize> {
        self.retention
    }

    /// Record one estimate and replace the latest traces.
    pub fn append(
        &self,
        concentration: f64,
        timestamp: DateTime<Local>,
        currents: Vec<f64>,
        voltages: Vec<f64>,
    ) {
        let mut state = self.write();

        if let Some(cap) = self.retention {
            while state.concentration_history.len() >= cap.get() {
                state.concentration_history.pop_front();
                state.time_history.pop_front();
            }
        }

        state.concentration_history.push_back(concentration);
        state.time_history.push_back(timestamp);
        state.current_concentration = concentration;
        state.latest_current = currents;
        state.latest_voltage = voltages;

        debug!(
            "Series append: concentration={} (history length {})",
            concentration,
            state.concentration_history.len()
        );
    }

    /// Copy the full series under the read lock
    pub fn snapshot(&self) -> SeriesSnapshot {
        let state = self.read();
        SeriesSnapshot {
            current_concentration: state.current_concentration,
            concentration_history: state.concentration_history.iter().copied().collect(),
            time_history: state.time_history.iter().copied().collect(),
            latest_current: state.latest_current.clone(),
            latest_voltage: state.latest_voltage.clone(),
        }
    }

    /// Number of estimates currently held
    pub fn len(&self) -> usize {
        self.read().concentration_history.len()
    }

    /// True before the first append
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most recent estimate (0 before the first append)
    pub fn current_concentration(&self) -> f64 {
        self.read().current_concentration
    }

    // A panic while holding the lock cannot leave the histories at different
    // lengths, so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, SeriesState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SeriesState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
