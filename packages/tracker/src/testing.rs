//! Testing utilities including mock implementations.
//!
//! Useful for testing orchestration logic without any network or identity
//! provider. The mocks are scripted: queue up outcomes and every call pops
//! the next one, defaulting to success when the script runs dry.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::{Result, TrackerError};
use crate::traits::notify::{Notice, Notifier};
use crate::traits::remote::RemoteSink;
use crate::types::record::JobRecord;

/// Scripted result for one mock remote call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Success,
    NetworkError,
    AuthError,
    ApiError { status: u16, message: String },
}

impl MockOutcome {
    fn into_result(self) -> Result<()> {
        match self {
            MockOutcome::Success => Ok(()),
            MockOutcome::NetworkError => {
                Err(TrackerError::Network("connection refused (mock)".into()))
            }
            MockOutcome::AuthError => {
                Err(TrackerError::Authentication("token rejected (mock)".into()))
            }
            MockOutcome::ApiError { status, message } => {
                Err(TrackerError::RemoteApi { status, message })
            }
        }
    }
}

/// A mock remote sink with scripted outcomes and call tracking.
#[derive(Default)]
pub struct MockRemote {
    append_script: Mutex<VecDeque<MockOutcome>>,
    validate_script: Mutex<VecDeque<MockOutcome>>,
    appended: Mutex<Vec<JobRecord>>,
    append_attempts: AtomicUsize,
    validate_attempts: AtomicUsize,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the outcomes of successive `append` calls.
    pub fn with_append_outcomes(self, outcomes: impl IntoIterator<Item = MockOutcome>) -> Self {
        self.append_script.lock().unwrap().extend(outcomes);
        self
    }

    /// Script the outcomes of successive `validate` calls.
    pub fn with_validate_outcomes(self, outcomes: impl IntoIterator<Item = MockOutcome>) -> Self {
        self.validate_script.lock().unwrap().extend(outcomes);
        self
    }

    /// Records that were appended successfully.
    pub fn appended(&self) -> Vec<JobRecord> {
        self.appended.lock().unwrap().clone()
    }

    pub fn append_attempts(&self) -> usize {
        self.append_attempts.load(Ordering::SeqCst)
    }

    pub fn validate_attempts(&self) -> usize {
        self.validate_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteSink for MockRemote {
    async fn validate(&self, _sheet_id: &str) -> Result<()> {
        self.validate_attempts.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .validate_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MockOutcome::Success);
        outcome.into_result()
    }

    async fn append(&self, _sheet_id: &str, record: &JobRecord) -> Result<()> {
        self.append_attempts.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .append_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MockOutcome::Success);
        let result = outcome.into_result();
        if result.is_ok() {
            self.appended.lock().unwrap().push(record.clone());
        }
        result
    }

    async fn authenticate(&self) -> Result<()> {
        Ok(())
    }
}

/// Captures notices for assertions.
#[derive(Default)]
pub struct MockNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for MockNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}
