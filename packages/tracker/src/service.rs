//! Typed message API.
//!
//! The host surfaces (popup, content script, CLI) speak this request/response
//! protocol; [`handle`] dispatches onto the orchestrator. Shapes round-trip
//! the original extension's JSON messages, camelCase on the wire.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::TrackerError;
use crate::export;
use crate::extract::{self, PageSnapshot};
use crate::sync::{SaveOutcome, Tracker};
use crate::traits::remote::RemoteSink;
use crate::traits::store::TrackerStore;
use crate::types::config::{StorageMode, TrackerConfig};
use crate::types::record::JobRecord;

/// How many records `getRecentJobs` returns.
const RECENT_LIMIT: usize = 10;

const QUEUED_MESSAGE: &str =
    "saved to the offline queue; it will sync automatically when the connection recovers";
const NO_DATA_MESSAGE: &str =
    "no job information detected; check that the page has fully loaded";

/// An incoming message action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    #[serde(rename_all = "camelCase")]
    SaveJob { job_data: JobRecord },
    #[serde(rename_all = "camelCase")]
    CheckDuplicate { job_key: String },
    GetConfig,
    SaveConfig { config: TrackerConfig },
    Authenticate,
    GetRecentJobs,
    SyncOfflineQueue,
    #[serde(rename = "exportCSV")]
    ExportCsv,
    GetAllJobs,
    ExtractNow { url: String, html: String },
}

/// A response, shaped per action.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Save {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        mode: Option<StorageMode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Duplicate {
        #[serde(rename = "isDuplicate")]
        is_duplicate: bool,
    },
    Config {
        success: bool,
        config: TrackerConfig,
    },
    Jobs {
        success: bool,
        jobs: Vec<JobRecord>,
    },
    Csv {
        success: bool,
        csv: String,
        count: usize,
    },
    Extraction {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<JobRecord>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Ack {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl Response {
    fn ok() -> Self {
        Response::Ack {
            success: true,
            error: None,
        }
    }

    fn err(error: impl ToString) -> Self {
        Response::Ack {
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// Dispatch one request.
pub async fn handle<S: TrackerStore, R: RemoteSink>(
    tracker: &Tracker<S, R>,
    request: Request,
) -> Response {
    match request {
        Request::SaveJob { job_data } => match tracker.save(&job_data).await {
            Ok(SaveOutcome::Local) => Response::Save {
                success: true,
                mode: Some(StorageMode::Local),
                error: None,
            },
            Ok(SaveOutcome::Remote) => Response::Save {
                success: true,
                mode: Some(StorageMode::Sheets),
                error: None,
            },
            // Queued is not a hard failure: the caller is told the record
            // is safe and will sync later
            Ok(SaveOutcome::Queued) => Response::Save {
                success: false,
                mode: None,
                error: Some(QUEUED_MESSAGE.to_string()),
            },
            Err(e) => Response::Save {
                success: false,
                mode: None,
                error: Some(e.to_string()),
            },
        },

        Request::CheckDuplicate { job_key } => match tracker.check_duplicate(&job_key).await {
            Ok(is_duplicate) => Response::Duplicate { is_duplicate },
            Err(e) => Response::err(e),
        },

        Request::GetConfig => match tracker.config().await {
            Ok(config) => Response::Config {
                success: true,
                config,
            },
            Err(e) => Response::err(e),
        },

        Request::SaveConfig { config } => match tracker.save_config(&config).await {
            Ok(()) => Response::ok(),
            Err(e) => Response::err(e),
        },

        Request::Authenticate => match tracker.authenticate().await {
            Ok(()) => Response::ok(),
            Err(e) => Response::err(e),
        },

        Request::GetRecentJobs => match tracker.recent_jobs(RECENT_LIMIT).await {
            Ok(jobs) => Response::Jobs {
                success: true,
                jobs,
            },
            Err(e) => Response::err(e),
        },

        Request::SyncOfflineQueue => {
            // Drain failures only affect what stays queued; never surfaced here
            if let Err(e) = tracker.drain_queue().await {
                warn!(error = %e, "requested drain failed");
            }
            Response::ok()
        }

        Request::ExportCsv => {
            let result = async {
                let jobs = tracker.all_jobs().await?;
                let config = tracker.config().await?;
                let csv = export::to_csv(&jobs, &config.column_mapping)?;
                Ok::<_, TrackerError>((csv, jobs.len()))
            }
            .await;
            match result {
                Ok((csv, count)) => Response::Csv {
                    success: true,
                    csv,
                    count,
                },
                Err(e) => Response::err(e),
            }
        }

        Request::GetAllJobs => match tracker.all_jobs().await {
            Ok(jobs) => Response::Jobs {
                success: true,
                jobs,
            },
            Err(e) => Response::err(e),
        },

        Request::ExtractNow { url, html } => {
            let page = match PageSnapshot::new(&url, html) {
                Ok(page) => page,
                Err(e) => {
                    return Response::Extraction {
                        success: false,
                        data: None,
                        message: None,
                        error: Some(e.to_string()),
                    }
                }
            };

            let data = if extract::is_job_page(&page) {
                extract::extract(&page)
            } else {
                None
            };

            match data {
                Some(record) => Response::Extraction {
                    success: true,
                    data: Some(record),
                    message: None,
                    error: None,
                },
                None => Response::Extraction {
                    success: false,
                    data: None,
                    message: Some(NO_DATA_MESSAGE.to_string()),
                    error: None,
                },
            }
        }
    }
}
