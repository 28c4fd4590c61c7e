//! End-to-end pipeline scenarios through the message API.

use tracker::testing::{MockOutcome, MockRemote};
use tracker::{
    handle, ConfigStore, JobRecord, MemoryStore, QueueStore, Request, StorageMode, Tracker,
    TrackerConfig,
};

async fn tracker_with(
    mode: StorageMode,
    sheet_id: &str,
    remote: MockRemote,
) -> Tracker<MemoryStore, MockRemote> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("tracker=debug")
        .with_test_writer()
        .try_init();

    let store = MemoryStore::new();
    store
        .store_config(&TrackerConfig::new().with_mode(mode).with_sheet_id(sheet_id))
        .await
        .unwrap();
    Tracker::new(store, remote)
}

fn save_request(title: &str, link: &str) -> Request {
    Request::SaveJob {
        job_data: JobRecord::new(title, link),
    }
}

#[tokio::test]
async fn local_save_then_duplicate_through_the_api() {
    let tracker = tracker_with(StorageMode::Local, "", MockRemote::new()).await;

    let response = handle(&tracker, save_request("Engineer", "http://x/1")).await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["mode"], "local");

    let response = handle(&tracker, save_request("Engineer", "http://x/1")).await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("duplicate"));
}

#[tokio::test]
async fn sheets_mode_without_sheet_id_is_a_config_error_not_a_queue_entry() {
    let tracker = tracker_with(StorageMode::Sheets, "", MockRemote::new()).await;

    let response = handle(&tracker, save_request("Engineer", "http://x/1")).await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("sheet id"));

    assert!(tracker.store().queued().await.unwrap().is_empty());
}

#[tokio::test]
async fn network_failure_reports_queued_and_lands_in_the_queue() {
    let remote = MockRemote::new().with_append_outcomes([MockOutcome::NetworkError]);
    let tracker = tracker_with(StorageMode::Sheets, "sheet-1", remote).await;

    let response = handle(&tracker, save_request("Engineer", "http://x/1")).await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("offline queue"));

    let queued = tracker.store().queued().await.unwrap();
    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].data.job_title, "Engineer");
}

#[tokio::test]
async fn sync_action_drains_the_queue() {
    let remote = MockRemote::new().with_append_outcomes([
        MockOutcome::NetworkError, // initial save fails
        MockOutcome::Success,      // drain succeeds
    ]);
    let tracker = tracker_with(StorageMode::Sheets, "sheet-1", remote).await;

    handle(&tracker, save_request("Engineer", "http://x/1")).await;
    assert_eq!(tracker.store().queued().await.unwrap().len(), 1);

    let response = handle(&tracker, Request::SyncOfflineQueue).await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], true);

    assert!(tracker.store().queued().await.unwrap().is_empty());
    assert_eq!(tracker.remote().appended().len(), 1);
}

#[tokio::test]
async fn get_all_jobs_unions_journal_and_queue() {
    let remote = MockRemote::new().with_append_outcomes([
        MockOutcome::NetworkError,
        MockOutcome::NetworkError,
    ]);
    let tracker = tracker_with(StorageMode::Sheets, "sheet-1", remote).await;

    // Both saves are journaled and queued; the shared identity key must
    // appear exactly once in the union
    handle(&tracker, save_request("Engineer", "http://x/1")).await;
    handle(&tracker, save_request("Analyst", "http://x/2")).await;

    let response = handle(&tracker, Request::GetAllJobs).await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["jobs"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn recent_jobs_is_limited_to_ten() {
    let tracker = tracker_with(StorageMode::Local, "", MockRemote::new()).await;

    for n in 0..15 {
        handle(
            &tracker,
            save_request(&format!("Job {n}"), &format!("http://x/{n}")),
        )
        .await;
    }

    let response = handle(&tracker, Request::GetRecentJobs).await;
    let json = serde_json::to_value(&response).unwrap();
    let jobs = json["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 10);
    assert_eq!(jobs[0]["jobTitle"], "Job 14");
}

#[tokio::test]
async fn export_covers_journal_and_queue() {
    let remote = MockRemote::new().with_append_outcomes([MockOutcome::NetworkError]);
    let tracker = tracker_with(StorageMode::Sheets, "sheet-1", remote).await;

    handle(&tracker, save_request("Engineer, Senior", "http://x/1")).await;

    let response = handle(&tracker, Request::ExportCsv).await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 1);

    let csv = json["csv"].as_str().unwrap();
    assert!(csv.starts_with('\u{feff}'));
    assert!(csv.contains("工作名称"));
    // Field with a comma arrives quoted
    assert!(csv.contains("\"Engineer, Senior\""));
}

#[tokio::test]
async fn extract_now_round_trip() {
    let tracker = tracker_with(StorageMode::Local, "", MockRemote::new()).await;

    let response = handle(
        &tracker,
        Request::ExtractNow {
            url: "https://www.linkedin.com/jobs/view/42".into(),
            html: r#"<main>
                <h1 class="job-details-jobs-unified-top-card__job-title">Rust Engineer</h1>
                <a class="job-details-jobs-unified-top-card__company-name" href="/company/acme">Acme</a>
            </main>"#
                .into(),
        },
    )
    .await;

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["jobTitle"], "Rust Engineer");
    assert_eq!(json["data"]["company"], "Acme");

    // A non-job page reports no data rather than an error
    let response = handle(
        &tracker,
        Request::ExtractNow {
            url: "https://example.com/blog".into(),
            html: "<h1>Hello</h1>".into(),
        },
    )
    .await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().is_some());
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn config_round_trip_through_the_api() {
    let tracker = tracker_with(StorageMode::Local, "", MockRemote::new()).await;

    let response = handle(&tracker, Request::GetConfig).await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["config"]["storageMode"], "local");

    let new_config = TrackerConfig::new()
        .with_mode(StorageMode::Sheets)
        .with_sheet_id("sheet-9");
    let response = handle(&tracker, Request::SaveConfig { config: new_config }).await;
    assert_eq!(serde_json::to_value(&response).unwrap()["success"], true);

    let response = handle(&tracker, Request::GetConfig).await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["config"]["sheetId"], "sheet-9");
}

#[tokio::test]
async fn check_duplicate_matches_identity_key() {
    let tracker = tracker_with(StorageMode::Local, "", MockRemote::new()).await;
    handle(&tracker, save_request("Engineer", "http://x/1")).await;

    let response = handle(
        &tracker,
        Request::CheckDuplicate {
            job_key: "http://x/1_Engineer".into(),
        },
    )
    .await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["isDuplicate"], true);

    let response = handle(
        &tracker,
        Request::CheckDuplicate {
            job_key: "http://x/2_Engineer".into(),
        },
    )
    .await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["isDuplicate"], false);
}
