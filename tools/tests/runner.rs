//! Command handling tests for the desk runner.

use complaint_desk_core::types::Status;
use desk_runner::{
    commands::{DeskRunner, Reply},
    config::RunnerConfig,
    store::SqliteComplaintStore,
};
use serde_json::Value;

fn make_runner() -> DeskRunner {
    let config = RunnerConfig {
        seed: Some(42),
        ..RunnerConfig::default()
    };
    DeskRunner::new(config, None).expect("build runner")
}

fn send(runner: &mut DeskRunner, line: &str) -> Value {
    match runner.handle_line(line).expect("command should succeed") {
        Reply::Json(v) => v,
        Reply::Quit => panic!("unexpected quit for {line}"),
    }
}

#[test]
fn add_returns_classified_complaint_and_counts() {
    let mut runner = make_runner();
    let v = send(
        &mut runner,
        r#"{"type":"add","customer_name":"Ada","text":"  I was charged twice for my order and need a refund immediately  "}"#,
    );
    assert_eq!(v["complaint"]["category"], "Payment Issue");
    assert_eq!(v["complaint"]["priority"], "Critical");
    assert_eq!(v["complaint"]["status"], "Pending");
    assert_eq!(v["total_complaints"], 1);
    assert_eq!(v["category_count"], 1);
    assert_eq!(
        v["message"],
        "Complaint classified as 'Payment Issue' with 59% confidence"
    );
    // Stored text is trimmed.
    assert_eq!(
        runner.desk().complaints()[0].text(),
        "I was charged twice for my order and need a refund immediately"
    );
}

#[test]
fn short_or_blank_text_is_rejected_before_the_desk() {
    let mut runner = make_runner();
    let err = runner
        .handle_line(r#"{"type":"add","text":"   "}"#)
        .unwrap_err();
    assert!(err.to_string().contains("cannot be empty"));

    let err = runner.handle_line(r#"{"type":"add","text":"hey"}"#).unwrap_err();
    assert!(err.to_string().contains("at least 5"));
    assert!(runner.desk().is_empty());
}

#[test]
fn batch_with_one_bad_item_adds_nothing() {
    let mut runner = make_runner();
    let bad = r#"{"type":"add_batch","items":[{"text":"refund please"},{"text":"no"}]}"#;
    assert!(runner.handle_line(bad).is_err());
    assert!(runner.desk().is_empty());

    let good = r#"{"type":"add_batch","items":[{"text":"refund please"},{"text":"package is late"}]}"#;
    let v = send(&mut runner, good);
    assert_eq!(v["total_processed"], 2);
    assert_eq!(v["results"][1]["complaint"]["category"], "Delivery Issue");
}

#[test]
fn update_status_and_not_found() {
    let mut runner = make_runner();
    let v = send(&mut runner, r#"{"type":"add","text":"my card was stolen"}"#);
    let id = v["complaint"]["id"].as_str().unwrap().to_string();

    let line = format!(r#"{{"type":"update_status","id":"{id}","status":"In Progress"}}"#);
    let v = send(&mut runner, &line);
    assert_eq!(v["status"], "In Progress");

    let got = send(&mut runner, &format!(r#"{{"type":"get","id":"{id}"}}"#));
    assert_eq!(got["status"], "In Progress");

    let err = runner
        .handle_line(r#"{"type":"update_status","id":"nope","status":"Closed"}"#)
        .unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn unknown_labels_fail_to_parse() {
    let mut runner = make_runner();
    assert!(runner
        .handle_line(r#"{"type":"by_category","category":"Shipping"}"#)
        .is_err());
    assert!(runner.handle_line(r#"{"type":"launch"}"#).is_err());
}

#[test]
fn list_clamps_limit_and_stats_reflect_adds() {
    let mut runner = make_runner();
    for text in ["refund please", "package is late", "refund again please"] {
        send(&mut runner, &format!(r#"{{"type":"add","text":"{text}"}}"#));
    }

    let page = send(&mut runner, r#"{"type":"list","offset":1,"limit":0}"#);
    assert_eq!(page["total"], 3);
    assert_eq!(page["limit"], 1);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);

    let stats = send(&mut runner, r#"{"type":"stats"}"#);
    assert_eq!(stats["total_complaints"], 3);
    assert_eq!(stats["most_common_category"], "Refund Request");

    let detailed = send(&mut runner, r#"{"type":"detailed_stats"}"#);
    assert_eq!(detailed["breakdown"][0]["category"], "Refund Request");

    let by_cat = send(&mut runner, r#"{"type":"by_category","category":"Refund Request"}"#);
    assert_eq!(by_cat["count"], 2);

    let recent = send(&mut runner, r#"{"type":"recent","limit":1}"#);
    assert_eq!(recent[0]["text"], "refund again please");
}

#[test]
fn analyze_categories_health_reset_quit() {
    let mut runner = make_runner();
    let a = send(&mut runner, r#"{"type":"analyze","text":"fraud on my login"}"#);
    assert_eq!(a["classification"]["category"], "Account Problem");
    assert_eq!(a["categories"].as_array().unwrap().len(), 7);
    assert!(runner.desk().is_empty(), "analyze must not store anything");

    let cats = send(&mut runner, r#"{"type":"categories"}"#);
    assert_eq!(cats["total"], 7);
    assert_eq!(cats["categories"][0], "Payment Issue");

    send(&mut runner, r#"{"type":"add","text":"refund please"}"#);
    let health = send(&mut runner, r#"{"type":"health"}"#);
    assert_eq!(health["total_complaints_processed"], 1);

    let reset = send(&mut runner, r#"{"type":"reset"}"#);
    assert_eq!(reset["status"], "success");
    assert!(runner.desk().is_empty());

    assert_eq!(runner.handle_line(r#"{"type":"quit"}"#).unwrap(), Reply::Quit);
}

#[test]
fn mutations_are_saved_to_the_store() {
    let store = SqliteComplaintStore::in_memory().unwrap();
    store.migrate().unwrap();
    let mut runner = DeskRunner::new(RunnerConfig::default(), Some(store)).unwrap();

    send(&mut runner, r#"{"type":"add","text":"refund please"}"#);
    send(&mut runner, r#"{"type":"add","text":"package is late"}"#);
    assert_eq!(runner.store().unwrap().complaint_count().unwrap(), 2);

    send(&mut runner, r#"{"type":"reset"}"#);
    assert_eq!(runner.store().unwrap().complaint_count().unwrap(), 0);
}

#[test]
fn analyze_applies_the_same_length_bounds() {
    let mut runner = make_runner();
    let err = runner.handle_line(r#"{"type":"analyze","text":"hey"}"#).unwrap_err();
    assert!(err.to_string().contains("at least 5"));

    let long = "a".repeat(2001);
    let line = serde_json::json!({ "type": "analyze", "text": long }).to_string();
    let err = runner.handle_line(&line).unwrap_err();
    assert!(err.to_string().contains("at most 2000"));
}

/// When the save after a mutation fails, the command errors and the desk
/// is rolled back, so memory and store still agree.
#[test]
fn failed_save_rolls_back_the_mutation() {
    let path = std::env::temp_dir()
        .join(format!("desk-runner-rollback-{}.db", std::process::id()))
        .to_string_lossy()
        .into_owned();
    remove_db(&path);
    let store = SqliteComplaintStore::open(&path).unwrap();
    store.migrate().unwrap();
    let mut runner = DeskRunner::new(RunnerConfig::default(), Some(store)).unwrap();

    let v = send(&mut runner, r#"{"type":"add","text":"refund please"}"#);
    let id = v["complaint"]["id"].as_str().unwrap().to_string();

    let other = rusqlite::Connection::open(&path).unwrap();
    other.execute_batch("DROP TABLE complaint").unwrap();

    assert!(runner.handle_line(r#"{"type":"add","text":"package is late"}"#).is_err());
    assert_eq!(runner.desk().len(), 1);

    let update = format!(r#"{{"type":"update_status","id":"{id}","status":"Resolved"}}"#);
    assert!(runner.handle_line(&update).is_err());
    assert_eq!(runner.desk().get(&id).map(|c| c.status()), Some(Status::Pending));

    assert!(runner.handle_line(r#"{"type":"reset"}"#).is_err());
    assert_eq!(runner.desk().len(), 1);

    drop(other);
    drop(runner);
    remove_db(&path);
}

fn remove_db(path: &str) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{path}{suffix}"));
    }
}

#[test]
fn config_defaults_and_partial_files() {
    let config: RunnerConfig = serde_json::from_str(r#"{"max_page_limit": 50}"#).unwrap();
    assert_eq!(config.max_page_limit, 50);
    assert_eq!(config.min_complaint_len, 5);
    assert_eq!(config.page_limit(Some(500)), 50);
    assert_eq!(config.page_limit(None), 50);

    let bad = RunnerConfig {
        min_complaint_len: 10,
        max_complaint_len: 5,
        ..RunnerConfig::default()
    };
    assert!(bad.validate().is_err());
}
