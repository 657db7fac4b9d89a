//! Concurrent access through `SharedComplaintDesk`.

use complaint_desk_core::{types::Status, ComplaintDesk, DeskError, SharedComplaintDesk};
use std::collections::HashSet;
use std::thread;

const WRITERS: usize = 4;
const PER_WRITER: usize = 50;

#[test]
fn concurrent_adds_are_all_kept_with_unique_ids() {
    let desk = SharedComplaintDesk::new(ComplaintDesk::new());

    let handles: Vec<_> = (0..WRITERS)
        .map(|w| {
            let desk = desk.clone();
            thread::spawn(move || {
                for i in 0..PER_WRITER {
                    let text = if i % 2 == 0 { "refund please" } else { "package late" };
                    desk.add_complaint(Some(format!("writer-{w}").as_str()), text);
                }
            })
        })
        .collect();

    // Readers must always see a consistent collection.
    let reader = {
        let desk = desk.clone();
        thread::spawn(move || {
            for _ in 0..200 {
                let s = desk.stats();
                let by_cat: usize = s.category_breakdown.values().sum();
                let by_status: usize = s.status_breakdown.values().sum();
                assert_eq!(by_cat, s.total_complaints);
                assert_eq!(by_status, s.total_complaints);
            }
        })
    };

    for h in handles {
        h.join().expect("writer thread");
    }
    reader.join().expect("reader thread");

    assert_eq!(desk.len(), WRITERS * PER_WRITER);
    let ids: HashSet<String> = desk.with_read(|d| {
        d.complaints().iter().map(|c| c.id().to_string()).collect()
    });
    assert_eq!(ids.len(), WRITERS * PER_WRITER);
}

#[test]
fn shared_update_and_reset() {
    let desk = SharedComplaintDesk::default();
    let c = desk.add_complaint(None, "hacked account");
    desk.update_status(c.id(), Status::InProgress).unwrap();
    assert_eq!(desk.get(c.id()).map(|c| c.status()), Some(Status::InProgress));

    let err = desk.update_status("missing", Status::Closed).unwrap_err();
    assert!(matches!(err, DeskError::ComplaintNotFound { .. }));

    let added = desk.with_write(|d| d.add_batch([(None, "refund please"), (None, "package late")]));
    assert_eq!(added.len(), 2);
    assert_eq!(desk.len(), 3);
    assert_eq!(desk.detailed_stats().total_complaints, 3);

    desk.reset();
    assert!(desk.is_empty());
    assert_eq!(desk.stats().total_complaints, 0);
}
