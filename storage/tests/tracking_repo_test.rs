//! Integration tests for [`storage::TrackingRepository`].
//!
//! Covers `list_recent` ordering and cap, seeding opens through `create`, file-backed
//! persistence across reopen, and concurrent appends to the same message.

use std::sync::Arc;

use chrono::{Duration, Utc};
use storage::{OpenEvent, TrackedMessage, TrackingRepository, TrackingStats, TrackingStore};
use tempfile::TempDir;

fn message_sent_minutes_ago(subject: &str, minutes: i64) -> TrackedMessage {
    let mut message = TrackedMessage::new(
        subject.to_string(),
        "bob@example.com".to_string(),
        Some("1.2.3.4".to_string()),
    );
    message.sent_at = Utc::now() - Duration::minutes(minutes);
    message
}

/// **Test: list_recent returns newest first and honours the limit.**
///
/// **Setup:** Save 5 messages sent 5..1 minutes ago (oldest saved first).
/// **Action:** `list_recent(3)`.
/// **Expected:** The 3 most recent, newest first.
#[tokio::test]
async fn test_list_recent_newest_first_with_limit() {
    let repo = TrackingRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    for minutes in (1..=5).rev() {
        let message = message_sent_minutes_ago(&format!("m{}", minutes), minutes);
        repo.create(&message).await.expect("Failed to save message");
    }

    let recent = repo.list_recent(3).await.expect("Failed to list");
    let subjects: Vec<&str> = recent.iter().map(|m| m.subject.as_str()).collect();
    assert_eq!(subjects, vec!["m1", "m2", "m3"]);
}

/// **Test: create persists seeded opens; stats are computed from them.**
///
/// **Setup:** A has opens [self, other], B has [self], C has none.
/// **Action:** `list_recent(100)` then `TrackingStats::from_messages`.
/// **Expected:** openedEmails=1, unopenedEmails=2, openRate "33.3".
#[tokio::test]
async fn test_stats_over_listed_messages() {
    let repo = TrackingRepository::new("sqlite::memory:").await.unwrap();

    let mut a = message_sent_minutes_ago("A", 3);
    a.opens.push(OpenEvent::new(Some("ua"), "1.2.3.4", Some("1.2.3.4")));
    a.opens.push(OpenEvent::new(Some("ua"), "9.9.9.9", Some("1.2.3.4")));
    let mut b = message_sent_minutes_ago("B", 2);
    b.opens.push(OpenEvent::new(Some("ua"), "1.2.3.4", Some("1.2.3.4")));
    let c = message_sent_minutes_ago("C", 1);

    for message in [&a, &b, &c] {
        repo.create(message).await.unwrap();
    }

    let listed = repo.list_recent(100).await.unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[2].opens.len(), 2);
    assert!(listed[2].opens[0].is_self);

    let stats = TrackingStats::from_messages(&listed);
    assert_eq!(stats.total_emails, 3);
    assert_eq!(stats.total_opens, 1);
    assert_eq!(stats.opened_emails, 1);
    assert_eq!(stats.unopened_emails, 2);
    assert_eq!(stats.open_rate.to_string(), "33.3");
}

/// **Test: a file database survives reopening.**
#[tokio::test]
async fn test_file_database_persists() {
    let temp_dir = TempDir::new().expect("TempDir::new must succeed");
    let database_url = format!("file:{}/tracker.db", temp_dir.path().display());

    let message = message_sent_minutes_ago("persisted", 1);
    {
        let repo = TrackingRepository::new(&database_url).await.unwrap();
        repo.create(&message).await.unwrap();
        let event = OpenEvent::new(Some("ua"), "9.9.9.9", message.sender_ip.as_deref());
        assert!(repo.append_open(&message.tracking_id, &event).await.unwrap());
    }

    let reopened = TrackingRepository::new(&database_url).await.unwrap();
    let found = reopened
        .find_by_tracking_id(&message.tracking_id)
        .await
        .unwrap()
        .expect("message should survive reopen");
    assert_eq!(found.subject, "persisted");
    assert_eq!(found.opens.len(), 1);
}

/// **Test: concurrent appends to one message are all recorded.**
///
/// **Setup:** File database (real pool), one message.
/// **Action:** 20 spawned `append_open` calls.
/// **Expected:** 20 opens, none lost.
#[tokio::test]
async fn test_concurrent_appends_are_not_lost() {
    let temp_dir = TempDir::new().unwrap();
    let database_url = format!("{}/tracker.db", temp_dir.path().display());
    let repo = Arc::new(TrackingRepository::new(&database_url).await.unwrap());

    let message = message_sent_minutes_ago("busy", 1);
    repo.create(&message).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..20 {
        let repo = Arc::clone(&repo);
        let tracking_id = message.tracking_id.clone();
        handles.push(tokio::spawn(async move {
            let event = OpenEvent::new(Some("ua"), &format!("10.0.0.{}", i), None);
            repo.append_open(&tracking_id, &event).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }

    let found = repo
        .find_by_tracking_id(&message.tracking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.opens.len(), 20);
}

/// **Test: listed messages each get exactly their own opens, in append order.**
///
/// **Setup:** Three messages; opens appended interleaved across X and Y, none on Z.
/// **Action:** `list_recent(10)`.
/// **Expected:** X and Y carry only their own events in insertion order; Z has none;
/// every listed record matches `find_by_tracking_id`.
#[tokio::test]
async fn test_list_recent_attaches_opens_per_message() {
    let repo = TrackingRepository::new("sqlite::memory:").await.unwrap();

    let x = message_sent_minutes_ago("X", 3);
    let y = message_sent_minutes_ago("Y", 2);
    let z = message_sent_minutes_ago("Z", 1);
    for message in [&x, &y, &z] {
        repo.create(message).await.unwrap();
    }

    for (id, ip) in [
        (&x.tracking_id, "10.0.0.1"),
        (&y.tracking_id, "20.0.0.1"),
        (&x.tracking_id, "10.0.0.2"),
        (&y.tracking_id, "20.0.0.2"),
        (&x.tracking_id, "10.0.0.3"),
    ] {
        let event = OpenEvent::new(Some("ua"), ip, Some("1.2.3.4"));
        assert!(repo.append_open(id, &event).await.unwrap());
    }

    let listed = repo.list_recent(10).await.unwrap();
    let ips = |m: &TrackedMessage| m.opens.iter().map(|e| e.ip.clone()).collect::<Vec<_>>();

    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].subject, "Z");
    assert!(listed[0].opens.is_empty());
    assert_eq!(ips(&listed[1]), vec!["20.0.0.1", "20.0.0.2"]);
    assert_eq!(ips(&listed[2]), vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]);

    for message in &listed {
        let found = repo
            .find_by_tracking_id(&message.tracking_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.opens, message.opens);
    }
}
