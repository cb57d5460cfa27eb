use mailscrub_core::{CoreError, Record, SanitizedRecord};
use mailscrub_storage::{Storage, StorageError};
use time::OffsetDateTime;

fn record(id: i64, subject: &str) -> Record {
    Record {
        id,
        subject: subject.to_string(),
        sender: "jane@example.com".to_string(),
        recipient: "ops@corp.test".to_string(),
        body: "<p>Call 123-456-7890</p>".to_string(),
        time: OffsetDateTime::from_unix_timestamp(1_541_845_800 + id).unwrap(),
    }
}

fn sanitized(record: &Record) -> SanitizedRecord {
    SanitizedRecord {
        id: record.id,
        subject: record.subject.clone(),
        sender: "[REDACTED]".to_string(),
        recipient: record.recipient.clone(),
        body: "<p>Call [REDACTED]</p>".to_string(),
        time: record.time,
    }
}

async fn open() -> (tempfile::TempDir, Storage) {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(Some(dir.path().join("store.db"))).await.unwrap();
    (dir, storage)
}

#[tokio::test]
async fn test_email_round_trip_and_paging() {
    let (_dir, storage) = open().await;

    // Inserted out of order, read back in id order
    for id in [3, 1, 2, 5, 4] {
        storage.insert_email(&record(id, &format!("Order {id}"))).await.unwrap();
    }

    assert_eq!(storage.count_emails().await.unwrap(), 5);
    assert_eq!(storage.get_email(2).await.unwrap(), Some(record(2, "Order 2")));
    assert_eq!(storage.get_email(42).await.unwrap(), None);

    let first = storage.emails_after(0, 2).await.unwrap();
    assert_eq!(first.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);

    let rest = storage.emails_after(2, 10).await.unwrap();
    assert_eq!(rest.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 4, 5]);

    assert!(storage.emails_after(5, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_batch_import_is_atomic() {
    let (_dir, storage) = open().await;

    let inserted = storage
        .insert_emails(&[record(1, "a"), record(2, "b")])
        .await
        .unwrap();
    assert_eq!(inserted, 2);

    // Duplicate id in the second batch fails the whole batch
    let result = storage.insert_emails(&[record(3, "c"), record(1, "dup")]).await;
    assert!(matches!(result, Err(StorageError::Database(_))));
    assert_eq!(storage.count_emails().await.unwrap(), 2);
    assert_eq!(storage.get_email(3).await.unwrap(), None);
}

#[tokio::test]
async fn test_save_redacted_replaces_existing_rows() {
    let (_dir, storage) = open().await;
    let source = record(7, "Contact jane@example.com");
    storage.insert_email(&source).await.unwrap();

    let mut redacted = sanitized(&source);
    storage.save_redacted(&[redacted.clone()]).await.unwrap();

    redacted.subject = "Contact [REDACTED]".to_string();
    storage.save_redacted(&[redacted.clone()]).await.unwrap();

    assert_eq!(storage.count_redacted().await.unwrap(), 1);
    assert_eq!(storage.get_redacted(7).await.unwrap(), Some(redacted.clone()));
    assert_eq!(storage.redacted_after(0, 10).await.unwrap(), vec![redacted]);
}

#[tokio::test]
async fn test_save_redacted_rolls_back_on_failure() {
    let (_dir, storage) = open().await;
    let source = record(1, "ok");
    storage.insert_email(&source).await.unwrap();

    // id 99 has no source record, so the foreign key rejects it
    let orphan = sanitized(&record(99, "orphan"));
    let result = storage.save_redacted(&[sanitized(&source), orphan]).await;

    assert!(result.is_err());
    assert_eq!(storage.count_redacted().await.unwrap(), 0);
}

#[tokio::test]
async fn test_null_text_column_is_invalid_input() {
    let (_dir, storage) = open().await;

    sqlx::query("INSERT INTO emails (id, subject, email_from, email_to, time, body) VALUES (1, 'Hi', 'a@b.io', 'c@d.io', 0, NULL)")
        .execute(storage.pool())
        .await
        .unwrap();

    let err = storage.emails_after(0, 10).await.unwrap_err();
    assert!(matches!(
        err,
        StorageError::InvalidRecord(CoreError::InvalidInput { field: "body", .. })
    ));
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.db");

    let storage = Storage::new(Some(path.clone())).await.unwrap();
    storage.insert_email(&record(1, "kept")).await.unwrap();
    storage.migrate().await.unwrap();
    drop(storage);

    let reopened = Storage::new(Some(path)).await.unwrap();
    assert_eq!(reopened.count_emails().await.unwrap(), 1);
}
