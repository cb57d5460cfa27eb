use mailscrub_core::{Column, Field, Record, ReportSource};
use mailscrub_engine::{RedactionRun, ReportSummary, ReportWriter, RunSummary};
use mailscrub_security::{ExclusionList, RedactionPipeline};
use mailscrub_storage::Storage;
use time::macros::datetime;

fn record(id: i64) -> Record {
    Record {
        id,
        subject: format!("Order {id} for jane@example.com"),
        sender: "shop@corp.test".to_string(),
        recipient: "jane@example.com".to_string(),
        body: format!("<p>Call 123-456-7890 about #{id}</p>"),
        time: datetime!(2018-11-10 09:30 UTC),
    }
}

async fn seeded(ids: &[i64]) -> (tempfile::TempDir, Storage) {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(Some(dir.path().join("store.db"))).await.unwrap();
    let records: Vec<Record> = ids.iter().copied().map(record).collect();
    storage.insert_emails(&records).await.unwrap();
    (dir, storage)
}

fn pipeline() -> RedactionPipeline {
    RedactionPipeline::new(ExclusionList::new(["corp.test"]), "[REDACTED]")
}

#[tokio::test]
async fn test_run_redacts_every_page() {
    let (_dir, storage) = seeded(&[1, 2, 3, 4, 5]).await;

    let summary = RedactionRun::new(storage.clone(), pipeline())
        .with_page_size(2)
        .run()
        .await
        .unwrap();

    assert_eq!(summary, RunSummary { redacted: 5 });
    assert_eq!(storage.count_redacted().await.unwrap(), 5);

    let third = storage.get_redacted(3).await.unwrap().unwrap();
    assert_eq!(third.subject, "Order 3 for [REDACTED]");
    assert_eq!(third.sender, "shop@corp.test");
    assert_eq!(third.recipient, "[REDACTED]");
    assert_eq!(third.body, "<p>Call [REDACTED] about #3</p>");
    assert_eq!(third.time, datetime!(2018-11-10 09:30 UTC));
}

#[tokio::test]
async fn test_rerun_replaces_previous_output() {
    let (_dir, storage) = seeded(&[1, 2, 3]).await;
    let run = RedactionRun::new(storage.clone(), pipeline());

    run.run().await.unwrap();
    let first = storage.redacted_after(0, 10).await.unwrap();

    run.run().await.unwrap();
    let second = storage.redacted_after(0, 10).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(storage.count_redacted().await.unwrap(), 3);
}

#[tokio::test]
async fn test_null_column_aborts_before_writing() {
    let (_dir, storage) = seeded(&[1, 2]).await;
    insert_null_body(&storage, 3).await;

    let result = RedactionRun::new(storage.clone(), pipeline()).run().await;

    assert!(result.is_err());
    assert_eq!(storage.count_redacted().await.unwrap(), 0);
}

async fn insert_null_body(storage: &Storage, id: i64) {
    let statement = format!(
        "INSERT INTO emails (id, subject, email_from, email_to, time, body) \
         VALUES ({id}, 'Hi', 'a@b.test', 'c@d.test', 0, NULL)"
    );
    sqlx::query(&statement).execute(storage.pool()).await.unwrap();
}

#[tokio::test]
async fn test_report_pages_and_body_files() {
    let (dir, storage) = seeded(&[1, 2, 3]).await;
    RedactionRun::new(storage.clone(), pipeline()).run().await.unwrap();

    let root = dir.path().join("generated");
    let columns = vec![Column::new(Field::Id, "ID"), Column::new(Field::Subject, "Subject")];
    let summary = ReportWriter::new(storage, &root, ReportSource::Redacted, columns)
        .with_page_size(2)
        .write()
        .await
        .unwrap();

    assert_eq!(summary, ReportSummary { pages: 2, records: 3 });

    let first = std::fs::read_to_string(root.join("1--2.index.html")).unwrap();
    assert!(first.contains("<tr><th><b>ID</b></th><th><b>Subject</b></th><th><b>Link</b></th></tr>"));
    assert!(first.contains(
        "<tr><td>1</td><td>Order 1 for [REDACTED]</td><td><a href=\"files/file.id.1.redacted_emails\">files/file.id.1.redacted_emails</a></td></tr>"
    ));
    assert!(!first.contains("file.id.3."));

    let second = std::fs::read_to_string(root.join("3--3.index.html")).unwrap();
    assert!(second.contains("file.id.3.redacted_emails"));

    let body = std::fs::read_to_string(root.join("files/file.id.2.redacted_emails")).unwrap();
    assert_eq!(body, "<p>Call [REDACTED] about #2</p>");
}

#[tokio::test]
async fn test_report_from_raw_emails() {
    let (dir, storage) = seeded(&[4, 9]).await;

    let root = dir.path().join("raw");
    let columns = vec![Column::new(Field::EmailTo, "To")];
    let summary = ReportWriter::new(storage, &root, ReportSource::Emails, columns)
        .write()
        .await
        .unwrap();

    assert_eq!(summary, ReportSummary { pages: 1, records: 2 });

    let page = std::fs::read_to_string(root.join("1--9.index.html")).unwrap();
    assert!(page.contains("<td>jane@example.com</td>"));

    let body = std::fs::read_to_string(root.join("files/file.id.9.emails")).unwrap();
    assert_eq!(body, "<p>Call 123-456-7890 about #9</p>");
}

#[tokio::test]
async fn test_empty_store_writes_no_pages() {
    let (dir, storage) = seeded(&[]).await;

    let root = dir.path().join("generated");
    let summary = ReportWriter::new(storage, &root, ReportSource::Redacted, Vec::new())
        .write()
        .await
        .unwrap();

    assert_eq!(summary, ReportSummary::default());
    assert!(root.join("files").is_dir());
    assert_eq!(std::fs::read_dir(&root).unwrap().count(), 1);
}

#[tokio::test]
async fn test_report_reaches_largest_id() {
    let (dir, storage) = seeded(&[7, i64::MAX]).await;

    let root = dir.path().join("generated");
    let columns = vec![Column::new(Field::Id, "ID")];
    let summary = ReportWriter::new(storage, &root, ReportSource::Emails, columns)
        .with_page_size(1)
        .write()
        .await
        .unwrap();

    assert_eq!(summary, ReportSummary { pages: 2, records: 2 });
    assert!(root.join("1--7.index.html").is_file());
    assert!(root.join(format!("8--{}.index.html", i64::MAX)).is_file());
}
