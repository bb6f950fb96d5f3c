use rzinesync::config::Config;
use rzinesync::core::journal;
use rzinesync::core::sync::SyncLogic;
use rzinesync::core::{DeltaTracker, FailurePolicy, UploadSession};
use rzinesync::errors::{AppError, AppResult};
use rzinesync::lst::{SiteRoots, load_text};
use rzinesync::models::{Row, Verb};
use rzinesync::remote::{FileUploadLog, LocalDirStore, RemoteStore, UploadLog};
use std::cell::Cell;
use std::fs;
use std::path::Path;

mod common;
use common::{SAMPLE_LST, write_file};

/// Local store whose deletes fail while `broken` is set.
struct FlakyStore {
    inner: LocalDirStore,
    broken: Cell<bool>,
}

impl RemoteStore for FlakyStore {
    fn put_file(&self, local: &Path, remote: &str) -> AppResult<()> {
        self.inner.put_file(local, remote)
    }
    fn delete_file(&self, remote: &str) -> AppResult<()> {
        if self.broken.get() {
            return Err(AppError::remote("delete", remote, "connection reset"));
        }
        self.inner.delete_file(remote)
    }
    fn rename(&self, old: &str, new: &str) -> AppResult<()> {
        self.inner.rename(old, new)
    }
    fn read_text(&self, remote: &str) -> AppResult<String> {
        self.inner.read_text(remote)
    }
    fn write_text(&self, remote: &str, text: &str) -> AppResult<()> {
        self.inner.write_text(remote, text)
    }
    fn exists(&self, remote: &str) -> bool {
        self.inner.exists(remote)
    }
}

#[test]
fn test_failed_delete_is_retried() {
    let remote = tempfile::tempdir().unwrap();
    write_file(remote.path(), "Zine/old.pdf", "old");

    let store = FlakyStore {
        inner: LocalDirStore::new(remote.path()),
        broken: Cell::new(true),
    };
    let mut tracker = DeltaTracker::new();
    tracker.delete("old.pdf");
    let mut session = UploadSession::new("tester");

    let report = session.execute(&mut tracker, &store, "Zine", FailurePolicy::Continue);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(tracker.len(), 1);
    assert!(remote.path().join("Zine/old.pdf").exists());
    assert!(session.pending_log().is_empty());

    store.broken.set(false);
    let report = session.execute(&mut tracker, &store, "Zine", FailurePolicy::Continue);
    assert!(report.is_clean());
    assert_eq!(report.applied.len(), 1);
    assert!(tracker.is_empty());
    assert!(!remote.path().join("Zine/old.pdf").exists());
}

#[test]
fn test_every_verb_reaches_the_store() {
    let remote = tempfile::tempdir().unwrap();
    let scans = tempfile::tempdir().unwrap();
    write_file(remote.path(), "Zine/gone.pdf", "x");
    write_file(remote.path(), "Zine/misnamed.pdf", "y");
    write_file(remote.path(), "Zine/blurry.pdf", "v1");
    let new_issue = write_file(scans.path(), "issue1.pdf", "issue 1");
    let rescan = write_file(scans.path(), "sharp.pdf", "v2");

    let store = LocalDirStore::new(remote.path());
    let mut tracker = DeltaTracker::new();
    tracker.add(&new_issue, "issue1.pdf");
    tracker.delete("gone.pdf");
    tracker.rename("misnamed.pdf", "issue2.pdf");
    tracker.replace("blurry.pdf", &rescan);

    let mut session = UploadSession::new("tester");
    let report = session.execute(&mut tracker, &store, "Zine", FailurePolicy::Abort);

    assert!(report.is_clean(), "{:?}", report.failed);
    assert_eq!(report.applied.len(), 4);
    assert!(tracker.is_empty());

    let zine = remote.path().join("Zine");
    assert_eq!(fs::read_to_string(zine.join("issue1.pdf")).unwrap(), "issue 1");
    assert!(!zine.join("gone.pdf").exists());
    assert!(!zine.join("misnamed.pdf").exists());
    assert_eq!(fs::read_to_string(zine.join("issue2.pdf")).unwrap(), "y");
    assert!(!zine.join("blurry.pdf").exists());
    assert_eq!(fs::read_to_string(zine.join("sharp.pdf")).unwrap(), "v2");
}

#[test]
fn test_abort_skips_the_rest_of_the_batch() {
    let remote = tempfile::tempdir().unwrap();
    let store = LocalDirStore::new(remote.path());

    let mut tracker = DeltaTracker::new();
    tracker.delete("missing-1.pdf");
    tracker.delete("missing-2.pdf");

    let mut session = UploadSession::new("tester");
    let report = session.execute(&mut tracker, &store, "Zine", FailurePolicy::Abort);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(tracker.len(), 2);

    let report = session.execute(&mut tracker, &store, "Zine", FailurePolicy::Continue);
    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.skipped, 0);
}

#[test]
fn test_log_lines_are_buffered_until_flush() {
    let remote = tempfile::tempdir().unwrap();
    let scans = tempfile::tempdir().unwrap();
    let file = write_file(scans.path(), "a.pdf", "a");

    let store = LocalDirStore::new(remote.path());
    let mut tracker = DeltaTracker::new();
    tracker.add(&file, "a.pdf");
    tracker.rename("a.pdf", "b.pdf");

    let mut session = UploadSession::new("tester");
    session.execute(&mut tracker, &store, "Zine", FailurePolicy::Continue);
    assert_eq!(session.pending_log().len(), 1);
    assert!(session.pending_log()[0].contains("[tester] add a.pdf -> b.pdf in Zine"));

    let mut lines: Vec<String> = Vec::new();
    assert_eq!(session.flush(&mut lines).unwrap(), 1);
    assert!(session.pending_log().is_empty());
    assert_eq!(lines.len(), 1);

    let log_path = remote.path().join("logs/upload.log");
    let mut sink = FileUploadLog::new(&log_path);
    sink.append(&lines[0]).unwrap();
    sink.append("second line").unwrap();
    let content = sink.read_all().unwrap();
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn test_publish_writes_lst_and_backs_up_previous() {
    let remote = tempfile::tempdir().unwrap();
    write_file(remote.path(), "Zine/index.lst", "old contents\n");

    let store = LocalDirStore::new(remote.path());
    let site = SiteRoots::default();
    let table = load_text(&site, SAMPLE_LST);

    let mut session = UploadSession::new("tester");
    let outcome = session
        .publish(&store, &site, &table, "Zine", "index.lst", true)
        .unwrap();

    assert_eq!(outcome.remote_path, "Zine/index.lst");
    let written = fs::read_to_string(remote.path().join("Zine/index.lst")).unwrap();
    assert!(written.starts_with("Fanac Test Zine;"));
    assert_eq!(outcome.bytes, written.len());

    let backup = outcome.backup_path.expect("backup path");
    assert!(backup.starts_with("Zine/index.lst-") && backup.ends_with(".bak"));
    assert_eq!(store.read_text(&backup).unwrap(), "old contents\n");
    assert!(session.pending_log()[0].contains("save index.lst"));
}

#[test]
fn test_publish_of_unencodable_table_writes_nothing() {
    let remote = tempfile::tempdir().unwrap();
    let store = LocalDirStore::new(remote.path());
    let site = SiteRoots::default();

    let mut table = load_text(&site, SAMPLE_LST);
    let mut bad = Row::empty(table.num_cols());
    bad.set_source_identifier("<b unterminated");
    bad.set_display_text("Broken");
    table.push_row(bad);

    let mut session = UploadSession::new("tester");
    let result = session.publish(&store, &site, &table, "Zine", "index.lst", true);

    assert!(matches!(result, Err(AppError::Encode { .. })));
    assert!(!remote.path().join("Zine/index.lst").exists());
    assert!(session.pending_log().is_empty());
}

#[test]
fn test_store_refuses_paths_outside_its_root() {
    let remote = tempfile::tempdir().unwrap();
    let store = LocalDirStore::new(remote.path());

    assert!(matches!(
        store.write_text("../escape.txt", "x"),
        Err(AppError::InvalidPath(_))
    ));
    assert!(matches!(store.delete_file(""), Err(AppError::InvalidPath(_))));
    assert!(!store.exists("Zine/../../etc/passwd"));
}

#[test]
fn test_delta_verbs_in_report() {
    let remote = tempfile::tempdir().unwrap();
    write_file(remote.path(), "Zine/a.pdf", "a");
    let store = LocalDirStore::new(remote.path());

    let mut tracker = DeltaTracker::new();
    tracker.rename("a.pdf", "b.pdf");
    let mut session = UploadSession::new("tester");
    let report = session.execute(&mut tracker, &store, "Zine/", FailurePolicy::Continue);

    assert_eq!(report.applied[0].verb, Verb::Rename);
    assert!(report.applied[0].uploaded);
    assert!(remote.path().join("Zine/b.pdf").exists());
}

#[test]
fn test_log_is_flushed_when_publishing_fails() {
    let work = tempfile::tempdir().unwrap();
    let remote = work.path().join("remote");
    let file = write_file(work.path(), "scans/a.pdf", "a");
    let journal_path = work.path().join("zine.json");
    let log_path = work.path().join("upload.log");

    let mut tracker = DeltaTracker::new();
    tracker.add(&file, "a.pdf");
    journal::save(&journal_path, "Zine", &tracker).unwrap();

    let cfg = Config {
        remote_root: remote.to_string_lossy().to_string(),
        editor_id: "tester".into(),
        upload_log: log_path.to_string_lossy().to_string(),
        ..Config::default()
    };
    let missing_lst = work.path().join("work/missing.lst");

    let result = SyncLogic::upload(&cfg, &journal_path, "Zine", Some(&missing_lst), false);
    assert!(matches!(result, Err(AppError::Io(_))));

    assert!(remote.join("Zine/a.pdf").exists());
    assert!(journal::load(&journal_path, "Zine").unwrap().tracker().is_empty());
    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("[tester] add a.pdf -> a.pdf in Zine"));
}
