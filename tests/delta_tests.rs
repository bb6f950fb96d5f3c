use rzinesync::core::DeltaTracker;
use rzinesync::core::journal;
use rzinesync::models::{Delta, Verb};
use std::path::{Path, PathBuf};

fn local(name: &str) -> PathBuf {
    PathBuf::from("/scans").join(name)
}

fn only(t: &DeltaTracker) -> &Delta {
    assert_eq!(t.len(), 1, "expected one delta, got {:?}", t.deltas());
    &t.deltas()[0]
}

#[test]
fn test_add_then_delete_cancels_out() {
    let mut t = DeltaTracker::new();
    t.add(local("a.pdf"), "a.pdf");
    t.delete("a.pdf");
    assert!(t.is_empty());
}

#[test]
fn test_rename_of_pending_add_changes_its_target() {
    let mut t = DeltaTracker::new();
    t.add(local("a.pdf"), "a.pdf");
    t.rename("a.pdf", "b.pdf");

    let d = only(&t);
    assert_eq!(d.verb, Verb::Add);
    assert_eq!(d.target_name(), "b.pdf");
    assert_eq!(d.source_path, local("a.pdf"));
}

#[test]
fn test_rename_of_rename_by_original_name() {
    let mut t = DeltaTracker::new();
    t.rename("a.pdf", "b.pdf");
    t.rename("a.pdf", "c.pdf");

    let d = only(&t);
    assert_eq!(d.verb, Verb::Rename);
    assert_eq!(d.source_filename, "a.pdf");
    assert_eq!(d.new_source_filename, "c.pdf");
}

#[test]
fn test_chained_rename_collapses() {
    let mut t = DeltaTracker::new();
    t.rename("a.pdf", "b.pdf");
    t.rename("b.pdf", "c.pdf");

    let d = only(&t);
    assert_eq!((d.source_filename.as_str(), d.target_name()), ("a.pdf", "c.pdf"));
}

#[test]
fn test_rename_back_to_original_cancels() {
    let mut t = DeltaTracker::new();
    t.rename("a.pdf", "b.pdf");
    t.rename("b.pdf", "a.pdf");
    assert!(t.is_empty());

    t.rename("x.pdf", "x.pdf");
    assert!(t.is_empty());
}

#[test]
fn test_delete_of_renamed_file_deletes_the_original() {
    let mut t = DeltaTracker::new();
    t.rename("a.pdf", "b.pdf");
    t.delete("b.pdf");

    let d = only(&t);
    assert_eq!(d.verb, Verb::Delete);
    assert_eq!(d.source_filename, "a.pdf");
}

#[test]
fn test_replace_of_pending_add_swaps_the_local_file() {
    let mut t = DeltaTracker::new();
    t.add(local("a.pdf"), "a.pdf");
    t.replace("a.pdf", &local("a-v2.pdf"));

    let d = only(&t);
    assert_eq!(d.verb, Verb::Add);
    assert_eq!(d.source_path, local("a-v2.pdf"));
    assert_eq!(d.target_name(), "a.pdf");
}

#[test]
fn test_replace_of_pending_rename_target() {
    let mut t = DeltaTracker::new();
    t.rename("a.pdf", "b.pdf");
    t.replace("b.pdf", &local("new.pdf"));

    let d = only(&t);
    assert_eq!(d.verb, Verb::Replace);
    assert_eq!(d.source_filename, "a.pdf");
    assert_eq!(d.new_source_filename, "new.pdf");
    assert_eq!(d.source_path, local("new.pdf"));
}

#[test]
fn test_plain_replace_uses_the_local_file_name() {
    let mut t = DeltaTracker::new();
    t.replace("old.pdf", Path::new("/scans/new.pdf"));

    let d = only(&t);
    assert_eq!(d.verb, Verb::Replace);
    assert_eq!(d.source_filename, "old.pdf");
    assert_eq!(d.target_name(), "new.pdf");
}

#[test]
fn test_rename_of_pending_replace_retargets_it() {
    let mut t = DeltaTracker::new();
    t.replace("old.pdf", &local("new.pdf"));
    t.rename("new.pdf", "final.pdf");

    let d = only(&t);
    assert_eq!(d.verb, Verb::Replace);
    assert_eq!(d.target_name(), "final.pdf");
}

#[test]
fn test_add_over_pending_delete_becomes_replace() {
    let mut t = DeltaTracker::new();
    t.delete("a.pdf");
    t.add(local("a.pdf"), "a.pdf");

    let d = only(&t);
    assert_eq!(d.verb, Verb::Replace);
    assert_eq!(d.source_filename, "a.pdf");
    assert_eq!(d.target_name(), "a.pdf");
}

#[test]
fn test_replace_over_pending_delete_becomes_replace() {
    let mut t = DeltaTracker::new();
    t.delete("a.pdf");
    t.replace("a.pdf", &local("a-v2.pdf"));

    let d = only(&t);
    assert_eq!(d.verb, Verb::Replace);
    assert_eq!(d.source_filename, "a.pdf");
    assert_eq!(d.target_name(), "a-v2.pdf");
    assert_eq!(d.source_path, local("a-v2.pdf"));
}

#[test]
fn test_delete_of_replace_target_deletes_the_original() {
    let mut t = DeltaTracker::new();
    t.replace("old.pdf", &local("new.pdf"));
    t.delete("new.pdf");

    let d = only(&t);
    assert_eq!(d.verb, Verb::Delete);
    assert_eq!(d.source_filename, "old.pdf");
}

#[test]
fn test_rename_prefers_the_rename_that_currently_targets_the_name() {
    let mut t = DeltaTracker::new();
    t.rename("a.pdf", "b.pdf");
    t.rename("c.pdf", "a.pdf");
    t.rename("a.pdf", "d.pdf");

    let pairs: Vec<(&str, &str)> = t
        .deltas()
        .iter()
        .map(|d| (d.source_filename.as_str(), d.new_source_filename.as_str()))
        .collect();
    assert_eq!(pairs, [("a.pdf", "b.pdf"), ("c.pdf", "d.pdf")]);
    assert!(t.deltas().iter().all(|d| d.verb == Verb::Rename));
}

#[test]
fn test_unrelated_files_keep_log_order() {
    let mut t = DeltaTracker::new();
    t.add(local("a.pdf"), "a.pdf");
    t.delete("old.pdf");
    t.rename("x.pdf", "y.pdf");

    let verbs: Vec<Verb> = t.deltas().iter().map(|d| d.verb).collect();
    assert_eq!(verbs, [Verb::Add, Verb::Delete, Verb::Rename]);
    assert_eq!(t.pending().count(), 3);
}

#[test]
fn test_prune_keeps_only_pending() {
    let mut t = DeltaTracker::new();
    t.delete("a.pdf");
    t.delete("b.pdf");
    t.deltas_mut()[0].uploaded = true;

    assert_eq!(t.prune_uploaded(), 1);
    assert_eq!(only(&t).source_filename, "b.pdf");

    t.clear();
    assert!(t.is_empty());
}

#[test]
fn test_journal_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deltas").join("Zine.json");

    let empty = journal::load(&path, "Zine").unwrap();
    assert!(empty.deltas.is_empty());

    let mut t = DeltaTracker::new();
    t.add(local("a.pdf"), "a.pdf");
    t.rename("x.pdf", "y.pdf");
    journal::save(&path, "Zine", &t).unwrap();

    let loaded = journal::load(&path, "Zine").unwrap();
    assert_eq!(loaded.remote_dir, "Zine");
    assert_eq!(loaded.tracker(), t);
}
