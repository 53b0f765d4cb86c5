//! End-to-end smoke test through the facade re-exports.

use casefile::{CaseRecord, CasefileConfig, RecordStore};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[tokio::test]
async fn facade_exposes_the_full_store_flow() {
    casefile::init_logging();

    let dir = tempdir().expect("tempdir");
    let config = CasefileConfig::builder()
        .data_dir(dir.path().to_string_lossy())
        .build();

    let store = RecordStore::open(&config).expect("open store");
    let mut record = CaseRecord::new();
    record.title = "Vanished coffee mug".to_string();
    store.insert(record.clone()).wait().await.expect("insert");

    assert_eq!(*store.get_by_id(record.id).borrow(), Some(record.clone()));
    assert_eq!(
        store.photo_path(&record),
        config.photo_dir().join(record.photo_file_name())
    );
    store.close();
}
