use pathfinder_core::model::{LevelId, SessionState};
use storage::{FileStore, KeyValueStore, ProgressRecord, Storage};

#[test]
fn file_store_round_trips_progress_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let key = "summitPathfinderProgress";

    let state = SessionState::from_persisted(LevelId::new(4), [LevelId::new(1), LevelId::new(3)]);
    {
        let store = FileStore::open(dir.path()).unwrap();
        let raw = ProgressRecord::from_state(&state).encode().unwrap();
        store.save(key, &raw).unwrap();
    }

    let reopened = FileStore::open(dir.path()).unwrap();
    let raw = reopened.load(key).unwrap().expect("record present");
    let restored = ProgressRecord::decode(&raw).unwrap().into_state();
    assert_eq!(restored.current(), LevelId::new(4));
    assert_eq!(restored.completed(), state.completed());
    assert!(dir.path().join("summitPathfinderProgress.json").exists());
}

#[test]
fn missing_key_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    assert_eq!(store.load("absent").unwrap(), None);
}

#[test]
fn save_overwrites_and_remove_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();

    store.save("k", "first").unwrap();
    store.save("k", "second").unwrap();
    assert_eq!(store.load("k").unwrap().as_deref(), Some("second"));
    assert!(!dir.path().join("k.json.tmp").exists());

    store.remove("k").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.load("k").unwrap(), None);
}

#[test]
fn storage_file_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("profiles").join("default");
    let storage = Storage::file(&nested).unwrap();
    storage.progress.save("k", "v").unwrap();
    assert!(nested.join("k.json").exists());
}
