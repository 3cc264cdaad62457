//! Tests for SaveStore
//!
//! These tests verify:
//! - Opening creates and persists an empty save file
//! - Save / reopen round-trips for typed and text values
//! - Header gate and log sink reporting
//! - Forgiving get, get_or_add, set semantics
//! - Concurrent set/save from several threads

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use binsave::codec::{Bincode, Int32, Raw, Utf16Le, Utf8};
use binsave::store::MAGIC;
use binsave::{CodecError, Lookup, SaveStore, StoreConfig, StoreError};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const FILE_NAME: &str = "test_save.psw";

fn config_in(dir: &TempDir) -> StoreConfig {
    StoreConfig::builder()
        .data_dir(dir.path())
        .file_name(FILE_NAME)
        .build()
}

fn setup_temp_store() -> (TempDir, SaveStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = SaveStore::open(config_in(&temp_dir)).unwrap();
    (temp_dir, store)
}

/// Config whose sink appends every message to the returned list
fn config_with_sink(dir: &TempDir) -> (StoreConfig, Arc<Mutex<Vec<String>>>) {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink_messages = Arc::clone(&messages);
    let config = StoreConfig::builder()
        .data_dir(dir.path())
        .file_name(FILE_NAME)
        .log_sink(move |msg| sink_messages.lock().unwrap().push(msg.to_string()))
        .build();
    (config, messages)
}

fn save_path(dir: &TempDir) -> PathBuf {
    dir.path().join(FILE_NAME)
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_file_with_empty_container() {
    let (temp, store) = setup_temp_store();

    assert!(store.is_empty());
    assert_eq!(store.path(), save_path(&temp));
    assert_eq!(
        fs::read(save_path(&temp)).unwrap(),
        vec![0x50, 0x53, 0x57, 0x00, 0, 0, 0, 0]
    );
}

#[test]
fn test_open_creates_missing_directory() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("profiles").join("player1");
    let config = StoreConfig::builder().data_dir(&nested).build();

    let store = SaveStore::open(config).unwrap();

    assert!(nested.is_dir());
    assert!(store.path().exists());
}

#[test]
fn test_open_rejects_invalid_config() {
    let config = StoreConfig::builder().file_name("").build();
    assert!(matches!(SaveStore::open(config), Err(StoreError::Config(_))));
}

#[test]
fn test_open_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("direct.psw");

    let store = SaveStore::open_path(&path).unwrap();
    store.set_u16("hp", 300);
    store.save().unwrap();

    let reopened = SaveStore::open_path(&path).unwrap();
    assert_eq!(reopened.get_u16("hp", 0), 300);
}

// =============================================================================
// Save / Load Round-trip Tests
// =============================================================================

#[test]
fn test_score_survives_reopen() {
    let temp = TempDir::new().unwrap();
    {
        let store = SaveStore::open(config_in(&temp)).unwrap();
        store.set("score", Int32, &42).unwrap();
        store.save().unwrap();
    }

    let store = SaveStore::open(config_in(&temp)).unwrap();
    assert_eq!(store.get_i32("score", 0), 42);
}

#[test]
fn test_utf8_text_survives_reopen() {
    let temp = TempDir::new().unwrap();
    {
        let store = SaveStore::open(config_in(&temp)).unwrap();
        store.set("name", Utf8, "héllo").unwrap();
        store.save().unwrap();
    }

    let store = SaveStore::open(config_in(&temp)).unwrap();
    assert_eq!(store.get("name", Utf8, String::new()), "héllo");
}

#[test]
fn test_unsaved_changes_are_lost_on_load() {
    let (_temp, store) = setup_temp_store();
    store.set_i64("kept", 1);
    store.save().unwrap();

    store.set_i64("dropped", 2);
    store.load().unwrap();

    assert!(store.contains_key("kept"));
    assert!(!store.contains_key("dropped"));
}

#[test]
fn test_save_overwrites_whole_file() {
    let (temp, store) = setup_temp_store();
    store.set_raw("big", vec![0xEE; 1024]);
    store.save().unwrap();
    let big_len = fs::metadata(save_path(&temp)).unwrap().len();

    store.remove("big");
    store.set_raw("small", vec![1]);
    store.save().unwrap();
    let small_len = fs::metadata(save_path(&temp)).unwrap().len();

    assert!(small_len < big_len);
    store.load().unwrap();
    assert_eq!(store.keys(), vec!["small".to_string()]);
}

#[test]
fn test_header_only_file_loads_empty() {
    let temp = TempDir::new().unwrap();
    fs::write(save_path(&temp), MAGIC).unwrap();
    let (config, messages) = config_with_sink(&temp);

    let store = SaveStore::open(config).unwrap();
    let stats = store.load().unwrap();

    assert!(store.is_empty());
    assert!(!stats.truncated);
    assert!(messages.lock().unwrap().is_empty());
}

#[test]
fn test_truncated_file_loads_readable_entries() {
    let temp = TempDir::new().unwrap();
    {
        let store = SaveStore::open(config_in(&temp)).unwrap();
        store.set_raw("a", vec![1; 4]);
        store.set_raw("b", vec![2; 4]);
        store.save().unwrap();
    }
    let bytes = fs::read(save_path(&temp)).unwrap();
    fs::write(save_path(&temp), &bytes[..bytes.len() - 2]).unwrap();

    let store = SaveStore::open(config_in(&temp)).unwrap();
    let stats = store.load().unwrap();

    assert!(stats.truncated);
    assert_eq!(store.get_raw("a"), Some(vec![1; 4]));
    assert_eq!(store.get_raw("b"), None);
}

#[test]
fn test_file_cut_inside_table_loads_empty() {
    let temp = TempDir::new().unwrap();
    {
        let store = SaveStore::open(config_in(&temp)).unwrap();
        store.set_raw("a", vec![0x11]);
        store.set_raw("bb", vec![0x22]);
        store.save().unwrap();
    }
    // magic (4) + count (4) + row "a" (9) + row "bb" header (8) + 'b'
    let bytes = fs::read(save_path(&temp)).unwrap();
    fs::write(save_path(&temp), &bytes[..26]).unwrap();

    let store = SaveStore::open(config_in(&temp)).unwrap();
    let stats = store.load().unwrap();

    assert!(stats.truncated);
    assert!(store.is_empty());
}

// =============================================================================
// Header Gate Tests
// =============================================================================

#[test]
fn test_corrupted_header_clears_mapping_and_reports_once() {
    let temp = TempDir::new().unwrap();
    let (config, messages) = config_with_sink(&temp);
    let store = SaveStore::open(config).unwrap();
    store.set_i32("score", 7);
    store.save().unwrap();
    assert!(messages.lock().unwrap().is_empty());

    let mut bytes = fs::read(save_path(&temp)).unwrap();
    bytes[0] ^= 0xFF;
    fs::write(save_path(&temp), &bytes).unwrap();

    let result = store.load();

    assert!(matches!(result, Err(StoreError::HeaderMismatch { .. })));
    assert!(store.is_empty());
    let messages = messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("READ - HeaderMismatch"));
}

#[test]
fn test_foreign_file_is_never_interpreted() {
    let temp = TempDir::new().unwrap();
    // A valid container, but behind the wrong magic
    let mut bytes = b"NOPE".to_vec();
    bytes.extend_from_slice(&[1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, b'k', 0x2A]);
    fs::write(save_path(&temp), &bytes).unwrap();
    let (config, messages) = config_with_sink(&temp);

    let store = SaveStore::open(config).unwrap();

    assert!(store.is_empty());
    assert!(store.get_raw("k").is_none());
    assert_eq!(messages.lock().unwrap().len(), 1);
    // The foreign file is left untouched
    assert_eq!(fs::read(save_path(&temp)).unwrap(), bytes);
}

#[test]
fn test_load_of_deleted_file_keeps_mapping() {
    let temp = TempDir::new().unwrap();
    let (config, messages) = config_with_sink(&temp);
    let store = SaveStore::open(config).unwrap();
    store.set_bool("flag", true);
    fs::remove_file(save_path(&temp)).unwrap();

    let result = store.load();

    assert!(matches!(result, Err(StoreError::Io(_))));
    assert!(store.get_bool("flag", false));
    let messages = messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("READ - Io"));
}

#[test]
fn test_save_failure_is_reported() {
    let temp = TempDir::new().unwrap();
    let (config, messages) = config_with_sink(&temp);
    let store = SaveStore::open(config).unwrap();

    // Replace the file with a directory so the write cannot open it
    fs::remove_file(save_path(&temp)).unwrap();
    fs::create_dir(save_path(&temp)).unwrap();

    assert!(store.save().is_err());
    let messages = messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("WRITE - Io"));
}

// =============================================================================
// Get / Set Tests
// =============================================================================

#[test]
fn test_get_unknown_key_returns_default() {
    let (_temp, store) = setup_temp_store();

    assert_eq!(store.get("missing", Int32, -1), -1);
    assert_eq!(store.get("missing", Utf8, "dflt".to_string()), "dflt");
    assert_eq!(store.get("missing", Raw, vec![9]), vec![9]);
    assert_eq!(store.lookup::<i32, _>("missing", Int32), Lookup::Missing);
}

#[test]
fn test_get_undecodable_value_returns_default() {
    let (_temp, store) = setup_temp_store();
    store.set_raw("short", vec![1, 2]);

    assert_eq!(store.get("short", Int32, 99), 99);
    assert_eq!(
        store.lookup::<i32, _>("short", Int32),
        Lookup::Invalid(CodecError::TooShort { expected: 4, actual: 2 })
    );
    // The stored bytes are left alone
    assert_eq!(store.get_raw("short"), Some(vec![1, 2]));
}

#[test]
fn test_get_or_add_inserts_once() {
    let (_temp, store) = setup_temp_store();

    let first = store.get_or_add("coins", Int32, 100, Int32);
    let snapshot = store.snapshot();
    let second = store.get_or_add("coins", Int32, 500, Int32);

    assert_eq!(first, 100);
    assert_eq!(second, 100);
    assert_eq!(store.snapshot(), snapshot);
}

#[test]
fn test_get_or_add_keeps_undecodable_value() {
    let (_temp, store) = setup_temp_store();
    store.set_raw("odd", vec![0x41]);

    let value = store.get_or_add("odd", Utf16Le, "fallback".to_string(), Utf16Le);

    assert_eq!(value, "fallback");
    assert_eq!(store.get_raw("odd"), Some(vec![0x41]));
}

#[test]
fn test_get_or_add_is_in_memory_until_save() {
    let temp = TempDir::new().unwrap();
    {
        let store = SaveStore::open(config_in(&temp)).unwrap();
        store.get_or_add_i32("level", 3);
    }
    let store = SaveStore::open(config_in(&temp)).unwrap();
    assert!(!store.contains_key("level"));
}

#[test]
fn test_set_overwrites() {
    let (_temp, store) = setup_temp_store();
    store.set_string("name", "first");
    store.set_string("name", "second");

    assert_eq!(store.len(), 1);
    assert_eq!(store.get_string("name", ""), "second");
}

#[test]
fn test_set_encode_failure_is_returned_not_stored() {
    struct Rejecting;
    impl binsave::Encoder<u32> for Rejecting {
        fn encode(&self, _value: &u32) -> Result<Vec<u8>, CodecError> {
            Err(CodecError::Serialization("nope".to_string()))
        }
    }

    let (_temp, store) = setup_temp_store();
    assert!(store.set("k", Rejecting, &1).is_err());
    assert!(!store.contains_key("k"));

    assert_eq!(store.get_or_add("k", binsave::codec::UInt32, 5, Rejecting), 5);
    assert!(!store.contains_key("k"));
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    level: u32,
    unlocked: Vec<String>,
}

#[test]
fn test_serde_values_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let profile = Profile {
        name: "ada".to_string(),
        level: 12,
        unlocked: vec!["forest".to_string(), "cave".to_string()],
    };
    {
        let store = SaveStore::open(config_in(&temp)).unwrap();
        store.set("profile", Bincode::<Profile>::new(), &profile).unwrap();
        store.save().unwrap();
    }

    let store = SaveStore::open(config_in(&temp)).unwrap();
    let loaded = store.lookup("profile", Bincode::<Profile>::new()).found();
    assert_eq!(loaded, Some(profile));
}

#[test]
fn test_empty_value_and_empty_key_round_trip() {
    let temp = TempDir::new().unwrap();
    {
        let store = SaveStore::open(config_in(&temp)).unwrap();
        store.set_raw("", vec![1]);
        store.set_raw("empty", Vec::new());
        store.save().unwrap();
    }

    let store = SaveStore::open(config_in(&temp)).unwrap();
    assert_eq!(store.get_raw(""), Some(vec![1]));
    assert_eq!(store.get_raw("empty"), Some(Vec::new()));
}

#[test]
fn test_clear_then_save_empties_file() {
    let (temp, store) = setup_temp_store();
    store.set_u8("a", 1);
    store.save().unwrap();

    store.clear();
    store.save().unwrap();

    assert_eq!(fs::read(save_path(&temp)).unwrap().len(), 8);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_set_and_save() {
    let (temp, store) = setup_temp_store();
    let store = Arc::new(store);
    let saves = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            let saves = Arc::clone(&saves);
            thread::spawn(move || {
                for i in 0..50 {
                    store.set_u32(&format!("t{}_k{}", t, i), i);
                    if i % 10 == 0 {
                        store.save().unwrap();
                        saves.fetch_add(1, Ordering::SeqCst);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    store.save().unwrap();

    assert_eq!(saves.load(Ordering::SeqCst), 20);
    let reopened = SaveStore::open(config_in(&temp)).unwrap();
    assert_eq!(reopened.len(), 200);
    assert_eq!(reopened.get_u32("t3_k49", 0), 49);
}
