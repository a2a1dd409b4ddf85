mod fixtures;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use fixtures::{CountingStore, StatsFaultStore, run, terminal, terminal_on};
use ts64_kernel::prelude::{AccessKey, InputFile, MediaKind, StatsRecord};
use ts64_storage::{FileStore, KeyValueStore, StoredValue};
use ts64_terminal::{Payload, Response, TerminalError};

fn stashed_key(response: &Response) -> AccessKey {
    match response {
        Response::Stashed { key, .. } | Response::AudioStashed { key, .. } | Response::VideoExported { key, .. } => {
            key.clone()
        },
        other => panic!("expected a new key, got {other:?}"),
    }
}

#[tokio::test]
async fn test_encode_and_decode_commands() {
    let (terminal, _, _) = terminal();

    let encoded = run(&terminal, "encode HI").await.unwrap();
    assert!(encoded.to_string().contains("> 0100100001001001"));
    assert!(encoded.to_string().contains("Sequence: 1 BLOCKS"));

    let decoded = run(&terminal, "decode 01001000 01001001").await.unwrap();
    assert_eq!(decoded, Response::Decoded { text: "HI".into(), blocks: 2 });
}

#[tokio::test]
async fn test_missing_arguments_are_input_errors() {
    let (terminal, _, _) = terminal();

    for line in ["encode", "decode", "stash", "unlock", "export   "] {
        let err = run(&terminal, line).await.unwrap_err();
        assert!(matches!(err, TerminalError::Input { .. }), "{line}: {err}");
    }
    assert_eq!(terminal.ledger().get().await.unwrap().total(), 0);
}

#[tokio::test]
async fn test_invalid_phrase_is_a_codec_error() {
    let (terminal, _, _) = terminal();
    assert!(matches!(run(&terminal, "decode 0100100").await, Err(TerminalError::Codec { .. })));
    assert!(matches!(run(&terminal, "decode 2222").await, Err(TerminalError::Codec { .. })));
}

#[tokio::test]
async fn test_stash_then_unlock_text() {
    let (terminal, _, _) = terminal();

    let key = stashed_key(&run(&terminal, "stash secret").await.unwrap());
    let unlocked = run(&terminal, &format!("unlock {}", key.as_str().to_lowercase())).await.unwrap();

    assert_eq!(
        unlocked,
        Response::Unlocked {
            id: key.stash_id().clone(),
            payload: Payload::Text { text: "secret".into(), blocks: 1 },
        }
    );
    assert_eq!(terminal.ledger().get().await.unwrap(), StatsRecord { text: 1, audio: 0, video: 0 });
}

#[tokio::test]
async fn test_stash_preserves_argument_whitespace_and_case() {
    let (terminal, _, _) = terminal();

    let key = stashed_key(&run(&terminal, "STASH   Meet  at Dawn ").await.unwrap());
    let Response::Unlocked { payload: Payload::Text { text, .. }, .. } =
        run(&terminal, &format!("unlock {key}")).await.unwrap()
    else {
        panic!("expected text");
    };
    assert_eq!(text, "Meet  at Dawn");
}

#[tokio::test]
async fn test_identical_plaintexts_get_distinct_keys_and_bundles() {
    let (terminal, _, _) = terminal();

    let first = stashed_key(&run(&terminal, "stash same").await.unwrap());
    let second = stashed_key(&run(&terminal, "stash same").await.unwrap());
    assert_ne!(first.stash_id(), second.stash_id());

    let a = terminal.store().get(&first.stash_id().store_key()).await.unwrap().unwrap();
    let b = terminal.store().get(&second.stash_id().store_key()).await.unwrap().unwrap();
    assert_ne!(a, b);
    assert_eq!(terminal.ledger().get().await.unwrap().text, 2);
}

#[tokio::test]
async fn test_malformed_key_never_reaches_the_store() {
    let (terminal, _, _) = terminal_on(CountingStore::default());

    for line in ["unlock TS64-ABCD", "unlock XX64-ABCD-EFGH", "unlock TS64-AB-CDEFGH", "export nonsense"] {
        let err = run(&terminal, line).await.unwrap_err();
        assert!(err.to_string().contains("Expected TS64-XXXX-XXXX"), "{line}: {err}");
    }
    assert_eq!(terminal.store().gets(), 0);
}

#[tokio::test]
async fn test_unlock_unknown_key_on_empty_vault() {
    let (terminal, _, _) = terminal();

    let err = run(&terminal, "unlock TS64-0000-0000").await.unwrap_err();
    assert!(matches!(err, TerminalError::NotFound { .. }));
    assert!(err.to_string().contains("0000"));
}

#[tokio::test]
async fn test_wrong_suffix_is_access_denied() {
    let (terminal, _, _) = terminal();

    let key = stashed_key(&run(&terminal, "stash secret").await.unwrap());
    let suffix = if key.as_str().ends_with("AAAA") { "BBBB" } else { "AAAA" };
    let wrong = format!("TS64-{}-{suffix}", key.stash_id());

    let err = run(&terminal, &format!("unlock {wrong}")).await.unwrap_err();
    assert!(matches!(err, TerminalError::AccessDenied { .. }));
    assert_eq!(err.to_string(), "Access denied: incorrect key or corrupted payload");
}

#[tokio::test]
async fn test_short_or_undecodable_values_are_access_denied() {
    let (terminal, _, _) = terminal();

    terminal.store().set("STASH_AAAA", StoredValue::Bundle(vec![0; 27])).await.unwrap();
    terminal.store().set("STASH_BBBB", StoredValue::LegacyBase64Text("@@not base64@@".into())).await.unwrap();

    for line in ["unlock TS64-AAAA-AAAA", "unlock TS64-BBBB-BBBB"] {
        assert!(matches!(run(&terminal, line).await, Err(TerminalError::AccessDenied { .. })), "{line}");
    }
}

#[tokio::test]
async fn test_legacy_base64_value_unlocks_and_exports_decoded() {
    let (terminal, _, downloads) = terminal();

    let key = AccessKey::parse("TS64-LGCY-0001").unwrap();
    let bundle = fixtures::fast_vault().encrypt(b"01001000 01001001", key.as_str()).unwrap();
    let legacy = STANDARD.encode(bundle.as_slice());
    terminal.store().set("STASH_LGCY", StoredValue::LegacyBase64Text(legacy)).await.unwrap();

    let unlocked = run(&terminal, "unlock TS64-LGCY-0001").await.unwrap();
    assert!(matches!(unlocked, Response::Unlocked { payload: Payload::Text { ref text, .. }, .. } if text == "HI"));

    run(&terminal, "export TS64-LGCY-0001").await.unwrap();
    assert_eq!(downloads.get("backup_LGCY.ts64").unwrap(), bundle.as_slice());
}

#[tokio::test]
async fn test_export_then_restore_into_fresh_vault() {
    let (source, _, downloads) = terminal();
    let key = stashed_key(&run(&source, "stash carry me").await.unwrap());

    let exported = run(&source, &format!("export {key}")).await.unwrap();
    let name = format!("backup_{}.ts64", key.stash_id());
    assert_eq!(exported, Response::Exported { id: key.stash_id().clone(), output: name.clone() });

    let (target, _, _) = terminal();
    let bytes = downloads.get(&name).unwrap();
    let restored = target.restore(InputFile::new(name, bytes)).await.unwrap();
    assert!(restored.to_string().contains(&format!("unlock TS64-{}-XXXX", key.stash_id())));

    let unlocked = run(&target, &format!("unlock {key}")).await.unwrap();
    assert!(unlocked.to_string().contains("carry me"));
    assert_eq!(target.ledger().get().await.unwrap().total(), 0);
}

#[tokio::test]
async fn test_export_advice_is_a_working_command() {
    let (source, _, downloads) = terminal();
    let key = stashed_key(&run(&source, "stash round trip").await.unwrap());
    let exported = run(&source, &format!("export {key}")).await.unwrap().to_string();

    let advice = exported
        .lines()
        .find_map(|line| line.strip_prefix("Restore it later with: "))
        .expect("export should say how to restore");

    let (target, files, _) = terminal();
    let name = format!("backup_{}.ts64", key.stash_id());
    files.add(&name, &downloads.get(&name).unwrap());

    let restored = run(&target, advice).await.unwrap();
    assert!(matches!(restored, Response::Restored { .. }));
    assert!(run(&target, &format!("unlock {key}")).await.unwrap().to_string().contains("round trip"));
}

#[tokio::test]
async fn test_restore_command_requires_a_backup() {
    let (terminal, files, _) = terminal();
    files.add("song.mp3", b"ID3");

    assert!(matches!(run(&terminal, "restore").await, Err(TerminalError::Input { .. })));
    assert!(matches!(run(&terminal, "restore song.mp3").await, Err(TerminalError::Input { .. })));
    assert!(terminal.store().list_keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_export_missing_stash_is_not_found() {
    let (terminal, _, downloads) = terminal();
    assert!(matches!(run(&terminal, "export TS64-NONE-0000").await, Err(TerminalError::NotFound { .. })));
    assert!(downloads.names().is_empty());
}

#[tokio::test]
async fn test_restore_rejects_malformed_names() {
    let (terminal, _, _) = terminal();

    let err = terminal.restore(InputFile::new("backup.ts64", vec![0; 40])).await.unwrap_err();
    assert!(matches!(err, TerminalError::Input { .. }));
    assert!(terminal.store().list_keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_stash_audio_roundtrip() {
    let (terminal, files, _) = terminal();
    let wav = b"RIFF\x24\x08\x00\x00WAVEfmt \x10\x00\x00\x00".to_vec();
    files.add("beat.WAV", &wav);

    let response = run(&terminal, "stash_audio beat.WAV").await.unwrap();
    assert!(response.to_string().starts_with("AUDIO STASH SECURED"));
    let key = stashed_key(&response);

    let unlocked = run(&terminal, &format!("unlock {key}")).await.unwrap();
    assert_eq!(unlocked, Response::Unlocked { id: key.stash_id().clone(), payload: Payload::Opaque(wav) });
    assert_eq!(terminal.ledger().get().await.unwrap().audio, 1);
}

#[tokio::test]
async fn test_stash_video_downloads_without_storing() {
    let (terminal, files, downloads) = terminal();
    files.add("clip.mp4", &[0, 0, 0, 0x18, b'f', b't', b'y', b'p']);

    let response = run(&terminal, "stash_video clip.mp4").await.unwrap();
    let key = stashed_key(&response);
    let output = format!("classified_footage_{}.ts64vid", key.stash_id());

    assert!(downloads.get(&output).is_some_and(|b| b.len() == 8 + 44));
    assert!(terminal.store().list_keys().await.unwrap().iter().all(|k| !k.starts_with("STASH_")));
    assert_eq!(terminal.ledger().get().await.unwrap().video, 1);

    // The download restores like any backup.
    let restored = terminal
        .stash_file(MediaKind::Video, InputFile::new(output.clone(), downloads.get(&output).unwrap()))
        .await
        .unwrap();
    assert!(matches!(restored, Response::Restored { .. }));
    assert!(run(&terminal, &format!("unlock {key}")).await.is_ok());
    assert_eq!(terminal.ledger().get().await.unwrap().video, 1);
}

#[tokio::test]
async fn test_media_validation() {
    let (terminal, files, _) = terminal();
    files.add("notes.txt", b"hello");
    files.add("song.mp3", b"ID3");

    let err = run(&terminal, "stash_audio notes.txt").await.unwrap_err();
    assert!(err.to_string().contains("Unsupported file format"));
    assert!(err.to_string().contains("notes.txt"));

    assert!(matches!(run(&terminal, "stash_video song.mp3").await, Err(TerminalError::Input { .. })));
    assert!(matches!(run(&terminal, "stash_audio missing.mp3").await, Err(TerminalError::Input { .. })));
    assert_eq!(terminal.ledger().get().await.unwrap().total(), 0);
}

#[tokio::test]
async fn test_purge_destroys_stashes_and_resets_ledger() {
    let (terminal, _, _) = terminal();

    for i in 0..3 {
        run(&terminal, &format!("stash item {i}")).await.unwrap();
    }
    terminal.store().set("UNRELATED", StoredValue::Bundle(vec![1])).await.unwrap();

    let purged = run(&terminal, "purge").await.unwrap();
    assert_eq!(purged, Response::Purged { destroyed: 3 });
    assert_eq!(terminal.ledger().get().await.unwrap().total(), 0);
    assert!(terminal.store().get("UNRELATED").await.unwrap().is_some());
}

#[tokio::test]
async fn test_purge_on_empty_vault() {
    let (terminal, _, _) = terminal();

    let purged = run(&terminal, "purge").await.unwrap();
    assert!(purged.to_string().contains("0 encrypted objects destroyed."));
    assert_eq!(terminal.ledger().get().await.unwrap(), StatsRecord::default());
}

#[tokio::test]
async fn test_status_reports_counts() {
    let (terminal, _, _) = terminal();
    run(&terminal, "stash one").await.unwrap();
    run(&terminal, "stash two").await.unwrap();

    let Response::Status(summary) = run(&terminal, "DASHBOARD").await.unwrap() else {
        panic!("expected status");
    };
    assert_eq!(summary.total_stashes, 2);
    assert_eq!(summary.stats.text, 2);
    assert!(summary.total_bytes > 0);
}

#[tokio::test]
async fn test_static_and_unknown_commands() {
    let (terminal, _, _) = terminal();

    assert_eq!(terminal.execute("   ").await.unwrap(), None);
    assert_eq!(run(&terminal, "help").await.unwrap(), Response::Help);
    assert_eq!(run(&terminal, "clear").await.unwrap(), Response::Clear);
    assert_eq!(
        run(&terminal, "Launch missiles").await.unwrap().to_string(),
        "Command not found: launch. Type help for commands."
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_stashes_keep_the_ledger_exact() {
    let (terminal, _, _) = terminal();
    let terminal = std::sync::Arc::new(terminal);

    let mut handles = Vec::new();
    for i in 0..12 {
        let terminal = terminal.clone();
        handles.push(tokio::spawn(async move { terminal.stash_text(&format!("payload {i}")).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(terminal.ledger().get().await.unwrap().text, 12);
    assert_eq!(terminal.store().list_keys().await.unwrap().iter().filter(|k| k.starts_with("STASH_")).count(), 12);
}

#[tokio::test]
async fn test_stashes_survive_reopening_the_file_store() {
    let temp = tempfile::TempDir::new().unwrap();
    let root = temp.path().join("vault");

    let store = FileStore::builder().root(&root).connect().await.unwrap();
    let (first, _, _) = terminal_on(store);
    let key = stashed_key(&run(&first, "stash durable").await.unwrap());
    drop(first);

    let store = FileStore::builder().root(&root).connect().await.unwrap();
    let (second, _, _) = terminal_on(store);
    assert!(run(&second, &format!("unlock {key}")).await.unwrap().to_string().contains("durable"));
    assert_eq!(second.ledger().get().await.unwrap().text, 1);
}

#[tokio::test]
async fn test_ledger_failure_leaves_no_orphan_stash() {
    let store = StatsFaultStore::default();
    let (terminal, files, _) = terminal_on(store.clone());
    files.add("song.mp3", b"ID3");

    assert!(matches!(run(&terminal, "stash lost key").await, Err(TerminalError::Ledger { .. })));
    assert!(matches!(run(&terminal, "stash_audio song.mp3").await, Err(TerminalError::Ledger { .. })));

    assert!(store.list_keys().await.unwrap().is_empty());
}
