use mdcollect::cli::{Action, Config};
use mdcollect::{CollectionStore, DROP_FILE_NAME, render, run};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Builds a Config whose state file and menu directory live under `dir`,
/// so tests never touch the real well-known locations.
fn test_config(dir: &Path) -> Config {
    Config {
        state_path: dir.join("state.json"),
        menu_dir: dir.join("servicemenus"),
        home: dir.to_path_buf(),
        exec_path: "/usr/local/bin/mdcollect".into(),
    }
}

#[tokio::test]
async fn store_then_render_round_trip() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());

    let file_a = dir.path().join("a.rs");
    fs::write(&file_a, "fn main() {}").unwrap();

    let sub = dir.path().join("srcdir");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("x.py"), "print('x')\n").unwrap();
    fs::write(sub.join("x.bin"), b"\x00\x01\x02\x03").unwrap();

    run(
        Action::Store(vec![
            file_a.to_string_lossy().into_owned(),
            sub.to_string_lossy().into_owned(),
        ]),
        &config,
    )
    .await
    .unwrap();

    let items = CollectionStore::new(config.state_path.clone()).load();
    assert_eq!(items.len(), 2, "binary x.bin must be classified out");

    let md = render(&items);
    assert!(md.contains("### 📄 a.rs"));
    assert!(md.contains("```rs\nfn main() {}\n```"));
    assert!(md.contains("### 📄 x.py"));
    assert!(!md.contains("x.bin"));
}

#[tokio::test]
async fn storing_the_same_file_twice_keeps_one_item() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    let file = dir.path().join("notes.md");
    fs::write(&file, "# notes\n").unwrap();

    let paths = vec![file.to_string_lossy().into_owned()];
    run(Action::Store(paths.clone()), &config).await.unwrap();
    run(Action::Store(paths), &config).await.unwrap();

    let items = CollectionStore::new(config.state_path.clone()).load();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn drop_writes_the_document_and_clears_the_state() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    let file = dir.path().join("notes.md");
    fs::write(&file, "drop me\n").unwrap();
    run(Action::Store(vec![file.to_string_lossy().into_owned()]), &config)
        .await
        .unwrap();

    let target = dir.path().join("out");
    fs::create_dir(&target).unwrap();
    run(Action::Drop(target.clone()), &config).await.unwrap();

    let document = fs::read_to_string(target.join(DROP_FILE_NAME)).unwrap();
    assert!(document.contains("### 📄 notes.md"));
    assert!(document.contains("drop me"));

    let items = CollectionStore::new(config.state_path.clone()).load();
    assert!(items.is_empty(), "drop must clear the collection");
}

#[tokio::test]
async fn drop_on_empty_collection_writes_nothing() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());

    let target = dir.path().join("out");
    fs::create_dir(&target).unwrap();
    run(Action::Drop(target.clone()), &config).await.unwrap();

    assert!(!target.join(DROP_FILE_NAME).exists());
}

#[tokio::test]
async fn remove_and_clear_regenerate_the_menus() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    let file = dir.path().join("a.md");
    fs::write(&file, "alpha").unwrap();
    let path = file.to_string_lossy().into_owned();
    run(Action::Store(vec![path.clone()]), &config).await.unwrap();

    let files_menu = config.menu_dir.join("mdcollect-files.desktop");
    assert!(
        fs::read_to_string(&files_menu).unwrap().contains("RemoveItem0"),
        "stored item must get a remove menu action"
    );

    run(Action::Remove(path), &config).await.unwrap();
    assert!(!fs::read_to_string(&files_menu).unwrap().contains("RemoveItem0"));

    run(Action::Clear, &config).await.unwrap();
    let items = CollectionStore::new(config.state_path.clone()).load();
    assert!(items.is_empty());
}

#[tokio::test]
async fn init_generates_both_menu_descriptors() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());

    run(Action::Init, &config).await.unwrap();

    assert!(config.menu_dir.join("mdcollect-files.desktop").exists());
    assert!(config.menu_dir.join("mdcollect-folders.desktop").exists());
}

#[tokio::test]
async fn persisted_state_is_a_pretty_json_array() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    let file = dir.path().join("a.md");
    fs::write(&file, "alpha").unwrap();
    run(Action::Store(vec![file.to_string_lossy().into_owned()]), &config)
        .await
        .unwrap();

    let raw = fs::read_to_string(&config.state_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["name"], "a.md");
    assert_eq!(arr[0]["content"], "alpha");
    assert!(raw.contains('\n'), "state file is pretty-printed");
}
