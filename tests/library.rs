use promptcraft::library::{PromptLibrary, Upsert};

#[test]
fn upsert_replaces_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    let mut lib = PromptLibrary::load(dir.path().join("lib.json"));

    assert_eq!(lib.upsert("Fox", "a red fox").unwrap(), Upsert::Inserted);
    assert_eq!(lib.upsert("  FOX ", "an arctic fox").unwrap(), Upsert::Replaced);
    assert_eq!(lib.len(), 1);
    let entry = lib.find("fox").unwrap();
    assert_eq!(entry.name, "FOX");
    assert_eq!(entry.prompt, "an arctic fox");
}

#[test]
fn listing_is_sorted_ignoring_case() {
    let dir = tempfile::tempdir().unwrap();
    let mut lib = PromptLibrary::load(dir.path().join("lib.json"));
    for name in ["beta", "Alpha", "gamma", "Delta"] {
        lib.upsert(name, "p").unwrap();
    }
    let names: Vec<&str> = lib.sorted().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "beta", "Delta", "gamma"]);
}

#[test]
fn remove_reports_whether_anything_changed() {
    let dir = tempfile::tempdir().unwrap();
    let mut lib = PromptLibrary::load(dir.path().join("lib.json"));
    lib.upsert("Fox", "a red fox").unwrap();
    assert!(!lib.remove("wolf").unwrap());
    assert!(lib.remove("FOX").unwrap());
    assert!(lib.is_empty());
}

#[test]
fn changes_persist_as_pretty_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lib.json");
    {
        let mut lib = PromptLibrary::load(&path);
        lib.upsert("Fox", "a red fox").unwrap();
        lib.upsert("Harbour", "a quiet harbour").unwrap();
        lib.remove("fox").unwrap();
    }
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\n  {"));
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "name": "Harbour", "prompt": "a quiet harbour" }])
    );

    let reloaded = PromptLibrary::load(&path);
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.path(), path.as_path());
}

#[test]
fn malformed_file_loads_empty_and_is_replaced_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lib.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut lib = PromptLibrary::load(&path);
    assert!(lib.is_empty());
    lib.upsert("Fox", "a red fox").unwrap();
    assert_eq!(PromptLibrary::load(&path).len(), 1);
}

#[test]
fn empty_prompt_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut lib = PromptLibrary::load(dir.path().join("lib.json"));
    assert!(lib.upsert("Fox", "   ").is_err());
    assert!(!dir.path().join("lib.json").exists());
}
