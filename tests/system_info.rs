use promptcraft::get_system_info;

#[test]
fn test_system_info_contains_commit_and_profile() {
    let info = get_system_info();
    assert!(info.starts_with(env!("CARGO_PKG_NAME")));
    assert!(info.contains(env!("CARGO_PKG_VERSION")));
    assert!(info.contains("\nCommit: "));
    assert!(info.contains("Dev build") || info.contains("Release build"));
    assert!(info.contains("release") || info.contains("development"));
}
