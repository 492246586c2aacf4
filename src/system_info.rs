use git_version::git_version;

// -modified marks a dirty working tree
const COMMIT: &str = git_version!(
    args = ["--abbrev=10", "--always", "--dirty=-modified"],
    fallback = "unknown"
);

fn version_line(release: &str, latest: &str, ahead: &str) -> String {
    match (release, latest, ahead) {
        (tag, _, _) if !tag.is_empty() => format!("release {tag}"),
        (_, "", _) => "development".to_string(),
        (_, latest, "") | (_, latest, "0") => format!("development build of {latest}"),
        (_, latest, ahead) => format!("development branch {ahead} commits ahead of {latest}"),
    }
}

pub fn get_system_info() -> String {
    let profile = if cfg!(debug_assertions) {
        "Dev"
    } else {
        "Release"
    };

    let version = version_line(
        option_env!("RELEASE_VERSION").unwrap_or(""),
        option_env!("LATEST_TAG").unwrap_or(""),
        option_env!("COMMITS_AHEAD").unwrap_or(""),
    );

    format!(
        "{} {} - {}\nCommit: {}\n{} build",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        version,
        COMMIT,
        profile
    )
}
