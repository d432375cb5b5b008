use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static INVALID_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]+").expect("valid regex"));

/// Project name for a directory: lowercased, runs of characters outside
/// `[a-z0-9-]` collapsed to `-`, no leading or trailing `-`.
pub fn project_name(dir: &Path) -> String {
    let raw = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let name = INVALID_NAME_CHARS.replace_all(&raw, "-");
    let name = name.trim_matches('-');

    if name.is_empty() {
        "my-project".to_string()
    } else {
        name.to_string()
    }
}

/// Default container name for the project in `dir`
pub fn default_container_name(dir: &Path) -> String {
    format!("{}-dev", project_name(dir))
}

/// Default container name for the current directory
pub fn current_container_name() -> Result<String> {
    let cwd = std::env::current_dir().context("Could not determine current directory")?;
    Ok(default_container_name(&cwd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_plain() {
        assert_eq!(project_name(Path::new("/home/u/nodejs-express")), "nodejs-express");
    }

    #[test]
    fn test_project_name_sanitized() {
        assert_eq!(project_name(Path::new("/src/My_App.v2")), "my-app-v2");
        assert_eq!(project_name(Path::new("/src/__weird__")), "weird");
    }

    #[test]
    fn test_project_name_fallback() {
        assert_eq!(project_name(Path::new("/")), "my-project");
        assert_eq!(project_name(Path::new("/src/___")), "my-project");
    }

    #[test]
    fn test_default_container_name() {
        assert_eq!(
            default_container_name(Path::new("/work/nodejs-express")),
            "nodejs-express-dev"
        );
    }
}
