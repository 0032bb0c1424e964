use serde::{Deserialize, Serialize};

/// Repository metadata as returned by the GitHub REST API.
///
/// Only the fields the note template can reference are modeled; everything
/// else the API sends is ignored on deserialize.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct RepoRecord {
    pub name: String,

    pub owner: RepoOwner,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub license: Option<RepoLicense>,

    #[serde(default)]
    pub html_url: String,

    /// ISO-8601 timestamp; the renderer keeps only the date part.
    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub default_branch: String,

    /// Decoded readme text, attached after a second fetch.
    /// Missing readme is an empty string, never an error.
    #[serde(default)]
    pub readme_text: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct RepoOwner {
    pub login: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct RepoLicense {
    pub name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EntryKind {
    File,
    Folder,
}

/// One node of the vault tree as seen by the suggestion sources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct VaultEntry {
    pub path: String,
    pub kind: EntryKind,
}

/// Plugin-style configuration, persisted to localStorage and merged over
/// defaults on load (unknown keys are dropped, missing keys take defaults).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct Settings {
    pub auth_token: String,
    pub destination_folder: String,
    pub file_name_pattern: String,
    pub template_path: String,
    pub open_after_create: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auth_token: String::new(),
            destination_folder: String::new(),
            file_name_pattern: "{{repo_name}}.md".to_string(),
            template_path: "repo-template.md".to_string(),
            open_after_create: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_record_deserializes_github_payload() {
        // Shape taken from api.github.com/repos/{owner}/{repo}.
        let json = r#"{
            "name": "leptos",
            "owner": {"login": "leptos-rs", "id": 1},
            "description": "Build web apps in Rust",
            "language": "Rust",
            "license": {"key": "mit", "name": "MIT License"},
            "html_url": "https://github.com/leptos-rs/leptos",
            "created_at": "2022-07-10T17:00:00Z",
            "default_branch": "main",
            "stargazers_count": 12345
        }"#;
        let r: RepoRecord = serde_json::from_str(json).expect("repo payload should parse");
        assert_eq!(r.name, "leptos");
        assert_eq!(r.owner.login, "leptos-rs");
        assert_eq!(r.license.as_ref().map(|l| l.name.as_str()), Some("MIT License"));
        assert_eq!(r.default_branch, "main");
        assert!(r.readme_text.is_empty());
    }

    #[test]
    fn repo_record_tolerates_null_fields() {
        let json = r#"{
            "name": "bare",
            "owner": {"login": "u"},
            "description": null,
            "language": null,
            "license": null,
            "html_url": "https://github.com/u/bare",
            "created_at": "2024-01-02T03:04:05Z",
            "default_branch": "master"
        }"#;
        let r: RepoRecord = serde_json::from_str(json).expect("nullable fields should parse");
        assert!(r.description.is_none());
        assert!(r.license.is_none());
    }

    #[test]
    fn settings_merge_over_defaults() {
        // A stored blob from an older version that only knows the token.
        let json = r#"{"auth_token": "ghp_x"}"#;
        let s: Settings = serde_json::from_str(json).expect("partial settings should parse");
        assert_eq!(s.auth_token, "ghp_x");
        assert_eq!(s.file_name_pattern, "{{repo_name}}.md");
        assert_eq!(s.template_path, "repo-template.md");
        assert!(s.open_after_create);
    }
}
