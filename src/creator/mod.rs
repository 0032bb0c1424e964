use crate::api::{ApiResult, GitHubClient};
use crate::models::{RepoRecord, Settings};
use crate::template::{note_file_path, render};
use crate::vault::VaultDoc;
use std::future::Future;

/// An `owner/name` pair extracted from user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RepoIdent {
    pub owner: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum CreateError {
    /// Input is neither a github.com URL nor a bare `owner/name`.
    InvalidIdentifier,
    /// Network/auth/API failure while fetching metadata.
    FetchFailed(String),
    /// The configured template path does not resolve to a vault file.
    TemplateNotFound(String),
    /// Overwrite confirmation was declined.
    UserCancelled,
}

impl std::fmt::Display for CreateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIdentifier => {
                write!(f, "Enter a GitHub repository URL or owner/name")
            }
            Self::FetchFailed(msg) => write!(f, "Failed to fetch repository data: {msg}"),
            Self::TemplateNotFound(path) => write!(f, "Template file not found: {path}"),
            Self::UserCancelled => write!(f, "Note creation cancelled"),
        }
    }
}

fn valid_segment(s: &str) -> bool {
    !s.is_empty() && !s.contains(char::is_whitespace)
}

/// Parse a repository reference.
///
/// Accepted forms: anything containing `github.com/{owner}/{name}` (extra
/// path segments, query strings and a trailing `.git` are ignored), or a
/// bare `owner/name`. Anything else is `InvalidIdentifier`.
pub(crate) fn parse_repo_identifier(input: &str) -> Result<RepoIdent, CreateError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CreateError::InvalidIdentifier);
    }

    let rest = match input.find("github.com/") {
        Some(at) => &input[at + "github.com/".len()..],
        None => {
            // Bare owner/name: no scheme allowed.
            if input.contains("://") {
                return Err(CreateError::InvalidIdentifier);
            }
            input
        }
    };

    let mut segs = rest.split('/');
    let owner = segs.next().unwrap_or_default();
    let name = segs.next().unwrap_or_default();

    // Bare form must be exactly two segments, and a dotted first segment
    // is a stray hostname (GitHub owner names never contain dots); URLs
    // may carry more segments (tree/branch paths etc.) which we ignore.
    if !input.contains("github.com/") && (segs.next().is_some() || owner.contains('.')) {
        return Err(CreateError::InvalidIdentifier);
    }

    let name = name
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches(".git");

    if !valid_segment(owner) || !valid_segment(name) {
        return Err(CreateError::InvalidIdentifier);
    }

    Ok(RepoIdent {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

/// Metadata fetch seam. The real implementation is [`GitHubClient`];
/// tests substitute their own.
pub(crate) trait RepoFetcher {
    async fn fetch(&self, owner: &str, name: &str) -> ApiResult<RepoRecord>;
}

impl RepoFetcher for GitHubClient {
    async fn fetch(&self, owner: &str, name: &str) -> ApiResult<RepoRecord> {
        let mut record = self.fetch_repo(owner, name).await?;
        // A missing readme is an empty string, not an error.
        record.readme_text = self.fetch_readme(owner, name).await;
        Ok(record)
    }
}

/// Result of a successful creation; the caller persists the vault and
/// decides whether to open the note.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CreatedNote {
    pub path: String,
    pub content: String,
}

/// The fetch → render → write pipeline behind the repo-URL prompt.
///
/// Identifier parsing happens before any network call. The vault snapshot
/// is read-only here; on `Ok` the caller writes `content` at `path`.
/// Nothing serializes overlapping invocations: each one resolves its own
/// overwrite confirmation and the last write wins.
pub(crate) async fn create_repo_note<F, C, Fut>(
    input: &str,
    settings: &Settings,
    vault: &VaultDoc,
    fetcher: &F,
    confirm_overwrite: C,
) -> Result<CreatedNote, CreateError>
where
    F: RepoFetcher,
    C: FnOnce() -> Fut,
    Fut: Future<Output = bool>,
{
    let ident = parse_repo_identifier(input)?;

    let record = fetcher
        .fetch(&ident.owner, &ident.name)
        .await
        .map_err(|e| CreateError::FetchFailed(e.to_string()))?;

    let template = vault
        .read(&settings.template_path)
        .ok_or_else(|| CreateError::TemplateNotFound(settings.template_path.clone()))?
        .to_string();

    let path = note_file_path(
        &settings.destination_folder,
        &settings.file_name_pattern,
        &record,
    );

    if vault.exists(&path) && !confirm_overwrite().await {
        return Err(CreateError::UserCancelled);
    }

    let content = render(&template, &record);
    Ok(CreatedNote { path, content })
}
