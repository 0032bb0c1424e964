use crate::models::RepoRecord;

const API_BASE: &str = "https://api.github.com";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status})"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Thin GitHub REST v3 client. A token is optional; with one, private repos
/// resolve and the rate limit is higher.
#[derive(Clone, Default)]
pub(crate) struct GitHubClient {
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        Self { token }
    }

    fn with_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        // GitHub still accepts the classic "token" scheme for PATs.
        let req = match &self.token {
            Some(token) => req.header("Authorization", format!("token {token}")),
            None => req,
        };
        req.header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    /// `GET /repos/{owner}/{name}`, deserialized into the template's record.
    pub async fn fetch_repo(&self, owner: &str, name: &str) -> ApiResult<RepoRecord> {
        let client = reqwest::Client::new();
        let url = format!("{API_BASE}/repos/{owner}/{name}");
        let req = self.with_auth(client.get(url));

        let res = req.send().await.map_err(ApiError::network)?;
        if !res.status().is_success() {
            return Err(ApiError::http(res.status(), "Repository lookup failed"));
        }

        res.json::<RepoRecord>().await.map_err(ApiError::parse)
    }

    /// `GET /repos/{owner}/{name}/readme` as raw text.
    ///
    /// A repository without a readme is normal, so every failure here
    /// degrades to an empty string rather than an error.
    pub async fn fetch_readme(&self, owner: &str, name: &str) -> String {
        let client = reqwest::Client::new();
        let url = format!("{API_BASE}/repos/{owner}/{name}/readme");
        let req = match &self.token {
            Some(token) => client
                .get(url)
                .header("Authorization", format!("token {token}")),
            None => client.get(url),
        }
        .header("Accept", "application/vnd.github.raw+json");

        let Ok(res) = req.send().await else {
            return String::new();
        };
        if !res.status().is_success() {
            return String::new();
        }
        res.text().await.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_treated_as_absent() {
        assert!(GitHubClient::new(None).token.is_none());
        assert!(GitHubClient::new(Some("  ".to_string())).token.is_none());
        assert_eq!(
            GitHubClient::new(Some("ghp_x".to_string())).token.as_deref(),
            Some("ghp_x")
        );
    }
}
