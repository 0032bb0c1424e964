use crate::models::RepoRecord;

/// Fill a note template with repository metadata.
///
/// Plain global string substitution: every occurrence of each known
/// placeholder is replaced, matched literally and case-sensitively.
/// Unknown placeholders stay as-is; there is no conditional/loop syntax.
/// Absent fields render as "" except the license, which renders as "None".
pub(crate) fn render(template: &str, record: &RepoRecord) -> String {
    let license = record
        .license
        .as_ref()
        .map(|l| l.name.as_str())
        .unwrap_or("None");

    // created_at is ISO-8601; keep only YYYY-MM-DD.
    let created = record.created_at.get(..10).unwrap_or(&record.created_at);

    let pairs: [(&str, &str); 9] = [
        ("{{repo_name}}", &record.name),
        ("{{owner}}", &record.owner.login),
        ("{{description}}", record.description.as_deref().unwrap_or("")),
        ("{{language}}", record.language.as_deref().unwrap_or("")),
        ("{{license}}", license),
        ("{{repo_url}}", &record.html_url),
        ("{{created_at}}", created),
        ("{{default_branch}}", &record.default_branch),
        ("{{readme_content}}", &record.readme_text),
    ];

    let mut out = template.to_string();
    for (token, value) in pairs {
        if out.contains(token) {
            out = out.replace(token, value);
        }
    }
    out
}

/// Destination path for a new note: configured folder joined with the
/// file-name pattern, which understands `{{repo_name}}` and `{{owner}}`.
/// An empty folder writes at the vault root; the join uses exactly one `/`.
pub(crate) fn note_file_path(folder: &str, pattern: &str, record: &RepoRecord) -> String {
    let pattern = if pattern.trim().is_empty() {
        "{{repo_name}}.md"
    } else {
        pattern
    };

    let file_name = pattern
        .replace("{{repo_name}}", &record.name)
        .replace("{{owner}}", &record.owner.login);

    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        file_name
    } else {
        format!("{}/{}", folder, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RepoLicense, RepoOwner};

    fn record(name: &str, owner: &str) -> RepoRecord {
        RepoRecord {
            name: name.to_string(),
            owner: RepoOwner {
                login: owner.to_string(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn render_substitutes_known_placeholders() {
        let mut r = record("foo", "bar");
        r.description = Some("a tool".to_string());
        r.html_url = "https://github.com/bar/foo".to_string();
        r.created_at = "2023-05-17T09:30:00Z".to_string();
        r.default_branch = "main".to_string();

        let out = render(
            "{{owner}}/{{repo_name}}: {{description}} ({{created_at}}, {{default_branch}}) {{repo_url}}",
            &r,
        );
        assert_eq!(
            out,
            "bar/foo: a tool (2023-05-17, main) https://github.com/bar/foo"
        );
    }

    #[test]
    fn render_missing_license_is_none_other_fields_empty() {
        let mut r = record("foo", "bar");
        r.license = None;
        let out = render("Name: {{repo_name}}, Lic: {{license}}, Lang: {{language}}", &r);
        assert_eq!(out, "Name: foo, Lic: None, Lang: ");
    }

    #[test]
    fn render_present_license_uses_its_name() {
        let mut r = record("foo", "bar");
        r.license = Some(RepoLicense {
            name: "MIT License".to_string(),
        });
        assert_eq!(render("{{license}}", &r), "MIT License");
    }

    #[test]
    fn render_replaces_every_occurrence() {
        let r = record("foo", "bar");
        assert_eq!(render("{{repo_name}} {{repo_name}}", &r), "foo foo");
    }

    #[test]
    fn render_leaves_unknown_placeholders() {
        let r = record("foo", "bar");
        assert_eq!(render("{{stars}} {{repo_name}}", &r), "{{stars}} foo");
    }

    #[test]
    fn note_path_joins_folder_and_pattern() {
        let r = record("bar", "baz");
        assert_eq!(
            note_file_path("notes", "{{owner}}-{{repo_name}}.md", &r),
            "notes/baz-bar.md"
        );
    }

    #[test]
    fn note_path_root_folder_and_default_pattern() {
        let r = record("bar", "baz");
        assert_eq!(note_file_path("", "", &r), "bar.md");
        assert_eq!(note_file_path("/", "{{repo_name}}.md", &r), "bar.md");
    }

    #[test]
    fn note_path_trailing_slash_folder() {
        let r = record("bar", "baz");
        assert_eq!(note_file_path("notes/", "{{repo_name}}.md", &r), "notes/bar.md");
    }
}
