use crate::models::{EntryKind, VaultEntry};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The whole vault as one JSON document: path -> note text.
///
/// Folders are not stored; they exist exactly when some file path has them
/// as a proper prefix. BTreeMap keeps the listing lexicographic without an
/// extra sort.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct VaultDoc {
    pub files: BTreeMap<String, String>,
}

/// Seeded on first run so the default `template_path` resolves out of the box.
pub(crate) const DEFAULT_TEMPLATE_PATH: &str = "repo-template.md";

pub(crate) const DEFAULT_TEMPLATE: &str = "\
# {{repo_name}}

- Owner: {{owner}}
- Description: {{description}}
- Language: {{language}}
- License: {{license}}
- URL: {{repo_url}}
- Created: {{created_at}}
- Default branch: {{default_branch}}

## Readme

{{readme_content}}
";

impl VaultDoc {
    pub fn seeded() -> Self {
        let mut doc = Self::default();
        doc.write(DEFAULT_TEMPLATE_PATH, DEFAULT_TEMPLATE);
        doc
    }

    pub fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn read(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn write(&mut self, path: &str, text: &str) {
        self.files.insert(path.to_string(), text.to_string());
    }

    pub fn remove(&mut self, path: &str) -> bool {
        self.files.remove(path).is_some()
    }

    /// Files and derived folders, each path once, lexicographically sorted.
    pub fn entries(&self) -> Vec<VaultEntry> {
        let mut folders: BTreeSet<String> = BTreeSet::new();
        for path in self.files.keys() {
            let mut end = 0;
            for (i, b) in path.bytes().enumerate() {
                if b == b'/' {
                    end = i;
                    if end > 0 {
                        folders.insert(path[..end].to_string());
                    }
                }
            }
        }

        let mut out: Vec<VaultEntry> = Vec::with_capacity(self.files.len() + folders.len());
        out.extend(folders.into_iter().map(|path| VaultEntry {
            path,
            kind: EntryKind::Folder,
        }));
        out.extend(self.files.keys().map(|path| VaultEntry {
            path: path.clone(),
            kind: EntryKind::File,
        }));
        out.sort_by(|a, b| a.path.cmp(&b.path));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(paths: &[&str]) -> VaultDoc {
        let mut doc = VaultDoc::default();
        for p in paths {
            doc.write(p, "x");
        }
        doc
    }

    #[test]
    fn entries_derive_nested_folders() {
        let doc = doc_with(&["notes/repos/a.md", "notes/b.md", "top.md"]);
        let entries = doc.entries();

        let folders: Vec<&str> = entries
            .iter()
            .filter(|e| e.kind == EntryKind::Folder)
            .map(|e| e.path.as_str())
            .collect();
        assert_eq!(folders, vec!["notes", "notes/repos"]);

        let files: Vec<&str> = entries
            .iter()
            .filter(|e| e.kind == EntryKind::File)
            .map(|e| e.path.as_str())
            .collect();
        assert_eq!(files, vec!["notes/b.md", "notes/repos/a.md", "top.md"]);
    }

    #[test]
    fn entries_are_lexicographic() {
        let doc = doc_with(&["z.md", "a/x.md", "m.md"]);
        let entries = doc.entries();
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
    }

    #[test]
    fn read_write_exists() {
        let mut doc = VaultDoc::default();
        assert!(!doc.exists("a.md"));
        doc.write("a.md", "hello");
        assert!(doc.exists("a.md"));
        assert_eq!(doc.read("a.md"), Some("hello"));
        doc.write("a.md", "changed");
        assert_eq!(doc.read("a.md"), Some("changed"));
        assert!(doc.remove("a.md"));
        assert!(!doc.exists("a.md"));
    }

    #[test]
    fn seeded_vault_resolves_default_template() {
        let doc = VaultDoc::seeded();
        assert!(doc.exists(DEFAULT_TEMPLATE_PATH));
        assert!(doc
            .read(DEFAULT_TEMPLATE_PATH)
            .is_some_and(|t| t.contains("{{repo_name}}")));
    }
}
