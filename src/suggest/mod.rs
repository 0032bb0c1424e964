use crate::components::hooks::use_random::use_random_id_for;
use crate::models::{EntryKind, VaultEntry};
use leptos::html;
use leptos::prelude::*;

/// A provider of typeahead candidates for one text input.
///
/// Implementations are pure over a snapshot of the vault tree; an empty or
/// unmatched query yields an empty list, never an error.
pub(crate) trait SuggestionSource {
    fn suggestions(&self, query: &str) -> Vec<String>;
}

/// Broad file listings get truncated so the popup stays usable.
pub(crate) const MAX_FILE_SUGGESTIONS: usize = 1000;

/// Folder paths matching the query, case-insensitive substring, uncapped.
pub(crate) struct FolderSuggestions {
    entries: Vec<VaultEntry>,
}

impl FolderSuggestions {
    pub fn new(entries: Vec<VaultEntry>) -> Self {
        Self { entries }
    }
}

impl SuggestionSource for FolderSuggestions {
    fn suggestions(&self, query: &str) -> Vec<String> {
        let q = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::Folder && e.path.to_lowercase().contains(&q))
            .map(|e| e.path.clone())
            .collect()
    }
}

/// Markdown file paths matching the query, capped at [`MAX_FILE_SUGGESTIONS`].
pub(crate) struct FileSuggestions {
    entries: Vec<VaultEntry>,
}

impl FileSuggestions {
    pub fn new(entries: Vec<VaultEntry>) -> Self {
        Self { entries }
    }
}

impl SuggestionSource for FileSuggestions {
    fn suggestions(&self, query: &str) -> Vec<String> {
        let q = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.kind == EntryKind::File
                    && e.path.ends_with(".md")
                    && e.path.to_lowercase().contains(&q)
            })
            .map(|e| e.path.clone())
            .take(MAX_FILE_SUGGESTIONS)
            .collect()
    }
}

/// The widget's core: a list of candidates plus a selection cursor.
///
/// `selected == -1` means no selection; the invariant throughout is
/// `-1 <= selected < items.len()`. The popup is open exactly when `items`
/// is non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SuggestState {
    items: Vec<String>,
    selected: isize,
}

impl SuggestState {
    pub fn closed() -> Self {
        Self {
            items: vec![],
            selected: -1,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> isize {
        self.selected
    }

    /// Replace the candidate list. Always resets the cursor; an empty list
    /// closes the popup.
    pub fn recompute(&mut self, items: Vec<String>) {
        self.items = items;
        self.selected = -1;
    }

    /// ArrowUp/ArrowDown: step the cursor with wraparound in both directions.
    pub fn move_selection(&mut self, step: isize) {
        let len = self.items.len() as isize;
        if len == 0 {
            return;
        }
        let mut next = self.selected + step;
        if next < 0 {
            next = len - 1;
        } else if next >= len {
            next = 0;
        }
        self.selected = next;
    }

    /// Pointer hover: select without committing. Out-of-range is ignored.
    pub fn set_selected(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = index as isize;
        }
    }

    /// Enter: yields the selected candidate and closes, or does nothing
    /// (and stays open) when no candidate is selected.
    pub fn commit(&mut self) -> Option<String> {
        if self.selected < 0 || self.selected as usize >= self.items.len() {
            return None;
        }
        let chosen = self.items[self.selected as usize].clone();
        self.close();
        Some(chosen)
    }

    pub fn close(&mut self) {
        self.items.clear();
        self.selected = -1;
    }
}

/// A single-line text input with a typeahead popup.
///
/// One popup per widget instance, anchored directly under the input at the
/// input's width via CSS anchor positioning; the browser tracks the anchor
/// through moves and resizes. Commit (Enter or pointer-down on a row) writes
/// the chosen path into the bound signal and notifies `on_commit`.
#[component]
pub(crate) fn TextSuggestInput(
    #[prop(into, optional)] id: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] class: String,
    #[prop(into)] bind_value: RwSignal<String>,
    /// Candidate provider; recomputed in full on every input or focus event.
    suggestions: Callback<String, Vec<String>>,
    #[prop(optional)] on_commit: Option<Callback<String>>,
) -> impl IntoView {
    let state: RwSignal<SuggestState> = RwSignal::new(SuggestState::closed());

    // Recompute generation: a recompute result only lands if no newer
    // recompute started in the meantime, so stale lists never clobber
    // newer state.
    let generation: StoredValue<u64> = StoredValue::new(0);

    let uid = use_random_id_for("suggest");
    let anchor_name = StoredValue::new(format!("--suggest_anchor{uid}"));
    let popover_id = StoredValue::new(format!("suggest_popover{uid}"));

    let input_ref: NodeRef<html::Input> = NodeRef::new();

    let recompute = move |query: String| {
        let gen = generation.get_value() + 1;
        generation.set_value(gen);

        let items = suggestions.run(query);

        if generation.get_value() == gen {
            state.update(|s| s.recompute(items));
        }
    };

    let commit_value = move |chosen: String| {
        bind_value.set(chosen.clone());
        if let Some(cb) = on_commit {
            cb.run(chosen);
        }
    };

    // Keep the selected row visible while navigating with the arrow keys.
    Effect::new(move |_| {
        let s = state.get();
        if !s.is_open() || s.selected() < 0 {
            return;
        }
        let row_id = format!("{}_item_{}", popover_id.get_value(), s.selected());
        if let Some(row) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&row_id))
        {
            row.scroll_into_view_with_bool(false);
        }
    });

    // `data-open` -> Popover API bridge; the observer keeps the native
    // popover in sync with the reactive attribute.
    let sync_script = format!(
        r#"(() => {{
  const pop = document.getElementById('{id}');
  if (!pop || pop.dataset.init) return;
  pop.dataset.init = '1';

  const sync = () => {{
    const open = pop.getAttribute('data-open') === 'true';
    try {{
      if (open) pop.showPopover();
      else pop.hidePopover();
    }} catch (_) {{}}
  }};

  const mo = new MutationObserver(sync);
  mo.observe(pop, {{ attributes: true, attributeFilter: ['data-open'] }});
  sync();
}})();"#,
        id = popover_id.get_value()
    );

    let input_class = tw_merge::tw_merge!(
        "border-input flex h-9 w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-sm shadow-xs outline-none placeholder:text-muted-foreground focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50",
        class
    );

    let anchor_css = format!(
        r#"
#{popover_id} {{
  position-anchor: {anchor_name};
  inset: auto;
  top: anchor(bottom);
  left: anchor(left);
  width: anchor-size(width);
  margin-top: 4px;
  @position-try(flip-block) {{
    bottom: anchor(top);
    top: auto;
    margin-bottom: 4px;
    margin-top: 0;
  }}
  position-try-fallbacks: flip-block;
  position-try-order: most-height;
  position-visibility: anchors-visible;
  z-index: 1000000;
}}
"#,
        popover_id = popover_id.get_value(),
        anchor_name = anchor_name.get_value()
    );

    view! {
        <style>{anchor_css}</style>

        <input
            id=id
            type="text"
            autocomplete="off"
            spellcheck="false"
            role="combobox"
            aria-autocomplete="list"
            aria-expanded=move || state.get().is_open().to_string()
            placeholder=placeholder
            class=input_class
            style=format!("anchor-name: {}", anchor_name.get_value())
            node_ref=input_ref
            prop:value=move || bind_value.get()
            on:input=move |ev| {
                let v = event_target_value(&ev);
                bind_value.set(v.clone());
                recompute(v);
            }
            on:focus=move |_| {
                recompute(bind_value.get_untracked());
            }
            on:blur=move |_| {
                state.update(|s| s.close());
            }
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                if !state.get_untracked().is_open() {
                    return;
                }

                match ev.key().as_str() {
                    "ArrowDown" => {
                        ev.prevent_default();
                        state.update(|s| s.move_selection(1));
                    }
                    "ArrowUp" => {
                        ev.prevent_default();
                        state.update(|s| s.move_selection(-1));
                    }
                    "Escape" => {
                        ev.prevent_default();
                        state.update(|s| s.close());
                    }
                    "Enter" => {
                        // With no selection this is a no-op (popup stays open),
                        // but still swallow the key so a surrounding form does
                        // not submit.
                        ev.prevent_default();
                        let mut chosen = None;
                        state.update(|s| chosen = s.commit());
                        if let Some(path) = chosen {
                            commit_value(path);
                        }
                    }
                    _ => {}
                }
            }
        />

        <div
            id=popover_id.get_value()
            popover="manual"
            data-open=move || state.get().is_open().to_string()
            class="max-h-64 overflow-auto rounded-md border border-input bg-background p-1 text-sm text-foreground shadow-lg"
        >
            {move || {
                let s = state.get();
                let selected = s.selected();
                s.items()
                    .iter()
                    .cloned()
                    .enumerate()
                    .map(|(i, path)| {
                        let path_for_commit = path.clone();
                        let row_id = format!("{}_item_{}", popover_id.get_value(), i);
                        let is_selected = selected == i as isize;

                        view! {
                            <div
                                id=row_id
                                role="option"
                                aria-selected=is_selected.to_string()
                                class=if is_selected {
                                    "cursor-pointer truncate rounded px-2 py-1 bg-accent text-accent-foreground"
                                } else {
                                    "cursor-pointer truncate rounded px-2 py-1 hover:bg-accent/50"
                                }
                                on:mousemove=move |_| {
                                    state.update(|s| s.set_selected(i));
                                }
                                on:mousedown=move |ev: web_sys::MouseEvent| {
                                    // Keep focus in the input; a blur here would
                                    // close the popup before the commit runs.
                                    ev.prevent_default();
                                    state.update(|s| {
                                        s.set_selected(i);
                                        let _ = s.commit();
                                    });
                                    if let Some(el) = input_ref.get() {
                                        el.set_value(&path_for_commit);
                                    }
                                    commit_value(path_for_commit.clone());
                                }
                            >
                                {path}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>

        <script>{sync_script}</script>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(paths: &[(&str, EntryKind)]) -> Vec<VaultEntry> {
        paths
            .iter()
            .map(|(p, k)| VaultEntry {
                path: p.to_string(),
                kind: *k,
            })
            .collect()
    }

    fn sample_tree() -> Vec<VaultEntry> {
        entries(&[
            ("Notes", EntryKind::Folder),
            ("Notes/Repos", EntryKind::Folder),
            ("Notes/Repos/leptos.md", EntryKind::File),
            ("Notes/daily.md", EntryKind::File),
            ("Templates", EntryKind::Folder),
            ("Templates/repo-template.md", EntryKind::File),
            ("scratch.txt", EntryKind::File),
        ])
    }

    #[test]
    fn folder_source_matches_case_insensitively() {
        let src = FolderSuggestions::new(sample_tree());
        assert_eq!(src.suggestions("repos"), vec!["Notes/Repos"]);
        assert_eq!(src.suggestions("REPOS"), vec!["Notes/Repos"]);
    }

    #[test]
    fn folder_source_empty_query_returns_all_folders() {
        let src = FolderSuggestions::new(sample_tree());
        assert_eq!(
            src.suggestions(""),
            vec!["Notes", "Notes/Repos", "Templates"]
        );
    }

    #[test]
    fn file_source_returns_only_markdown_files() {
        let src = FileSuggestions::new(sample_tree());
        assert_eq!(
            src.suggestions(""),
            vec![
                "Notes/Repos/leptos.md",
                "Notes/daily.md",
                "Templates/repo-template.md"
            ]
        );
        // scratch.txt never shows up.
        assert!(src.suggestions("scratch").is_empty());
    }

    #[test]
    fn file_source_caps_results() {
        let many: Vec<VaultEntry> = (0..1500)
            .map(|i| VaultEntry {
                path: format!("bulk/{i:04}.md"),
                kind: EntryKind::File,
            })
            .collect();
        let src = FileSuggestions::new(many);
        assert_eq!(src.suggestions("").len(), MAX_FILE_SUGGESTIONS);
    }

    #[test]
    fn filtering_is_idempotent_on_unchanged_tree() {
        let src = FileSuggestions::new(sample_tree());
        assert_eq!(src.suggestions("notes"), src.suggestions("notes"));
    }

    #[test]
    fn unmatched_query_yields_empty_not_error() {
        let src = FolderSuggestions::new(sample_tree());
        assert!(src.suggestions("zzz").is_empty());
    }

    #[test]
    fn state_opens_only_with_candidates() {
        let mut s = SuggestState::closed();
        assert!(!s.is_open());

        s.recompute(vec![]);
        assert!(!s.is_open());

        s.recompute(vec!["a".into()]);
        assert!(s.is_open());
        assert_eq!(s.selected(), -1);
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        let mut s = SuggestState::closed();
        s.recompute(vec!["a".into(), "b".into(), "c".into()]);

        // Up from "no selection" wraps to the last item.
        s.move_selection(-1);
        assert_eq!(s.selected(), 2);

        // Down past the end wraps to the first.
        s.move_selection(1);
        assert_eq!(s.selected(), 0);

        // Any walk keeps the cursor in [-1, len-1].
        for step in [1, 1, -1, 1, 1, 1, -1, -1, -1, -1] {
            s.move_selection(step);
            assert!(s.selected() >= -1 && s.selected() < 3);
        }
    }

    #[test]
    fn recompute_resets_selection() {
        let mut s = SuggestState::closed();
        s.recompute(vec!["a".into(), "b".into()]);
        s.move_selection(1);
        assert_eq!(s.selected(), 0);

        s.recompute(vec!["a".into()]);
        assert_eq!(s.selected(), -1);
    }

    #[test]
    fn commit_without_selection_is_a_no_op_and_stays_open() {
        let mut s = SuggestState::closed();
        s.recompute(vec!["a".into()]);
        assert_eq!(s.commit(), None);
        assert!(s.is_open());
    }

    #[test]
    fn arrow_down_then_enter_commits_first_item() {
        let mut s = SuggestState::closed();
        s.recompute(vec!["a/b.md".into(), "a/c.md".into()]);

        s.move_selection(1);
        assert_eq!(s.commit(), Some("a/b.md".to_string()));
        assert!(!s.is_open());
    }

    #[test]
    fn hover_selects_without_committing() {
        let mut s = SuggestState::closed();
        s.recompute(vec!["a".into(), "b".into()]);
        s.set_selected(1);
        assert_eq!(s.selected(), 1);
        assert!(s.is_open());

        // Out-of-range hover is ignored.
        s.set_selected(9);
        assert_eq!(s.selected(), 1);
    }

    #[test]
    fn escape_closes_and_clears() {
        let mut s = SuggestState::closed();
        s.recompute(vec!["a".into()]);
        s.move_selection(1);
        s.close();
        assert!(!s.is_open());
        assert_eq!(s.selected(), -1);
    }
}
