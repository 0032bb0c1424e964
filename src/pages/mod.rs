use crate::api::GitHubClient;
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonVariant, Card, CardContent, CardDescription, CardHeader,
    CardItem, CardList, CardTitle, Input, Label, Spinner,
};
use crate::creator::create_repo_note;
use crate::models::EntryKind;
use crate::state::{AppContext, NoticeKind};
use crate::suggest::{FileSuggestions, FolderSuggestions, SuggestionSource, TextSuggestInput};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

fn note_href(path: &str) -> String {
    format!("/note?path={}", urlencoding::encode(path))
}

/// The repo-URL prompt plus the list of notes already in the vault.
#[component]
pub(crate) fn HomePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let submit_state = app_state.0.clone();

    let repo_input: RwSignal<String> = RwSignal::new(String::new());
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let input = repo_input.get_untracked();
        let settings = submit_state.settings.get_untracked();
        let vault = submit_state.vault.get_untracked();
        let client = GitHubClient::new(Some(settings.auth_token.clone()));
        let state = submit_state.clone();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            let confirm_state = state.clone();
            let confirm = move || async move {
                let rx = confirm_state
                    .request_confirm("A note already exists at the destination. Overwrite it?");
                // A torn-down prompt reads as "declined".
                rx.await.unwrap_or(false)
            };

            match create_repo_note(&input, &settings, &vault, &client, confirm).await {
                Ok(note) => {
                    state.write_note(&note.path, &note.content);
                    state.notify(NoticeKind::Success, format!("Created {}", note.path));
                    repo_input.set(String::new());

                    if settings.open_after_create {
                        let _ = window().location().set_href(&note_href(&note.path));
                    }
                }
                Err(e) => {
                    let msg = e.to_string();
                    state.notify(NoticeKind::Error, msg.clone());
                    error.set(Some(msg));
                }
            }
            loading.set(false);
        });
    };

    let notes = move || {
        app_state
            .0
            .vault
            .get()
            .entries()
            .into_iter()
            .filter(|e| e.kind == EntryKind::File)
            .collect::<Vec<_>>()
    };

    view! {
        <div class="mx-auto w-full max-w-[720px] px-4 py-8">
            <div class="mb-4 flex items-center justify-between">
                <div class="space-y-1">
                    <h1 class="text-xl font-semibold">"Repo Notes"</h1>
                    <p class="text-xs text-muted-foreground">"Notes from GitHub repositories"</p>
                </div>

                <Button
                    class="bg-transparent border border-input text-muted-foreground hover:bg-accent hover:text-accent-foreground"
                    on:click=move |_| { let _ = window().location().set_href("/settings"); }
                >
                    "Settings"
                </Button>
            </div>

            <Card class="mb-4">
                <CardHeader>
                    <CardTitle>"New repository note"</CardTitle>
                    <CardDescription>
                        "Paste a GitHub URL or type owner/name."
                    </CardDescription>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-4" on:submit=on_submit>
                        <Input
                            id="repo_input"
                            placeholder="https://github.com/owner/name"
                            bind_value=repo_input
                            required=true
                        />

                        <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                            {move || {
                                error.get().map(|e| view! {
                                    <Alert class="border-destructive/30">
                                        <AlertDescription class="text-destructive">{e}</AlertDescription>
                                    </Alert>
                                })
                            }}
                        </Show>

                        <Button attr:disabled=move || loading.get()>
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if loading.get() { "Creating..." } else { "Create note" }}
                            </span>
                        </Button>
                    </form>
                </CardContent>
            </Card>

            <Card>
                <CardHeader>
                    <CardTitle>"Vault"</CardTitle>
                    <CardDescription>
                        {move || format!("{} files", notes().len())}
                    </CardDescription>
                </CardHeader>

                <CardContent>
                    <Show
                        when=move || !notes().is_empty()
                        fallback=|| view! {
                            <div class="text-xs text-muted-foreground">"No files yet."</div>
                        }
                    >
                        <CardList>
                            {move || {
                                notes()
                                    .into_iter()
                                    .map(|entry| {
                                        let href = note_href(&entry.path);
                                        view! {
                                            <CardItem class="rounded-md border px-4 py-3">
                                                <a class="text-sm font-medium hover:underline" href=href>
                                                    {entry.path}
                                                </a>
                                            </CardItem>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </CardList>
                    </Show>
                </CardContent>
            </Card>
        </div>
    }
}

#[component]
pub(crate) fn SettingsPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let initial = app_state.0.settings.get_untracked();

    let auth_token: RwSignal<String> = RwSignal::new(initial.auth_token);
    let destination_folder: RwSignal<String> = RwSignal::new(initial.destination_folder);
    let file_name_pattern: RwSignal<String> = RwSignal::new(initial.file_name_pattern);
    let template_path: RwSignal<String> = RwSignal::new(initial.template_path);
    let open_after_create: RwSignal<bool> = RwSignal::new(initial.open_after_create);

    // Persist on every edit. The first run writes back the loaded values,
    // which is harmless.
    {
        let state = app_state.0.clone();
        Effect::new(move |_| {
            let token = auth_token.get();
            let folder = destination_folder.get();
            let pattern = file_name_pattern.get();
            let template = template_path.get();
            let open = open_after_create.get();
            state.update_settings(|s| {
                s.auth_token = token;
                s.destination_folder = folder;
                s.file_name_pattern = pattern;
                s.template_path = template;
                s.open_after_create = open;
            });
        });
    }

    let folder_suggestions = {
        let vault = app_state.0.vault;
        Callback::new(move |query: String| {
            FolderSuggestions::new(vault.get_untracked().entries()).suggestions(&query)
        })
    };

    let template_suggestions = {
        let vault = app_state.0.vault;
        Callback::new(move |query: String| {
            FileSuggestions::new(vault.get_untracked().entries()).suggestions(&query)
        })
    };

    let on_toggle_open = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
                open_after_create.set(input.checked());
            }
        }
    };

    view! {
        <div class="mx-auto w-full max-w-[720px] px-4 py-8">
            <div class="mb-4 flex items-center justify-between">
                <div class="space-y-1">
                    <h1 class="text-xl font-semibold">"Settings"</h1>
                    <p class="text-xs text-muted-foreground">"Repo Notes"</p>
                </div>

                <Button
                    class="bg-transparent border border-input text-muted-foreground hover:bg-accent hover:text-accent-foreground"
                    on:click=move |_| { let _ = window().location().set_href("/"); }
                >
                    "Back"
                </Button>
            </div>

            <Card>
                <CardContent>
                    <div class="flex flex-col gap-4">
                        <div class="flex flex-col gap-2">
                            <Label html_for="auth_token">"GitHub token"</Label>
                            <Input
                                id="auth_token"
                                r#type="password"
                                placeholder="optional, raises the rate limit"
                                bind_value=auth_token
                            />
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label html_for="destination_folder">"Destination folder"</Label>
                            <TextSuggestInput
                                id="destination_folder"
                                placeholder="e.g. Notes/Repos"
                                bind_value=destination_folder
                                suggestions=folder_suggestions
                            />
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label html_for="file_name_pattern">"File name pattern"</Label>
                            <Input
                                id="file_name_pattern"
                                placeholder="{{repo_name}}.md"
                                bind_value=file_name_pattern
                            />
                        </div>

                        <div class="flex flex-col gap-2">
                            <Label html_for="template_path">"Template file"</Label>
                            <TextSuggestInput
                                id="template_path"
                                placeholder="repo-template.md"
                                bind_value=template_path
                                suggestions=template_suggestions
                            />
                        </div>

                        <label class="flex items-center gap-2 text-sm">
                            <input
                                type="checkbox"
                                prop:checked=move || open_after_create.get()
                                on:change=on_toggle_open
                            />
                            "Open the note after creating it"
                        </label>
                    </div>
                </CardContent>
            </Card>
        </div>
    }
}

/// Reads `?path=...` from the current URL; the router itself stays
/// path-only.
fn note_path_from_query() -> Option<String> {
    let search = window().location().search().ok()?;
    let raw = search
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| pair.strip_prefix("path="))?;
    Some(urlencoding::decode(raw).ok()?.into_owned())
}

#[component]
pub(crate) fn NotePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let path = note_path_from_query().unwrap_or_default();
    let content = {
        let path = path.clone();
        move || {
            app_state
                .0
                .vault
                .get()
                .read(&path)
                .map(str::to_string)
        }
    };

    view! {
        <div class="mx-auto w-full max-w-[720px] px-4 py-8">
            <div class="mb-4 flex items-center justify-between">
                <h1 class="truncate text-xl font-semibold">{path.clone()}</h1>
                <Button
                    class="bg-transparent border border-input text-muted-foreground hover:bg-accent hover:text-accent-foreground"
                    on:click=move |_| { let _ = window().location().set_href("/"); }
                >
                    "Back"
                </Button>
            </div>

            <Card>
                <CardContent>
                    {move || match content() {
                        Some(text) => view! {
                            <pre class="overflow-auto whitespace-pre-wrap text-sm">{text}</pre>
                        }
                        .into_any(),
                        None => view! {
                            <div class="text-xs text-muted-foreground">"No such file in the vault."</div>
                        }
                        .into_any(),
                    }}
                </CardContent>
            </Card>
        </div>
    }
}

/// Transient toasts, bottom-right, newest last.
#[component]
pub(crate) fn NoticeStack() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let notices = app_state.0.notices;

    view! {
        <div class="fixed bottom-4 right-4 z-50 flex w-80 flex-col gap-2">
            {move || {
                notices
                    .get()
                    .into_iter()
                    .map(|n| {
                        let class = match n.kind {
                            NoticeKind::Success => "bg-background",
                            NoticeKind::Error => "border-destructive/30 bg-background",
                        };
                        view! {
                            <Alert class=class attr:data-kind=n.kind.to_string()>
                                <AlertDescription>{n.text}</AlertDescription>
                            </Alert>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

/// Modal overwrite prompt; shows the front of the queue so overlapping
/// creations get answered one at a time.
#[component]
pub(crate) fn ConfirmDialog() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let confirms = app_state.0.confirms;

    view! {
        {move || {
            confirms.get().first().cloned().map(|req| {
                let state = app_state.0.clone();
                let decline_state = app_state.0.clone();
                let id = req.id;
                view! {
                    <div class="fixed inset-0 z-[1000001] flex items-center justify-center bg-black/50">
                        <Card class="w-full max-w-sm bg-background">
                            <CardHeader>
                                <CardTitle class="text-base">"Overwrite note?"</CardTitle>
                                <CardDescription>{req.message.clone()}</CardDescription>
                            </CardHeader>
                            <CardContent class="flex justify-end gap-2">
                                <Button
                                    variant=ButtonVariant::Outline
                                    on:click=move |_| decline_state.answer_confirm(id, false)
                                >
                                    "Cancel"
                                </Button>
                                <Button on:click=move |_| state.answer_confirm(id, true)>
                                    "Overwrite"
                                </Button>
                            </CardContent>
                        </Card>
                    </div>
                }
            })
        }}
    }
}
