mod api;
mod app;
mod components;
mod creator;
mod models;
mod pages;
mod state;
mod storage;
mod suggest;
mod template;
mod vault;

use app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::models::Settings;
    use crate::state::{AppState, NoticeKind};
    use crate::storage::{clear_storage, load_settings, load_vault, save_settings, save_vault};
    use crate::vault::{VaultDoc, DEFAULT_TEMPLATE_PATH};
    use leptos::prelude::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_settings_storage_roundtrip() {
        clear_storage();

        let defaults = load_settings();
        assert_eq!(defaults.file_name_pattern, "{{repo_name}}.md");

        let mut settings = Settings::default();
        settings.auth_token = "t1".to_string();
        settings.destination_folder = "Notes/Repos".to_string();
        save_settings(&settings);

        let loaded = load_settings();
        assert_eq!(loaded.auth_token, "t1");
        assert_eq!(loaded.destination_folder, "Notes/Repos");

        clear_storage();
    }

    #[wasm_bindgen_test]
    fn test_failed_creation_surfaces_as_error_notice() {
        clear_storage();

        let state = AppState::new();
        state.notify(NoticeKind::Error, "Failed to fetch repository data: 404");

        let notices = state.notices.get_untracked();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Error);
        assert!(notices[0].text.contains("404"));

        clear_storage();
    }

    #[wasm_bindgen_test]
    fn test_vault_storage_roundtrip_and_seed() {
        clear_storage();

        // First load seeds the starter vault with the default template.
        let vault = load_vault();
        assert!(vault.exists(DEFAULT_TEMPLATE_PATH));

        let mut vault = VaultDoc::default();
        vault.write("Notes/a.md", "hello");
        save_vault(&vault);

        let loaded = load_vault();
        assert_eq!(loaded.read("Notes/a.md"), Some("hello"));
        assert!(!loaded.exists(DEFAULT_TEMPLATE_PATH));

        clear_storage();
    }
}
