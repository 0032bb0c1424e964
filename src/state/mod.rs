use crate::models::Settings;
use crate::storage::{load_settings, load_vault, save_settings, save_vault};
use crate::vault::VaultDoc;
use futures::channel::oneshot;
use leptos::prelude::*;
use leptos_dom::helpers::set_timeout;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

static NEXT_ID: AtomicI64 = AtomicI64::new(1);

/// Notice and confirm ids must stay unique even when one entry is answered
/// and another queued within the same millisecond, so wall time won't do.
fn next_id() -> i64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum NoticeKind {
    Success,
    Error,
}

/// One transient toast line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Notice {
    pub id: i64,
    pub kind: NoticeKind,
    pub text: String,
}

/// A pending overwrite confirmation. The answer travels back through a
/// oneshot channel so the asker can simply `.await` it; resolving twice
/// is a no-op.
#[derive(Clone)]
pub(crate) struct ConfirmRequest {
    pub id: i64,
    pub message: String,
    respond: Arc<Mutex<Option<oneshot::Sender<bool>>>>,
}

impl ConfirmRequest {
    pub fn resolve(&self, answer: bool) {
        if let Ok(mut slot) = self.respond.lock() {
            if let Some(tx) = slot.take() {
                let _ = tx.send(answer);
            }
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    /// Loaded at startup merged over defaults; saved on every change.
    pub settings: RwSignal<Settings>,

    /// The whole vault, persisted as one localStorage document.
    pub vault: RwSignal<VaultDoc>,

    /// Ephemeral toasts, newest last.
    pub notices: RwSignal<Vec<Notice>>,

    /// Overwrite prompts, front one is shown. Overlapping note creations
    /// each queue their own prompt and get their own answer.
    pub confirms: RwSignal<Vec<ConfirmRequest>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            settings: RwSignal::new(load_settings()),
            vault: RwSignal::new(load_vault()),
            notices: RwSignal::new(vec![]),
            confirms: RwSignal::new(vec![]),
        }
    }

    pub fn update_settings(&self, f: impl FnOnce(&mut Settings)) {
        self.settings.update(f);
        save_settings(&self.settings.get_untracked());
    }

    pub fn write_note(&self, path: &str, content: &str) {
        self.vault.update(|v| v.write(path, content));
        save_vault(&self.vault.get_untracked());
    }

    pub fn notify(&self, kind: NoticeKind, text: impl Into<String>) {
        let id = next_id();
        self.notices.update(|xs| {
            xs.push(Notice {
                id,
                kind,
                text: text.into(),
            })
        });

        // Auto-dismiss after a few seconds.
        let notices = self.notices;
        set_timeout(
            move || notices.update(|xs| xs.retain(|n| n.id != id)),
            std::time::Duration::from_millis(4000),
        );
    }

    /// Queue an overwrite prompt and hand back the receiver to await.
    /// A dropped prompt (teardown) reads as "declined".
    pub fn request_confirm(&self, message: impl Into<String>) -> oneshot::Receiver<bool> {
        let (tx, rx) = oneshot::channel();
        let req = ConfirmRequest {
            id: next_id(),
            message: message.into(),
            respond: Arc::new(Mutex::new(Some(tx))),
        };
        self.confirms.update(|xs| xs.push(req));
        rx
    }

    /// Resolve the given prompt and drop it from the queue.
    pub fn answer_confirm(&self, id: i64, answer: bool) {
        let req = self
            .confirms
            .get_untracked()
            .into_iter()
            .find(|c| c.id == id);
        if let Some(req) = req {
            req.resolve(answer);
        }
        self.confirms.update(|xs| xs.retain(|c| c.id != id));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn ids_are_unique_even_within_one_tick() {
        // Burst allocation mimics answer-then-requeue in the same millisecond.
        let ids: Vec<i64> = (0..100).map(|_| next_id()).collect();
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids, deduped);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn confirm_resolves_once_with_its_first_answer() {
        let (tx, rx) = oneshot::channel();
        let req = ConfirmRequest {
            id: next_id(),
            message: "overwrite?".to_string(),
            respond: Arc::new(Mutex::new(Some(tx))),
        };

        req.resolve(true);
        req.resolve(false);
        assert_eq!(block_on(rx), Ok(true));
    }
}
