use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

const PREFIX: &str = "repo_notes"; // Must NOT contain "/" or "-"

#[allow(dead_code)]
pub fn use_random_id() -> String {
    format!("_{PREFIX}_{}", generate_hash())
}

pub fn use_random_id_for(element: &str) -> String {
    format!("{}_{PREFIX}_{}", element, generate_hash())
}

static COUNTER: AtomicUsize = AtomicUsize::new(1);

fn generate_hash() -> u64 {
    let mut hasher = DefaultHasher::new();
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
    counter.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_anchor_safe() {
        let a = use_random_id_for("suggest");
        let b = use_random_id_for("suggest");
        assert_ne!(a, b);
        // Used as CSS anchor-name / popover ids, so these must stay out.
        assert!(!a.contains('/') && !a.contains('-'));
    }
}
