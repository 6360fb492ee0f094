use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::SeedError;
use crate::models::TaskInput;
use crate::store::TaskStore;

/// Reads a JSON array of task payloads. Titles are trimmed and must not be empty.
pub fn load_seed(path: &Path) -> Result<Vec<TaskInput>, SeedError> {
    let s = fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut inputs: Vec<TaskInput> = serde_json::from_str(&s).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    for (index, input) in inputs.iter_mut().enumerate() {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(SeedError::EmptyTitle {
                path: path.to_path_buf(),
                index,
            });
        }
        input.title = title.to_string();
    }
    Ok(inputs)
}

/// Creates every payload in file order, so the last one ends up first.
///
/// The file is only ever read; the session is never written back.
pub fn seed_store(store: &mut TaskStore, inputs: Vec<TaskInput>) -> usize {
    let count = inputs.len();
    for input in inputs {
        store.create(input);
    }
    count
}

/// Builds a store for `owner`, seeded from `seed` when given.
pub fn session_store(owner: &str, seed: Option<&Path>) -> Result<TaskStore, SeedError> {
    let mut store = TaskStore::new(owner);
    if let Some(path) = seed {
        let inputs = load_seed(path)?;
        let n = seed_store(&mut store, inputs);
        info!(path = %path.display(), tasks = n, "seeded session");
    }
    Ok(store)
}
