use crate::core::query::{decode, encode};
use crate::core::FilterSpec;

/// Keeps the current [`FilterSpec`] and the address history in step.
///
/// Edits go through [`apply`](Self::apply): replace the spec, encode it, push
/// the new address. External navigation goes through
/// [`navigate`](Self::navigate): push the address, decode it into a fresh
/// spec. Back/forward move along the history and decode the entry they land on.
#[derive(Debug, Clone)]
pub struct FilterSession {
    filters: FilterSpec,
    history: Vec<String>,
    position: usize,
}

impl FilterSession {
    /// Opens the page at `query` (with or without the leading `?`).
    pub fn open(query: &str) -> Self {
        let address = format!("?{}", query.strip_prefix('?').unwrap_or(query));
        Self {
            filters: decode(&address),
            history: vec![address],
            position: 0,
        }
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn address(&self) -> &str {
        &self.history[self.position]
    }

    /// Replaces the spec wholesale and pushes its encoding. Forward entries
    /// past the current position are discarded.
    pub fn apply(&mut self, update: FilterSpec) -> &str {
        let address = format!("?{}", encode(&update));
        tracing::debug!("Filters changed, address now {}", address);

        self.filters = update;
        self.push(address)
    }

    /// Takes the spec from an address the user navigated to and makes that
    /// address current. Forward entries are discarded, as with `apply`.
    pub fn navigate(&mut self, query: &str) -> &str {
        let address = format!("?{}", query.strip_prefix('?').unwrap_or(query));
        tracing::debug!("Navigated to {}", address);

        self.filters = decode(&address);
        self.push(address)
    }

    pub fn back(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        self.sync_from_history();
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.position + 1 >= self.history.len() {
            return false;
        }
        self.position += 1;
        self.sync_from_history();
        true
    }

    fn push(&mut self, address: String) -> &str {
        self.history.truncate(self.position + 1);
        self.history.push(address);
        self.position = self.history.len() - 1;
        self.address()
    }

    fn sync_from_history(&mut self) {
        self.filters = decode(&self.history[self.position]);
    }
}

impl Default for FilterSession {
    fn default() -> Self {
        Self::open("")
    }
}
