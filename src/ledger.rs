//! Per-client state map shared by all limiter implementations.

use std::collections::HashMap;

/// Explicit mapping from client identity to per-client limiter state.
///
/// Client identities are opaque comparable tokens; no structure is imposed
/// on them beyond equality and hashing. Entries are created lazily with a
/// caller-supplied initial state on the first *mutating* reference to an
/// unseen client, so a brand-new client always starts with the strategy's
/// full default capacity. Read-only lookups through [`peek`](Self::peek)
/// never insert, which keeps display/introspection calls free of side
/// effects.
///
/// Entries live for the lifetime of the owning limiter; there is no
/// eviction of stale clients.
///
/// # Example
///
/// ```rust
/// use admission_core::ledger::ClientLedger;
///
/// let mut ledger: ClientLedger<u64> = ClientLedger::new();
/// assert_eq!(ledger.peek("alice"), None);
///
/// *ledger.entry_or_insert_with("alice", || 0) += 1;
/// assert_eq!(ledger.peek("alice"), Some(&1));
/// assert_eq!(ledger.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientLedger<S> {
    entries: HashMap<String, S>,
}

impl<S> ClientLedger<S> {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        ClientLedger {
            entries: HashMap::new(),
        }
    }

    /// Creates a ledger pre-seeded with an entry per listed client.
    ///
    /// Used by limiters that accept an initial client set at construction;
    /// clients not listed are still tracked lazily on first reference.
    pub fn with_clients<I, F>(clients: I, mut init: F) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        F: FnMut() -> S,
    {
        ClientLedger {
            entries: clients
                .into_iter()
                .map(|client| (client.into(), init()))
                .collect(),
        }
    }

    /// Returns a mutable reference to the client's state, inserting the
    /// supplied initial state first if the client has never been seen.
    pub fn entry_or_insert_with(
        &mut self,
        client_id: &str,
        init: impl FnOnce() -> S,
    ) -> &mut S {
        self.entries
            .entry(client_id.to_owned())
            .or_insert_with(init)
    }

    /// Returns the client's state without creating an entry.
    pub fn peek(&self, client_id: &str) -> Option<&S> {
        self.entries.get(client_id)
    }

    /// Iterates mutably over every tracked client's state.
    ///
    /// Used for global bookkeeping passes: the fixed-window epoch reset and
    /// the token-bucket tick refill touch all clients at once.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut S> {
        self.entries.values_mut()
    }

    /// Iterates over tracked client identities.
    pub fn tracked_clients(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of clients with a ledger entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no client has been tracked yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
