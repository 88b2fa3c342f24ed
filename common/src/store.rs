use chrono::Utc;

use crate::party::{demo_parties, Party, PartyDraft, PartyId};
use crate::storage::{PersistenceBackend, StorageError, PARTY_STORE_KEY};

/// Errors from store operations.
#[derive(Debug)]
pub enum StoreError {
    /// A required text field was empty after trimming.
    Validation { field: &'static str },
    /// A mutation targeted an id with no matching party.
    NotFound(PartyId),
    /// Persistence failed. In-memory state is already updated and remains
    /// the source of truth for the rest of the session.
    Storage(StorageError),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { field } => write!(f, "required field '{field}' is empty"),
            Self::NotFound(id) => write!(f, "no party with id {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

/// Ideology filter for queries: everything, or one exact label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdeologyFilter {
    All,
    Ideology(String),
}

impl IdeologyFilter {
    /// Map a filter-control value: `"all"` selects everything, anything
    /// else is an exact ideology label.
    pub fn from_selection(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Ideology(value.to_string())
        }
    }

    fn matches(&self, party: &Party) -> bool {
        match self {
            Self::All => true,
            // Case-sensitive exact match
            Self::Ideology(label) => party.ideology == *label,
        }
    }
}

/// Display sort order for queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Most recently created first.
    Recent,
    /// Most supporters first.
    Popular,
    /// Ascending by name, case-insensitive.
    Alphabetical,
}

impl SortKey {
    /// Map a sort-control value. Unknown values fall back to `Recent`.
    pub fn from_selection(value: &str) -> Self {
        match value {
            "popular" => Self::Popular,
            "alphabetical" => Self::Alphabetical,
            _ => Self::Recent,
        }
    }
}

/// Owns the canonical party list and its persistence.
///
/// Canonical order is insertion order, newest first. Queries return
/// filtered/sorted copies and never disturb the canonical sequence;
/// all mutations go through [`create`](Self::create),
/// [`support`](Self::support) and [`reset_to_demo`](Self::reset_to_demo).
#[derive(Debug)]
pub struct PartyStore<B: PersistenceBackend> {
    parties: Vec<Party>,
    backend: B,
}

impl<B: PersistenceBackend> PartyStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            parties: Vec::new(),
            backend,
        }
    }

    /// Load persisted parties, seeding the demonstration set when nothing
    /// is stored yet. With `force_reseed`, any persisted state is
    /// discarded and the demonstration set written in its place.
    pub fn initialize(&mut self, force_reseed: bool) -> Result<(), StoreError> {
        if force_reseed {
            return self.reset_to_demo();
        }
        match self.backend.load(PARTY_STORE_KEY)? {
            Some(json) => {
                self.parties = serde_json::from_str(&json)
                    .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
                Ok(())
            }
            None => self.reset_to_demo(),
        }
    }

    /// Create a party from a draft and insert it at the front of the
    /// canonical sequence.
    ///
    /// Fails with `Validation` before any state change if a required text
    /// field is empty after trimming. A persistence failure after the
    /// insert is surfaced as `Storage`; the record stays in memory.
    pub fn create(&mut self, draft: PartyDraft) -> Result<Party, StoreError> {
        let name = required(&draft.name, "name")?;
        let slogan = required(&draft.slogan, "slogan")?;
        let description = required(&draft.description, "description")?;
        let ideology = required(&draft.ideology, "ideology")?;
        let founder = required(&draft.founder, "founder")?;

        let party = Party {
            id: self.next_id(),
            name,
            slogan,
            description,
            color: draft.color,
            ideology,
            founder,
            logo: draft.logo,
            supports: 0,
            created_at: Utc::now(),
        };
        self.parties.insert(0, party.clone());
        self.persist()?;
        Ok(party)
    }

    /// Increment the supporter count for `id`, returning the new count.
    pub fn support(&mut self, id: PartyId) -> Result<u32, StoreError> {
        let party = self
            .parties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        party.supports += 1;
        let supports = party.supports;
        self.persist()?;
        Ok(supports)
    }

    /// Filtered, sorted copy of the party list for display. The canonical
    /// sequence is left untouched and nothing is persisted.
    pub fn query(&self, filter: &IdeologyFilter, sort: SortKey) -> Vec<Party> {
        let mut view: Vec<Party> = self
            .parties
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        // sort_by is stable, so ties keep canonical (newest-first) order
        match sort {
            SortKey::Recent => view.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortKey::Popular => view.sort_by(|a, b| b.supports.cmp(&a.supports)),
            SortKey::Alphabetical => {
                view.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
        }
        view
    }

    /// Distinct ideology labels, sorted, for the filter control.
    pub fn ideologies(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.parties.iter().map(|p| p.ideology.clone()).collect();
        labels.sort();
        labels.dedup();
        labels
    }

    /// Replace everything with the fixed demonstration set and persist it.
    pub fn reset_to_demo(&mut self) -> Result<(), StoreError> {
        self.parties = demo_parties();
        self.persist()
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    /// Read-only view of the canonical sequence.
    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    /// Next id: one past the highest ever assigned. Parties are never
    /// deleted individually, so this never reuses an id.
    fn next_id(&self) -> PartyId {
        let max = self.parties.iter().map(|p| p.id.0).max().unwrap_or(0);
        PartyId(max + 1)
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.parties)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        self.backend.store(PARTY_STORE_KEY, &json)?;
        Ok(())
    }
}

fn required(value: &str, field: &'static str) -> Result<String, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(StoreError::Validation { field })
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use std::cell::Cell;

    fn seeded_store() -> PartyStore<MemoryBackend> {
        let mut store = PartyStore::new(MemoryBackend::new());
        store.initialize(false).unwrap();
        store
    }

    fn draft(name: &str, ideology: &str) -> PartyDraft {
        PartyDraft {
            name: name.into(),
            slogan: "S".into(),
            description: "D".into(),
            color: "#000000".into(),
            ideology: ideology.into(),
            founder: "F".into(),
            logo: None,
        }
    }

    #[test]
    fn initialize_seeds_demo_when_empty() {
        let store = seeded_store();
        assert_eq!(store.len(), 3);
        assert_eq!(store.parties()[0].name, "Progressive Democratic Alliance");
    }

    #[test]
    fn initialize_loads_persisted_state() {
        let backend = MemoryBackend::new();
        let mut store = PartyStore::new(backend);
        store.initialize(false).unwrap();
        store.create(draft("Test Party", "Other")).unwrap();
        let saved = store.parties().to_vec();

        // A second session over the same backend sees the same sequence
        let mut reloaded = PartyStore::new(store.backend);
        reloaded.initialize(false).unwrap();
        assert_eq!(reloaded.parties(), saved.as_slice());
    }

    #[test]
    fn initialize_force_reseed_discards_persisted_state() {
        let mut store = seeded_store();
        store.create(draft("Test Party", "Other")).unwrap();
        assert_eq!(store.len(), 4);

        store.initialize(true).unwrap();
        assert_eq!(store.len(), 3);
        assert!(store.parties().iter().all(|p| p.name != "Test Party"));
    }

    #[test]
    fn initialize_surfaces_corrupt_payload() {
        let backend = MemoryBackend::new();
        backend.store(PARTY_STORE_KEY, "not json").unwrap();
        let mut store = PartyStore::new(backend);
        assert!(matches!(
            store.initialize(false),
            Err(StoreError::Storage(StorageError::ReadFailed(_)))
        ));
    }

    #[test]
    fn create_assigns_fresh_id_and_zero_supports() {
        let mut store = seeded_store();
        let party = store.create(draft("Test Party", "Other")).unwrap();
        assert_eq!(party.id, PartyId(4));
        assert_eq!(party.supports, 0);
        assert_eq!(store.len(), 4);

        let second = store.create(draft("Another", "Other")).unwrap();
        assert_eq!(second.id, PartyId(5));
    }

    #[test]
    fn create_trims_text_fields() {
        let mut store = seeded_store();
        let mut d = draft("  Test Party  ", " Other ");
        d.founder = "  F  ".into();
        let party = store.create(d).unwrap();
        assert_eq!(party.name, "Test Party");
        assert_eq!(party.ideology, "Other");
        assert_eq!(party.founder, "F");
    }

    #[test]
    fn create_rejects_empty_required_fields() {
        let mut store = seeded_store();
        for field in ["name", "slogan", "description", "ideology", "founder"] {
            let mut d = draft("Test Party", "Other");
            match field {
                "name" => d.name = "   ".into(),
                "slogan" => d.slogan = String::new(),
                "description" => d.description = " ".into(),
                "ideology" => d.ideology = String::new(),
                "founder" => d.founder = "\t".into(),
                _ => unreachable!(),
            }
            match store.create(d) {
                Err(StoreError::Validation { field: f }) => assert_eq!(f, field),
                other => panic!("expected validation error for {field}, got {other:?}"),
            }
            // no mutation, no persistence of a partial record
            assert_eq!(store.len(), 3);
        }
    }

    #[test]
    fn create_inserts_at_front() {
        let mut store = seeded_store();
        store.create(draft("Test Party", "Other")).unwrap();
        assert_eq!(store.parties()[0].name, "Test Party");

        let view = store.query(&IdeologyFilter::All, SortKey::Recent);
        assert_eq!(view[0].name, "Test Party");
    }

    #[test]
    fn support_increments_and_persists() {
        let mut store = seeded_store();
        assert_eq!(store.support(PartyId(2)).unwrap(), 6);
        assert_eq!(store.support(PartyId(2)).unwrap(), 7);

        let others: Vec<u32> = store
            .parties()
            .iter()
            .filter(|p| p.id != PartyId(2))
            .map(|p| p.supports)
            .collect();
        assert_eq!(others, vec![3, 2]);

        let mut reloaded = PartyStore::new(store.backend);
        reloaded.initialize(false).unwrap();
        let p2 = reloaded.parties().iter().find(|p| p.id == PartyId(2)).unwrap();
        assert_eq!(p2.supports, 7);
    }

    #[test]
    fn support_unknown_id_is_explicit_and_changes_nothing() {
        let mut store = seeded_store();
        let before = store.parties().to_vec();
        assert!(matches!(
            store.support(PartyId(99)),
            Err(StoreError::NotFound(PartyId(99)))
        ));
        assert_eq!(store.parties(), before.as_slice());
    }

    #[test]
    fn repeated_support_counts_calls() {
        let mut store = seeded_store();
        for _ in 0..10 {
            store.support(PartyId(3)).unwrap();
        }
        let p3 = store.parties().iter().find(|p| p.id == PartyId(3)).unwrap();
        assert_eq!(p3.supports, 12); // seeded at 2
    }

    #[test]
    fn query_filters_exact_case_sensitive() {
        let mut store = seeded_store();
        store.create(draft("Lowercase Greens", "green politics")).unwrap();

        let view = store.query(
            &IdeologyFilter::Ideology("Green Politics".into()),
            SortKey::Recent,
        );
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Green Future Coalition");

        let none = store.query(&IdeologyFilter::Ideology("Anarchism".into()), SortKey::Recent);
        assert!(none.is_empty());
    }

    #[test]
    fn query_all_alphabetical() {
        let store = seeded_store();
        let view = store.query(&IdeologyFilter::All, SortKey::Alphabetical);
        let names: Vec<&str> = view.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Conservative Unity Party",
                "Green Future Coalition",
                "Progressive Democratic Alliance",
            ]
        );
    }

    #[test]
    fn alphabetical_ignores_case() {
        let mut store = seeded_store();
        store.create(draft("aardvark party", "Other")).unwrap();
        let view = store.query(&IdeologyFilter::All, SortKey::Alphabetical);
        assert_eq!(view[0].name, "aardvark party");
    }

    #[test]
    fn query_popular_descending_with_stable_ties() {
        let mut store = seeded_store();
        // Two zero-support parties; newest-first canonical order must hold
        store.create(draft("First New", "Other")).unwrap();
        store.create(draft("Second New", "Other")).unwrap();

        let view = store.query(&IdeologyFilter::All, SortKey::Popular);
        let names: Vec<&str> = view.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Conservative Unity Party",          // 5
                "Progressive Democratic Alliance",   // 3
                "Green Future Coalition",            // 2
                "Second New",                        // 0, created later
                "First New",                         // 0
            ]
        );
    }

    #[test]
    fn query_does_not_disturb_canonical_order() {
        let store = seeded_store();
        let before = store.parties().to_vec();
        store.query(&IdeologyFilter::All, SortKey::Alphabetical);
        store.query(&IdeologyFilter::All, SortKey::Popular);
        assert_eq!(store.parties(), before.as_slice());
    }

    #[test]
    fn scenario_conservatism_popular() {
        let store = seeded_store();
        let view = store.query(
            &IdeologyFilter::Ideology("Conservatism".into()),
            SortKey::Popular,
        );
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Conservative Unity Party");
        assert_eq!(view[0].supports, 5);
    }

    #[test]
    fn ideologies_sorted_and_deduped() {
        let mut store = seeded_store();
        store.create(draft("Another Green", "Green Politics")).unwrap();
        assert_eq!(
            store.ideologies(),
            vec!["Conservatism", "Green Politics", "Social Democracy"]
        );
    }

    #[test]
    fn reset_to_demo_replaces_everything() {
        let mut store = seeded_store();
        store.create(draft("Test Party", "Other")).unwrap();
        store.support(PartyId(1)).unwrap();

        store.reset_to_demo().unwrap();
        assert_eq!(store.len(), 3);
        let p1 = store.parties().iter().find(|p| p.id == PartyId(1)).unwrap();
        assert_eq!(p1.supports, 3);
    }

    #[test]
    fn selection_mappings() {
        assert_eq!(IdeologyFilter::from_selection("all"), IdeologyFilter::All);
        assert_eq!(
            IdeologyFilter::from_selection("Conservatism"),
            IdeologyFilter::Ideology("Conservatism".into())
        );
        assert_eq!(SortKey::from_selection("recent"), SortKey::Recent);
        assert_eq!(SortKey::from_selection("popular"), SortKey::Popular);
        assert_eq!(SortKey::from_selection("alphabetical"), SortKey::Alphabetical);
        assert_eq!(SortKey::from_selection("garbage"), SortKey::Recent);
    }

    /// Backend that accepts a fixed number of writes, then fails.
    struct FlakyBackend {
        inner: MemoryBackend,
        writes_left: Cell<u32>,
    }

    impl PersistenceBackend for FlakyBackend {
        fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.load(key)
        }

        fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.writes_left.get() == 0 {
                return Err(StorageError::WriteFailed("quota exceeded".into()));
            }
            self.writes_left.set(self.writes_left.get() - 1);
            self.inner.store(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn persist_failure_keeps_in_memory_state() {
        let backend = FlakyBackend {
            inner: MemoryBackend::new(),
            writes_left: Cell::new(1), // one write for the demo seed
        };
        let mut store = PartyStore::new(backend);
        store.initialize(false).unwrap();

        let err = store.create(draft("Test Party", "Other")).unwrap_err();
        assert!(matches!(err, StoreError::Storage(StorageError::WriteFailed(_))));
        // The record is in memory and the store stays usable
        assert_eq!(store.len(), 4);
        assert_eq!(store.parties()[0].name, "Test Party");
        assert_eq!(
            store
                .query(&IdeologyFilter::All, SortKey::Recent)
                .first()
                .map(|p| p.name.clone()),
            Some("Test Party".into())
        );
    }
}
