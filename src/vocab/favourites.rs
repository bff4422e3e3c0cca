use log::warn;

use crate::error::StoreResult;
use crate::store::kv::KeyValueStore;
use crate::vocab::VocabularyEntry;

pub const FAVOURITES_KEY: &str = "@vocabAI_favourites";

/// The words a user has marked for study, in the order they were added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Favourites {
    entries: Vec<VocabularyEntry>,
}

impl Favourites {
    pub fn new(entries: Vec<VocabularyEntry>) -> Self {
        let mut favourites = Self::default();
        for entry in entries {
            favourites.add(entry);
        }
        favourites
    }

    /// Returns false if an entry with the same id is already present.
    pub fn add(&mut self, entry: VocabularyEntry) -> bool {
        if self.is_member(&entry.id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn is_member(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn list(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Persists [`Favourites`] as a JSON array under a single key.
pub struct FavouritesStore<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> FavouritesStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// A missing or corrupt payload loads as an empty collection.
    pub fn load(&self) -> Favourites {
        let raw = match self.kv.get(FAVOURITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Favourites::default(),
            Err(e) => {
                warn!("failed to read favourites: {e}");
                return Favourites::default();
            }
        };
        match serde_json::from_str::<Vec<VocabularyEntry>>(&raw) {
            Ok(entries) => Favourites::new(entries),
            Err(e) => {
                warn!("discarding unparseable favourites payload: {e}");
                Favourites::default()
            }
        }
    }

    pub fn save(&mut self, favourites: &Favourites) -> StoreResult<()> {
        let json = serde_json::to_string(favourites.list())?;
        self.kv.set(FAVOURITES_KEY, &json)
    }
}
