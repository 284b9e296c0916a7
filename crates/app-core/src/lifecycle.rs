//! Word lifecycle store
//!
//! Tracks every classified word through its collections:
//!
//! ```text
//! ∅ ──► toLearn ──► processing ──► deleted
//! ∅ ──► known
//! ```
//!
//! Each collection is persisted as a whole under its own key, so every
//! mutation is a read-modify-write of one or two collections. Those cycles
//! run under an in-process lock; callers sharing one store never lose
//! updates. Callers are expected to reload their view after each mutation.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use storage::keys;
use storage::{decode_words, encode_words, CodecError, KeyValueStore, KvError, WordRecord};
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors that can occur during lifecycle operations
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Underlying store failed
    #[error("Storage error: {0}")]
    Storage(#[from] KvError),

    /// A stored collection could not be decoded or encoded
    #[error("Codec error in {collection}: {source}")]
    Codec {
        /// Collection being read or written
        collection: Collection,
        /// Codec failure
        #[source]
        source: CodecError,
    },
}

/// Result type for lifecycle operations
pub type Result<T> = std::result::Result<T, LifecycleError>;

/// One of the three named word collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Words the user wants to learn
    ToLearn,
    /// Words the user is actively studying
    Processing,
    /// Words the user already knows
    Known,
}

impl Collection {
    /// All collections
    pub const ALL: [Collection; 3] = [Collection::ToLearn, Collection::Processing, Collection::Known];

    /// Key the collection is persisted under
    pub fn storage_key(&self) -> &'static str {
        match self {
            Collection::ToLearn => keys::TO_LEARN_WORDS,
            Collection::Processing => keys::PROCESSING_WORDS,
            Collection::Known => keys::KNOWN_WORDS,
        }
    }

    /// Collection name
    pub fn name(&self) -> &'static str {
        match self {
            Collection::ToLearn => "toLearn",
            Collection::Processing => "processing",
            Collection::Known => "known",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown collection name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown collection '{0}', expected one of toLearn, processing, known")]
pub struct ParseCollectionError(pub String);

impl FromStr for Collection {
    type Err = ParseCollectionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "toLearn" | "tolearn" | "to-learn" | "to_learn" => Ok(Collection::ToLearn),
            "processing" => Ok(Collection::Processing),
            "known" => Ok(Collection::Known),
            other => Err(ParseCollectionError(other.to_string())),
        }
    }
}

/// Both collections touched by [`WordLifecycleStore::move_to_processing`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovedWord {
    /// To-learn collection after the move
    pub to_learn: Vec<WordRecord>,
    /// Processing collection after the move
    pub processing: Vec<WordRecord>,
}

/// Number of records in each collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollectionCounts {
    /// Records in to-learn
    pub to_learn: usize,
    /// Records in processing
    pub processing: usize,
    /// Records in known
    pub known: usize,
}

impl CollectionCounts {
    /// Total records across all collections
    pub fn total(&self) -> usize {
        self.to_learn + self.processing + self.known
    }
}

/// Persistent store for word categorization
pub struct WordLifecycleStore {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl WordLifecycleStore {
    /// Create a store over a key-value backend
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv, write_lock: Mutex::new(()) }
    }

    /// Read a collection, propagating storage and decode failures
    ///
    /// An absent key is an empty collection.
    pub async fn load_collection(&self, collection: Collection) -> Result<Vec<WordRecord>> {
        match self.kv.get(collection.storage_key()).await? {
            Some(text) => {
                decode_words(&text).map_err(|source| LifecycleError::Codec { collection, source })
            }
            None => Ok(Vec::new()),
        }
    }

    /// Read a collection, treating any failure as empty
    ///
    /// Failures are logged at `warn`. Use [`Self::load_collection`] where a
    /// corrupt collection must not be mistaken for an empty one.
    pub async fn get_collection(&self, collection: Collection) -> Vec<WordRecord> {
        match self.load_collection(collection).await {
            Ok(words) => words,
            Err(e) => {
                tracing::warn!(%collection, error = %e, "Failed to read collection, using empty");
                Vec::new()
            }
        }
    }

    /// Every classified word: `known`, then `toLearn`, then `processing`
    ///
    /// Duplicates across collections are kept.
    pub async fn all_seen(&self) -> Vec<WordRecord> {
        let mut words = self.get_collection(Collection::Known).await;
        words.extend(self.get_collection(Collection::ToLearn).await);
        words.extend(self.get_collection(Collection::Processing).await);
        words
    }

    /// Same as [`Self::all_seen`], but fails on the first unreadable collection
    pub async fn load_all_seen(&self) -> Result<Vec<WordRecord>> {
        let mut words = self.load_collection(Collection::Known).await?;
        words.extend(self.load_collection(Collection::ToLearn).await?);
        words.extend(self.load_collection(Collection::Processing).await?);
        Ok(words)
    }

    /// Record counts per collection
    pub async fn counts(&self) -> CollectionCounts {
        CollectionCounts {
            to_learn: self.get_collection(Collection::ToLearn).await.len(),
            processing: self.get_collection(Collection::Processing).await.len(),
            known: self.get_collection(Collection::Known).await.len(),
        }
    }

    /// Append a word to the to-learn collection
    pub async fn add_to_learn(&self, word: WordRecord) -> Result<()> {
        self.append(Collection::ToLearn, word).await
    }

    /// Append a word to the known collection
    pub async fn add_known(&self, word: WordRecord) -> Result<()> {
        self.append(Collection::Known, word).await
    }

    /// Move a word from to-learn into processing
    ///
    /// Removes every to-learn record with the same term and appends `word`
    /// itself to processing. The append happens even when nothing matched.
    ///
    /// Both collections are written in one [`KeyValueStore::set_many`] call,
    /// processing first. A backend that cannot write atomically may leave
    /// the word in both collections, never in neither.
    pub async fn move_to_processing(&self, word: WordRecord) -> Result<MovedWord> {
        let _guard = self.write_lock.lock().await;

        let mut to_learn = self.load_collection(Collection::ToLearn).await?;
        let mut processing = self.load_collection(Collection::Processing).await?;

        to_learn.retain(|w| w.term != word.term);
        tracing::debug!(term = %word.term, "Moving word to processing");
        processing.push(word);

        let processing_text = Self::encode(Collection::Processing, &processing)?;
        let to_learn_text = Self::encode(Collection::ToLearn, &to_learn)?;
        self.kv
            .set_many(&[
                (Collection::Processing.storage_key(), processing_text.as_str()),
                (Collection::ToLearn.storage_key(), to_learn_text.as_str()),
            ])
            .await?;

        Ok(MovedWord { to_learn, processing })
    }

    /// Delete every processing record with the same term as `word`
    pub async fn delete_from_processing(&self, word: &WordRecord) -> Result<Vec<WordRecord>> {
        let _guard = self.write_lock.lock().await;

        let mut processing = self.load_collection(Collection::Processing).await?;
        let before = processing.len();
        processing.retain(|w| w.term != word.term);
        tracing::debug!(term = %word.term, removed = before - processing.len(), "Deleted from processing");

        self.save(Collection::Processing, &processing).await?;
        Ok(processing)
    }

    /// Erase all word collections
    ///
    /// The language selection is erased too unless `keep_language` is set,
    /// in which case its keys are left untouched.
    pub async fn clear_all(&self, keep_language: bool) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut targets: Vec<&str> = keys::WORD_KEYS.to_vec();
        if !keep_language {
            targets.extend(keys::LANGUAGE_KEYS);
        }

        let removed = self.kv.remove_many(&targets).await?;
        tracing::info!(removed, keep_language, "Cleared stored progress");
        Ok(())
    }

    async fn append(&self, collection: Collection, word: WordRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut words = self.load_collection(collection).await?;
        tracing::debug!(%collection, term = %word.term, "Adding word");
        words.push(word);
        self.save(collection, &words).await
    }

    async fn save(&self, collection: Collection, words: &[WordRecord]) -> Result<()> {
        let text = Self::encode(collection, words)?;
        self.kv.set(collection.storage_key(), &text).await?;
        Ok(())
    }

    fn encode(collection: Collection, words: &[WordRecord]) -> Result<String> {
        encode_words(words).map_err(|source| LifecycleError::Codec { collection, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use storage::{Level, MemoryStore};

    fn cat() -> WordRecord {
        WordRecord::new("cat", "kedi", Level::A1)
    }

    fn dog() -> WordRecord {
        WordRecord::new("dog", "köpek", Level::A1)
    }

    fn store() -> (WordLifecycleStore, MemoryStore) {
        let kv = MemoryStore::new();
        (WordLifecycleStore::new(Arc::new(kv.clone())), kv)
    }

    /// Backend whose writes always fail
    struct ReadOnlyStore(MemoryStore);

    #[async_trait]
    impl KeyValueStore for ReadOnlyStore {
        async fn get(&self, key: &str) -> storage::kv::Result<Option<String>> {
            self.0.get(key).await
        }

        async fn set(&self, _key: &str, _value: &str) -> storage::kv::Result<()> {
            Err(KvError::Unavailable("read-only".to_string()))
        }

        async fn remove(&self, _key: &str) -> storage::kv::Result<bool> {
            Err(KvError::Unavailable("read-only".to_string()))
        }
    }

    /// Backend that refuses writes to one key
    struct FailingKey {
        inner: MemoryStore,
        key: &'static str,
    }

    #[async_trait]
    impl KeyValueStore for FailingKey {
        async fn get(&self, key: &str) -> storage::kv::Result<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> storage::kv::Result<()> {
            if key == self.key {
                return Err(KvError::Unavailable(format!("{key} is not writable")));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> storage::kv::Result<bool> {
            self.inner.remove(key).await
        }
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::ToLearn.storage_key(), "toLearnWords");
        assert_eq!(Collection::Processing.storage_key(), "processingWords");
        assert_eq!(Collection::Known.storage_key(), "knownWords");
        assert_eq!("toLearn".parse::<Collection>().unwrap(), Collection::ToLearn);
        assert_eq!("to-learn".parse::<Collection>().unwrap(), Collection::ToLearn);
        assert_eq!("known".parse::<Collection>().unwrap(), Collection::Known);
        assert!("archived".parse::<Collection>().is_err());
    }

    #[tokio::test]
    async fn test_empty_collections() {
        let (store, _) = store();
        for collection in Collection::ALL {
            assert!(store.get_collection(collection).await.is_empty());
        }
        assert!(store.all_seen().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_to_learn_appends_last() {
        let (store, _) = store();

        store.add_to_learn(dog()).await.unwrap();
        store.add_to_learn(cat()).await.unwrap();

        let words = store.get_collection(Collection::ToLearn).await;
        assert_eq!(words.last(), Some(&cat()));
        assert_eq!(words.len(), 2);
    }

    #[tokio::test]
    async fn test_add_allows_duplicates() {
        let (store, _) = store();

        store.add_known(cat()).await.unwrap();
        store.add_known(cat()).await.unwrap();

        assert_eq!(store.get_collection(Collection::Known).await, vec![cat(), cat()]);
    }

    #[tokio::test]
    async fn test_persisted_layout() {
        let (store, kv) = store();

        store.add_known(cat()).await.unwrap();

        let raw = kv.get("knownWords").await.unwrap().unwrap();
        assert_eq!(raw, r#"[{"term":"cat","meaning":"kedi","level":"a1"}]"#);
    }

    #[tokio::test]
    async fn test_corrupt_collection_reads_empty() {
        let (store, kv) = store();
        kv.set("toLearnWords", "{not json").await.unwrap();

        assert!(store.get_collection(Collection::ToLearn).await.is_empty());
        assert!(matches!(
            store.load_collection(Collection::ToLearn).await,
            Err(LifecycleError::Codec { collection: Collection::ToLearn, .. })
        ));
    }

    #[tokio::test]
    async fn test_add_to_corrupt_collection_does_not_overwrite() {
        let (store, kv) = store();
        kv.set("knownWords", "{not json").await.unwrap();

        assert!(store.add_known(cat()).await.is_err());
        assert_eq!(kv.get("knownWords").await.unwrap(), Some("{not json".to_string()));
    }

    #[tokio::test]
    async fn test_all_seen_order_and_duplicates() {
        let (store, _) = store();
        let bird = WordRecord::new("bird", "kuş", Level::A2);

        store.add_to_learn(dog()).await.unwrap();
        store.add_known(cat()).await.unwrap();
        store.add_to_learn(bird.clone()).await.unwrap();
        store.move_to_processing(bird.clone()).await.unwrap();
        store.add_to_learn(cat()).await.unwrap();

        let seen = store.all_seen().await;
        assert_eq!(seen, vec![cat(), dog(), cat(), bird]);
    }

    #[tokio::test]
    async fn test_move_to_processing() {
        let (store, _) = store();

        store.add_to_learn(cat()).await.unwrap();
        assert_eq!(store.get_collection(Collection::ToLearn).await, vec![cat()]);

        let moved = store.move_to_processing(cat()).await.unwrap();
        assert!(moved.to_learn.is_empty());
        assert_eq!(moved.processing, vec![cat()]);

        assert!(store.get_collection(Collection::ToLearn).await.is_empty());
        assert_eq!(store.get_collection(Collection::Processing).await, vec![cat()]);

        let remaining = store.delete_from_processing(&cat()).await.unwrap();
        assert!(remaining.is_empty());
        assert!(store.get_collection(Collection::Processing).await.is_empty());
    }

    #[tokio::test]
    async fn test_move_removes_all_matching_terms() {
        let (store, _) = store();

        store.add_to_learn(cat()).await.unwrap();
        store.add_to_learn(dog()).await.unwrap();
        store
            .add_to_learn(WordRecord::new("cat", "pisi", Level::A2))
            .await
            .unwrap();

        let moved = store.move_to_processing(cat()).await.unwrap();
        assert_eq!(moved.to_learn, vec![dog()]);
        assert_eq!(moved.processing, vec![cat()]);
    }

    #[tokio::test]
    async fn test_move_appends_even_without_match() {
        let (store, _) = store();
        store.add_to_learn(dog()).await.unwrap();

        let moved = store.move_to_processing(cat()).await.unwrap();
        assert_eq!(moved.to_learn, vec![dog()]);
        assert_eq!(moved.processing, vec![cat()]);
    }

    #[tokio::test]
    async fn test_move_appends_supplied_record() {
        let (store, _) = store();
        store.add_to_learn(cat()).await.unwrap();

        let supplied = WordRecord::new("cat", "pisi", Level::B1);
        let moved = store.move_to_processing(supplied.clone()).await.unwrap();
        assert_eq!(moved.processing, vec![supplied]);
    }

    #[tokio::test]
    async fn test_failed_move_keeps_word_in_to_learn() {
        let kv = MemoryStore::new();
        let store = WordLifecycleStore::new(Arc::new(FailingKey {
            inner: kv.clone(),
            key: "processingWords",
        }));
        store.add_to_learn(cat()).await.unwrap();

        let result = store.move_to_processing(cat()).await;

        assert!(matches!(result, Err(LifecycleError::Storage(KvError::Unavailable(_)))));
        assert_eq!(store.get_collection(Collection::ToLearn).await, vec![cat()]);
        assert!(store.get_collection(Collection::Processing).await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_to_learn_write_leaves_word_recoverable() {
        let kv = MemoryStore::new();
        let store = WordLifecycleStore::new(Arc::new(FailingKey {
            inner: kv.clone(),
            key: "toLearnWords",
        }));
        kv.set("toLearnWords", r#"[{"term":"cat","meaning":"kedi","level":"a1"}]"#)
            .await
            .unwrap();

        assert!(store.move_to_processing(cat()).await.is_err());
        assert_eq!(store.get_collection(Collection::ToLearn).await, vec![cat()]);
        assert_eq!(store.get_collection(Collection::Processing).await, vec![cat()]);
    }

    #[tokio::test]
    async fn test_load_all_seen_reports_corruption() {
        let (store, kv) = store();
        store.add_to_learn(dog()).await.unwrap();
        kv.set("knownWords", "{not json").await.unwrap();

        assert_eq!(store.all_seen().await, vec![dog()]);
        assert!(matches!(
            store.load_all_seen().await,
            Err(LifecycleError::Codec { collection: Collection::Known, .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_from_processing_is_idempotent() {
        let (store, _) = store();
        store.move_to_processing(cat()).await.unwrap();
        store.move_to_processing(dog()).await.unwrap();

        let once = store.delete_from_processing(&cat()).await.unwrap();
        let twice = store.delete_from_processing(&cat()).await.unwrap();
        assert_eq!(once, vec![dog()]);
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_delete_missing_term_is_noop() {
        let (store, _) = store();
        store.move_to_processing(dog()).await.unwrap();

        let remaining = store.delete_from_processing(&cat()).await.unwrap();
        assert_eq!(remaining, vec![dog()]);
    }

    #[tokio::test]
    async fn test_clear_all_without_language() {
        let (store, kv) = store();
        kv.set("selectedLanguageTwo", "es").await.unwrap();
        kv.set("selectedLanguageThree", "spa").await.unwrap();
        kv.set("selectedLanguageName", "Spanish").await.unwrap();
        store.add_known(cat()).await.unwrap();
        store.add_to_learn(dog()).await.unwrap();
        store.move_to_processing(dog()).await.unwrap();

        store.clear_all(false).await.unwrap();

        assert!(kv.is_empty().await);
        assert_eq!(store.counts().await.total(), 0);
    }

    #[tokio::test]
    async fn test_clear_all_keeps_language() {
        let (store, kv) = store();
        kv.set("selectedLanguageTwo", "es").await.unwrap();
        kv.set("selectedLanguageName", "Spanish").await.unwrap();
        store.add_known(cat()).await.unwrap();
        store.add_to_learn(dog()).await.unwrap();

        store.clear_all(true).await.unwrap();

        assert_eq!(store.counts().await, CollectionCounts::default());
        assert_eq!(kv.get("selectedLanguageTwo").await.unwrap(), Some("es".to_string()));
        assert_eq!(kv.get("selectedLanguageName").await.unwrap(), Some("Spanish".to_string()));
        assert_eq!(kv.get("selectedLanguageThree").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_counts() {
        let (store, _) = store();
        store.add_known(cat()).await.unwrap();
        store.add_to_learn(dog()).await.unwrap();
        store.add_to_learn(cat()).await.unwrap();
        store.move_to_processing(dog()).await.unwrap();

        let counts = store.counts().await;
        assert_eq!(counts, CollectionCounts { to_learn: 1, processing: 1, known: 1 });
        assert_eq!(counts.total(), 3);
    }

    #[tokio::test]
    async fn test_write_failures_propagate() {
        let kv = MemoryStore::new();
        let store = WordLifecycleStore::new(Arc::new(ReadOnlyStore(kv)));

        assert!(matches!(store.add_to_learn(cat()).await, Err(LifecycleError::Storage(_))));
        assert!(store.move_to_processing(cat()).await.is_err());
        assert!(store.delete_from_processing(&cat()).await.is_err());
        assert!(store.clear_all(true).await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let (store, _) = store();
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .add_to_learn(WordRecord::new(format!("word{i}"), "meaning", Level::B1))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get_collection(Collection::ToLearn).await.len(), 20);
    }
}
