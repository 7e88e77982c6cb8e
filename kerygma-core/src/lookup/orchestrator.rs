//! Runs a feature's generator and records successful results

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::traits::Generator;
use crate::error::LookupError;
use crate::history::{HistoryEntry, SharedHistory};

/// Lookup flow for one feature.
///
/// At most one lookup is live at a time: starting a new one, or calling
/// [`Lookup::cancel`], abandons the previous one, and a response that arrives
/// after that point is dropped instead of being recorded.
pub struct Lookup<G: Generator> {
    generator: Arc<G>,
    history: SharedHistory<G::Output>,
    current: Mutex<CancellationToken>,
}

impl<G: Generator> Lookup<G> {
    pub fn new(generator: Arc<G>, history: SharedHistory<G::Output>) -> Self {
        Self {
            generator,
            history,
            current: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn history(&self) -> &SharedHistory<G::Output> {
        &self.history
    }

    /// Generate a result for `query` and record it in the history.
    ///
    /// Nothing is recorded when the query is blank, the generator fails, or
    /// the lookup is cancelled or superseded before it completes.
    pub async fn lookup(&self, query: &str) -> Result<HistoryEntry<G::Output>, LookupError> {
        if query.trim().is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        let token = self.begin();
        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            result = self.generator.generate(query) => Some(result),
        };

        let Some(result) = outcome else {
            debug!(query, "lookup cancelled while generating");
            return Err(LookupError::Cancelled);
        };
        let value = result.inspect_err(|e| warn!(query, error = %e, "lookup failed"))?;

        self.commit(&token, query, value)
    }

    /// Abandon the lookup in flight, if any
    pub fn cancel(&self) {
        lock(&self.current).cancel();
    }

    /// Supersede any previous lookup and hand out the new one's token
    fn begin(&self) -> CancellationToken {
        let mut current = lock(&self.current);
        current.cancel();
        *current = CancellationToken::new();
        current.clone()
    }

    fn commit(
        &self,
        token: &CancellationToken,
        query: &str,
        value: G::Output,
    ) -> Result<HistoryEntry<G::Output>, LookupError> {
        // Holding `current` keeps cancel() from interleaving with the write.
        let _current = lock(&self.current);
        if token.is_cancelled() {
            debug!(query, "dropping response of a cancelled lookup");
            return Err(LookupError::Cancelled);
        }
        Ok(lock(&self.history).record(query, value))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::error::GenerateError;
    use crate::history::{HistoryConfig, HistoryStore};
    use crate::lookup::MockGenerator;
    use crate::storage::Persistence;

    fn history() -> SharedHistory<String> {
        HistoryStore::open(Persistence::in_memory(), "lookup_test", HistoryConfig::default())
            .unwrap()
            .into_shared()
    }

    async fn wait_for_calls(generator: &MockGenerator<String>, calls: usize) {
        while generator.calls() < calls {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_success_records_once() {
        let generator = Arc::new(MockGenerator::new());
        generator.queue_response("favor imerecido".to_string());
        let lookup = Lookup::new(generator.clone(), history());

        let entry = lookup.lookup("Graça").await.unwrap();

        assert_eq!(entry.key, "Graça");
        assert_eq!(entry.value, "favor imerecido");
        let list = lookup.history().lock().unwrap().list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, entry.id);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_does_not_record() {
        let generator = Arc::new(MockGenerator::new());
        generator.queue_error(GenerateError::Request("503".into()));
        let lookup = Lookup::new(generator, history());

        let err = lookup.lookup("Graça").await.unwrap_err();

        assert_eq!(err, LookupError::Generate(GenerateError::Request("503".into())));
        assert!(lookup.history().lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_skips_generator() {
        let generator = Arc::new(MockGenerator::<String>::new());
        let lookup = Lookup::new(generator.clone(), history());

        assert_eq!(lookup.lookup("   ").await.unwrap_err(), LookupError::EmptyQuery);
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_late_response() {
        let generator = Arc::new(MockGenerator::new().with_delay(Duration::from_secs(5)));
        generator.queue_response("tarde demais".to_string());
        let lookup = Arc::new(Lookup::new(generator.clone(), history()));

        let task = {
            let lookup = lookup.clone();
            tokio::spawn(async move { lookup.lookup("Êxodo 12").await })
        };
        wait_for_calls(&generator, 1).await;
        lookup.cancel();

        assert_eq!(task.await.unwrap().unwrap_err(), LookupError::Cancelled);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(lookup.history().lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_lookup_supersedes_previous() {
        let generator = Arc::new(MockGenerator::new().with_delay(Duration::from_secs(1)));
        generator.queue_response("antigo".to_string());
        generator.queue_response("novo".to_string());
        let lookup = Arc::new(Lookup::new(generator.clone(), history()));

        let first = {
            let lookup = lookup.clone();
            tokio::spawn(async move { lookup.lookup("Romanos 8").await })
        };
        wait_for_calls(&generator, 1).await;

        let second = lookup.lookup("Romanos 9").await.unwrap();

        assert_eq!(first.await.unwrap().unwrap_err(), LookupError::Cancelled);
        let list = lookup.history().lock().unwrap().list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, second.id);
        assert_eq!(list[0].value, "novo");
    }

    #[tokio::test]
    async fn test_cancel_before_lookup_does_not_block_it() {
        let generator = Arc::new(MockGenerator::new());
        generator.queue_response("ok".to_string());
        let lookup = Lookup::new(generator, history());

        lookup.cancel();
        assert!(lookup.lookup("Salmo 23").await.is_ok());
    }
}
