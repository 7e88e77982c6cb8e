//! Scripted generator for tests
//!
//! Queue results with `queue_response()` / `queue_error()`; each call to
//! `generate()` consumes one, optionally after a delay.

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::traits::Generator;
use crate::error::GenerateError;

pub struct MockGenerator<V> {
    responses: Mutex<VecDeque<Result<V, GenerateError>>>,
    queries: Mutex<Vec<String>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    _output: PhantomData<fn() -> V>,
}

impl<V> MockGenerator<V> {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            queries: Mutex::new(Vec::new()),
            delay: None,
            calls: AtomicUsize::new(0),
            _output: PhantomData,
        }
    }

    /// Wait `delay` before answering each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queue_response(&self, value: V) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(value));
    }

    pub fn queue_error(&self, error: GenerateError) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(error));
    }

    /// Number of `generate()` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Queries received, in call order
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<V> Default for MockGenerator<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V> Generator for MockGenerator<V>
where
    V: Clone + Serialize + DeserializeOwned + Send + 'static,
{
    type Output = V;

    async fn generate(&self, query: &str) -> Result<V, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.to_string());
        let response = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        response.unwrap_or_else(|| Err(GenerateError::Request("no scripted response".to_string())))
    }
}
