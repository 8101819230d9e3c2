//! Single-shot asynchronous facade over the synchronous adapter.
//!
//! Each `*_deferred` method starts the synchronous operation on tokio's
//! blocking pool right away and returns a [`Deferred`] that resolves exactly
//! once with its result. Nothing is retried and awaiting twice is impossible
//! since the future is consumed.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;

use crate::adapter::{Adapter, AdapterError};
use crate::codec::Serializer;
use crate::store::KeyValueStore;

/// The pending result of an adapter operation running in the background.
#[must_use = "a Deferred does nothing useful unless awaited"]
pub struct Deferred<T> {
    handle: JoinHandle<Result<T, AdapterError>>,
}

impl<T: Send + 'static> Deferred<T> {
    fn spawn<F>(operation: F) -> Self
    where
        F: FnOnce() -> Result<T, AdapterError> + Send + 'static,
    {
        Self {
            handle: tokio::task::spawn_blocking(operation),
        }
    }
}

impl<T> Future for Deferred<T> {
    type Output = Result<T, AdapterError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(e)) => Poll::Ready(Err(AdapterError::Interrupted(e.to_string()))),
        }
    }
}

/// Deferred variants of the adapter operations.
///
/// These must be called from within a Tokio runtime.
impl<S, C> Adapter<S, C>
where
    S: KeyValueStore + Send + Sync + ?Sized + 'static,
    C: Serializer + Clone + Send + 'static,
{
    /// Deferred [`load`](Adapter::load).
    pub fn load_deferred<T>(&self, custom_key: Option<&str>) -> Deferred<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let adapter = self.clone();
        let custom_key = custom_key.map(str::to_owned);
        Deferred::spawn(move || adapter.load::<T>(custom_key.as_deref()))
    }

    /// Deferred [`load_if_present`](Adapter::load_if_present).
    ///
    /// Resolves to an error only if the background task itself failed.
    pub fn load_if_present_deferred<T>(&self, custom_key: Option<&str>) -> Deferred<Option<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let adapter = self.clone();
        let custom_key = custom_key.map(str::to_owned);
        Deferred::spawn(move || Ok(adapter.load_if_present::<T>(custom_key.as_deref())))
    }

    /// Deferred [`save`](Adapter::save). Takes the value by ownership.
    pub fn save_deferred<T>(&self, value: Option<T>, custom_key: Option<&str>) -> Deferred<()>
    where
        T: Serialize + Send + 'static,
    {
        let adapter = self.clone();
        let custom_key = custom_key.map(str::to_owned);
        Deferred::spawn(move || adapter.save(value.as_ref(), custom_key.as_deref()))
    }

    /// Deferred [`remove`](Adapter::remove).
    pub fn remove_deferred<T>(&self, custom_key: Option<&str>) -> Deferred<()>
    where
        T: ?Sized + 'static,
    {
        let adapter = self.clone();
        let custom_key = custom_key.map(str::to_owned);
        Deferred::spawn(move || adapter.remove::<T>(custom_key.as_deref()))
    }
}
