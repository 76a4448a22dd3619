//! Remote completion API contract.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::CompletionResult;

/// Keyword arguments forwarded verbatim to the remote call.
pub type CompletionRequest = Map<String, Value>;

/// Boxed future returned by [`CompletionApi`] methods.
///
/// `'static` so an attempt can run on its own worker task.
pub type ApiFuture = Pin<Box<dyn Future<Output = CompletionResult<Value>> + Send + 'static>>;

/// A remote text-completion service.
///
/// Implementations map their transport failures into `CompletionError`,
/// choosing a transient kind for anything worth retrying.
pub trait CompletionApi: Send + Sync + 'static {
    /// Create a text completion.
    fn create_completion(&self, request: CompletionRequest) -> ApiFuture;

    /// Create a chat completion.
    fn create_chat_completion(&self, request: CompletionRequest) -> ApiFuture;
}

impl<A: CompletionApi + ?Sized> CompletionApi for Arc<A> {
    fn create_completion(&self, request: CompletionRequest) -> ApiFuture {
        (**self).create_completion(request)
    }

    fn create_chat_completion(&self, request: CompletionRequest) -> ApiFuture {
        (**self).create_chat_completion(request)
    }
}
