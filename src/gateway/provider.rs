use futures_util::future::BoxFuture;

use super::ProviderFailure;

/// A remote text-completion service: prompt in, unstructured text out.
pub trait TextProvider: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, ProviderFailure>>;
}
