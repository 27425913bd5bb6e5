//! Sequential composition of two requests.

use tracing::debug;

use crate::{Requestable, Result};

/// Runs `first`, then `second` only if `first` succeeded.
///
/// The value produced by `first` is discarded; it only gates `second`. A
/// failure of `first` is returned unchanged and `second` is never sent.
/// Build one with [`Requestable::concat`].
///
/// ```ignore
/// let signup_then_login = signup.concat(login);
/// let credentials = signup_then_login.execute().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ChainedRequest<F, S> {
    first: F,
    second: S,
}

impl<F, S> ChainedRequest<F, S> {
    /// Compose two requests. No call is made until the chain is started.
    #[must_use]
    pub const fn new(first: F, second: S) -> Self {
        Self { first, second }
    }

    /// The request that runs first.
    #[must_use]
    pub const fn first(&self) -> &F {
        &self.first
    }

    /// The request whose result the chain produces.
    #[must_use]
    pub const fn second(&self) -> &S {
        &self.second
    }
}

impl<F, S> Requestable for ChainedRequest<F, S>
where
    F: Requestable,
    S: Requestable,
{
    type Output = S::Output;

    async fn execute(&self) -> Result<S::Output> {
        if let Err(err) = self.first.execute().await {
            debug!(error = %err, "first request failed, skipping second");
            return Err(err);
        }
        debug!("first request succeeded, starting second");
        self.second.execute().await
    }
}
