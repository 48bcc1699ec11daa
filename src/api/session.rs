use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

use crate::logic::ServiceError;
use crate::store::Store;

/// Axum extractor opening one transactional session per request.
///
/// Runs before the request body is read, so handlers that take a JSON body
/// extract `State` instead and call [`Store::begin`] once the payload is parsed.
/// A session dropped without commit rolls back anything left pending.
pub struct DbSession<S: Store>(pub S::Session);

#[async_trait]
impl<S: Store> FromRequestParts<Arc<S>> for DbSession<S> {
    type Rejection = ServiceError;

    async fn from_request_parts(
        _parts: &mut Parts,
        store: &Arc<S>,
    ) -> Result<Self, Self::Rejection> {
        let session = store.begin().await?;
        Ok(DbSession(session))
    }
}
