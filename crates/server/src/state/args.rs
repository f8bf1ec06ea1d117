use std::{convert::Infallible, ops::Deref, sync::Arc};

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::cli::Cli;

/// Server configuration, available to any handler
#[derive(Debug)]
pub struct Args(Arc<Cli>);

impl From<Arc<Cli>> for Args {
    fn from(args: Arc<Cli>) -> Self {
        Args(args)
    }
}

impl Deref for Args {
    type Target = Arc<Cli>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Args
where
    S: Send + Sync,
    Arc<Cli>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(<Arc<Cli>>::from_ref(state).into())
    }
}
