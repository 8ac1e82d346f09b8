use std::fmt;

use futures::future::BoxFuture;

use crate::model;

#[cfg(test)]
pub mod mock;
pub mod qingstor;

/// Service level handle of a storage backend.
pub trait Servicer: fmt::Display + Send + Sync {
    /// Builds a storager for bucket `name`, using `pairs` for everything else.
    fn get<'a>(
        &'a self,
        name: &'a str,
        pairs: &'a [model::pairs::Pair],
    ) -> BoxFuture<'a, Result<Box<dyn Storager>, model::error::ServiceError>>;
}

/// Bucket scoped handle that higher layers operate on.
pub trait Storager: fmt::Display + Send + Sync {
    fn metadata(&self) -> model::object::StorageMeta;
}
