use thiserror::Error;

use crate::model::pairs::Pair;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Generic, vendor independent error taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    #[error("object not exist: {0}")]
    ObjectNotExist(#[source] BoxError),

    #[error("permission denied: {0}")]
    PermissionDenied(#[source] BoxError),

    #[error("invalid bucket name: {0}")]
    InvalidBucketName(String),

    #[error("invalid work dir: {0}")]
    InvalidWorkDir(String),

    #[error("pair unsupported: {0:?}")]
    PairUnsupported(Pair),

    #[error("pair required: {0}")]
    PairRequired(&'static str),

    #[error("pair invalid: {name}, {reason}")]
    PairInvalid { name: &'static str, reason: String },

    #[error("head status is {got} instead of {want}")]
    UnexpectedStatus { got: u16, want: u16 },

    #[error("malformed redirect location: {0:?}")]
    MalformedRedirect(Option<String>),
}

impl Error {
    pub fn is_object_not_exist(&self) -> bool {
        matches!(self, Error::ObjectNotExist(_))
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::PermissionDenied(_))
    }
}

/// Returned by every construction entry point.
#[derive(Debug, Error)]
#[error("{op} on {ty} with pairs {pairs:?}: {err}")]
pub struct InitError {
    pub op: &'static str,
    pub ty: &'static str,
    #[source]
    pub err: BoxError,
    pub pairs: Vec<Pair>,
}

impl InitError {
    pub fn cause(&self) -> Option<&Error> {
        self.err.downcast_ref::<Error>()
    }
}

#[derive(Debug, Error)]
#[error("{servicer} {op} [{name}]: {err}")]
pub struct ServiceError {
    pub op: &'static str,
    #[source]
    pub err: BoxError,
    pub servicer: String,
    pub name: String,
}

impl ServiceError {
    pub fn cause(&self) -> Option<&Error> {
        self.err.downcast_ref::<Error>()
    }
}

#[derive(Debug, Error)]
#[error("{storager} {op} {path:?}: {err}")]
pub struct StorageError {
    pub op: &'static str,
    #[source]
    pub err: BoxError,
    pub storager: String,
    pub path: Vec<String>,
}

impl StorageError {
    pub fn cause(&self) -> Option<&Error> {
        self.err.downcast_ref::<Error>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let cases = vec![
            (Error::InvalidBucketName("ab".to_string()), "invalid bucket name: ab"),
            (Error::InvalidWorkDir("foo/".to_string()), "invalid work dir: foo/"),
            (Error::PairRequired("name"), "pair required: name"),
            (
                Error::UnexpectedStatus { got: 200, want: 307 },
                "head status is 200 instead of 307",
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected, "failed for case: {:?}", err);
        }
    }

    #[test]
    fn test_init_error_cause() {
        let err = InitError {
            op: "new_servicer",
            ty: "qingstor",
            err: Box::new(Error::PairRequired("credential")),
            pairs: vec![Pair::Name("bucket".to_string())],
        };

        assert!(matches!(err.cause(), Some(Error::PairRequired("credential"))));
        assert!(err.to_string().starts_with("new_servicer on qingstor"));
    }

    #[test]
    fn test_storage_error_keeps_paths() {
        let err = StorageError {
            op: "stat",
            err: Box::new(Error::ObjectNotExist("gone".into())),
            storager: "Storager qingstor".to_string(),
            path: vec!["a.txt".to_string()],
        };

        assert!(err.cause().is_some_and(Error::is_object_not_exist));
        assert!(err.to_string().contains("a.txt"));
    }
}
