//! The slice of the QingStor SDK surface the adapter depends on.
//!
//! `Service` and `Bucket` are the only capabilities the adapter calls, so test
//! doubles can stand in for the real service handle.

use std::fmt;

use thiserror::Error;

use crate::model::error::BoxError;

pub const DEFAULT_HOST: &str = "qingstor.com";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_PROTOCOL: &str = "https";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("access key id is empty")]
    EmptyAccessKeyId,

    #[error("secret access key is empty")]
    EmptySecretAccessKey,
}

/// Connection config. Cloned into every handle, never shared by reference.
#[derive(Clone)]
pub struct Config {
    pub access_key_id: String,
    pub secret_access_key: String,

    pub host: String,
    pub port: u16,
    pub protocol: String,

    pub connection: Option<reqwest::Client>,
    pub disable_uri_cleaning: bool,
}

impl Config {
    pub fn new(access_key_id: &str, secret_access_key: &str) -> Result<Self, ConfigError> {
        if access_key_id.is_empty() {
            return Err(ConfigError::EmptyAccessKeyId);
        }
        if secret_access_key.is_empty() {
            return Err(ConfigError::EmptySecretAccessKey);
        }

        Ok(Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            protocol: DEFAULT_PROTOCOL.to_string(),
            connection: None,
            disable_uri_cleaning: false,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("protocol", &self.protocol)
            .field("connection", &self.connection.is_some())
            .field("disable_uri_cleaning", &self.disable_uri_cleaning)
            .finish()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties {
    pub bucket_name: String,
    pub zone: String,
}

/// One entry of a bucket listing.
#[derive(Clone, Debug, Default)]
pub struct KeyType {
    pub key: Option<String>,
    pub size: Option<i64>,
    /// Unix seconds; 0 when unknown.
    pub modified: Option<i64>,
    pub mime_type: Option<String>,
    pub storage_class: Option<String>,
    pub etag: Option<String>,
}

/// Error returned by the service. An empty `code` means the response had no body.
#[derive(Clone, Debug, Default, Error)]
#[error(
    "QingStor Error: StatusCode \"{status_code}\", Code \"{code}\", Message \"{message}\", Request ID \"{request_id}\""
)]
pub struct QingStorError {
    pub status_code: u16,
    pub code: String,
    pub message: String,
    pub request_id: String,
}

pub trait Bucket: Send + Sync {
    fn config(&self) -> &Config;
    fn properties(&self) -> &Properties;
}

pub trait Service: Send + Sync {
    fn bucket(&self, name: &str, zone: &str) -> Result<Box<dyn Bucket>, BoxError>;
}

pub struct QingStorService {
    config: Config,
}

impl QingStorService {
    pub fn init(config: Config) -> Result<Self, ConfigError> {
        if config.access_key_id.is_empty() {
            return Err(ConfigError::EmptyAccessKeyId);
        }

        Ok(Self { config })
    }
}

impl Service for QingStorService {
    fn bucket(&self, name: &str, zone: &str) -> Result<Box<dyn Bucket>, BoxError> {
        Ok(Box::new(QingStorBucket {
            config: self.config.clone(),
            properties: Properties {
                bucket_name: name.to_string(),
                zone: zone.to_string(),
            },
        }))
    }
}

pub struct QingStorBucket {
    config: Config,
    properties: Properties,
}

impl Bucket for QingStorBucket {
    fn config(&self) -> &Config {
        &self.config
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let cases = vec![
            ("ak", "sk", true),
            ("", "sk", false),
            ("ak", "", false),
        ];

        for (ak, sk, ok) in cases {
            let result = Config::new(ak, sk);
            assert_eq!(result.is_ok(), ok, "failed for case: {}:{}", ak, sk);
        }

        let cfg = Config::new("ak", "sk").unwrap();
        assert_eq!(cfg.host, DEFAULT_HOST);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.protocol, DEFAULT_PROTOCOL);
        assert!(!format!("{:?}", cfg).contains("\"sk\""));
    }

    #[test]
    fn test_service_bucket() {
        let srv = QingStorService::init(Config::new("ak", "sk").unwrap()).unwrap();
        let bucket = srv.bucket("mybucket", "pek3a").unwrap();

        assert_eq!(bucket.properties().bucket_name, "mybucket");
        assert_eq!(bucket.properties().zone, "pek3a");
        assert_eq!(bucket.config().access_key_id, "ak");
    }

    #[test]
    fn test_error_display() {
        let err = QingStorError {
            status_code: 404,
            code: "object_not_exists".to_string(),
            ..Default::default()
        };

        assert!(err.to_string().contains("object_not_exists"));
        assert!(err.to_string().contains("404"));
    }
}
