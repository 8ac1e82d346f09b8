//! QingStor implementation of the `Servicer` / `Storager` seam.

use std::{fmt, sync::Arc};

use futures::future::BoxFuture;
use http::{header::LOCATION, StatusCode};
use tracing::{error, info, span, warn, Instrument, Level};

use crate::{
    adapters::{Servicer, Storager},
    model::{
        error::{BoxError, Error, InitError, ServiceError, StorageError},
        object::{Object, ObjectType, StorageClass, StorageMeta},
        pairs::{CredentialProtocol, Pair},
        qingstor::{Bucket, Config, KeyType, Properties, QingStorError, QingStorService},
    },
    util::{
        httpclient::{self, HeadClient},
        object::{convert_unix_timestamp_to_time, is_bucket_name_valid, is_work_dir_valid},
        pairs::{parse_pair_service_new, parse_pair_storage_new},
    },
};

pub const TYPE: &str = "qingstor";

pub const STORAGE_CLASS_STANDARD: &str = "STANDARD";
pub const STORAGE_CLASS_STANDARD_IA: &str = "STANDARD_IA";

const DIRECTORY_MIME_TYPE: &str = "application/x-directory";

pub fn parse_storage_class(v: &str) -> Option<StorageClass> {
    match v {
        STORAGE_CLASS_STANDARD => Some(StorageClass::Standard),
        STORAGE_CLASS_STANDARD_IA => Some(StorageClass::StandardIa),
        _ => None,
    }
}

/// Creates both the service and the storage.
pub async fn new(pairs: &[Pair]) -> Result<(Service, Storage), InitError> {
    new_servicer_and_storager(pairs).await
}

pub fn new_servicer(pairs: &[Pair]) -> Result<Service, InitError> {
    let span = span!(Level::INFO, "new_servicer", context = "new_servicer");
    let _e = span.enter();
    info!("called");

    Service::from_pairs(pairs).map_err(|err| init_error("new_servicer", err, pairs))
}

pub async fn new_storager(pairs: &[Pair]) -> Result<Storage, InitError> {
    let (_, store) = new_servicer_and_storager(pairs).await?;
    Ok(store)
}

async fn new_servicer_and_storager(pairs: &[Pair]) -> Result<(Service, Storage), InitError> {
    let span = span!(Level::INFO, "new_storager", context = "new_storager");

    async {
        info!("called");

        let srv = match Service::from_pairs(pairs) {
            Err(err) => return Err(init_error("new_storager", err, pairs)),
            Ok(srv) => srv,
        };

        match srv.new_storage(pairs).await {
            Err(err) => Err(init_error("new_storager", err, pairs)),
            Ok(store) => Ok((srv, store)),
        }
    }
    .instrument(span)
    .await
}

fn init_error(op: &'static str, err: BoxError, pairs: &[Pair]) -> InitError {
    error!(error_message=%err, error_group=op);

    InitError {
        op,
        ty: TYPE,
        err,
        pairs: pairs.to_vec(),
    }
}

/// Maps service errors onto the generic taxonomy; anything else is returned unchanged.
pub fn format_error(err: BoxError) -> BoxError {
    let (code, status_code) = match find_vendor_error(&*err) {
        Some(e) => (e.code.clone(), e.status_code),
        None => return err,
    };

    match code.as_str() {
        // Response without body.
        "" if status_code == 404 => Box::new(Error::ObjectNotExist(err)),
        "permission_denied" => Box::new(Error::PermissionDenied(err)),
        "object_not_exists" => Box::new(Error::ObjectNotExist(err)),
        _ => err,
    }
}

/// First `QingStorError` in the source chain of `err`, `err` itself included.
fn find_vendor_error<'a>(err: &'a (dyn std::error::Error + 'static)) -> Option<&'a QingStorError> {
    let mut cur = Some(err);
    while let Some(e) = cur {
        if let Some(qs) = e.downcast_ref::<QingStorError>() {
            return Some(qs);
        }
        cur = e.source();
    }
    None
}

pub fn is_object_directory(o: &KeyType) -> bool {
    o.mime_type.as_deref() == Some(DIRECTORY_MIME_TYPE)
}

pub struct Service {
    config: Config,
    service: Box<dyn crate::model::qingstor::Service>,

    client: Arc<dyn HeadClient>,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.config.access_key_id.is_empty() {
            return write!(f, "Servicer qingstor");
        }
        write!(f, "Servicer qingstor {{AccessKey: {}}}", self.config.access_key_id)
    }
}

impl Service {
    fn from_pairs(pairs: &[Pair]) -> Result<Self, BoxError> {
        let opt = parse_pair_service_new(pairs)?;

        if opt.credential.protocol() != CredentialProtocol::Hmac {
            return Err(Error::PairUnsupported(Pair::Credential(opt.credential)).into());
        }
        let [access_key, secret_key] = opt.credential.value() else {
            return Err(Error::PairInvalid {
                name: "credential",
                reason: "hmac requires access key and secret key".to_string(),
            }
            .into());
        };

        let client = httpclient::new_client(&opt.http_client_options)?;

        let mut cfg = Config::new(access_key, secret_key)?;
        if let Some(ep) = opt.endpoint {
            cfg.host = ep.host;
            cfg.port = ep.port;
            cfg.protocol = ep.protocol.as_str().to_string();
        }
        cfg.connection = Some(client.clone());

        let service = QingStorService::init(cfg.clone())?;

        Ok(Self::from_parts(cfg, Box::new(service), Arc::new(client)))
    }

    pub(crate) fn from_parts(
        config: Config,
        service: Box<dyn crate::model::qingstor::Service>,
        client: Arc<dyn HeadClient>,
    ) -> Self {
        Self {
            config,
            service,
            client,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) async fn new_storage(&self, pairs: &[Pair]) -> Result<Storage, BoxError> {
        let span = span!(Level::INFO, "new_storage", context = "new_storage");
        self.try_new_storage(pairs).instrument(span).await
    }

    async fn try_new_storage(&self, pairs: &[Pair]) -> Result<Storage, BoxError> {
        let opt = parse_pair_storage_new(pairs)?;
        info!(name = %opt.name, "called");

        let work_dir = match opt.work_dir {
            Some(wd) if !is_work_dir_valid(&wd) => return Err(Error::InvalidWorkDir(wd).into()),
            Some(wd) => wd,
            None => "/".to_string(),
        };

        if !is_bucket_name_valid(&opt.name) {
            return Err(Error::InvalidBucketName(opt.name).into());
        }

        let location = match opt.location {
            Some(location) => location,
            None => self.detect_location(&opt.name).await?,
        };

        let bucket = self.service.bucket(&opt.name, &location)?;

        let mut config = bucket.config().clone();
        if let Some(v) = opt.disable_uri_cleaning {
            config.disable_uri_cleaning = v;
        }
        let properties = bucket.properties().clone();

        let store = Storage {
            bucket,
            config,
            properties,
            work_dir,
        };
        info!(storager = %store, "created");

        Ok(store)
    }

    pub async fn detect_location(&self, name: &str) -> Result<String, ServiceError> {
        let span = span!(Level::INFO, "detect_location", context = "detect_location");

        self.head_location(name)
            .instrument(span)
            .await
            .map_err(|err| {
                error!(error_message=%err, error_group="detect_location");
                self.format_error("detect_location", err, name)
            })
    }

    async fn head_location(&self, name: &str) -> Result<String, BoxError> {
        let url = format!(
            "{}://{}.{}:{}",
            self.config.protocol, name, self.config.host, self.config.port
        );
        info!(url = %url, "called");

        let resp = self.client.send_head(&url).await?;
        if resp.status() != StatusCode::TEMPORARY_REDIRECT {
            return Err(Error::UnexpectedStatus {
                got: resp.status().as_u16(),
                want: StatusCode::TEMPORARY_REDIRECT.as_u16(),
            }
            .into());
        }

        // e.g. https://bucket.zone.qingstor.com
        let location = resp.headers().get(LOCATION).and_then(|v| v.to_str().ok());
        match location.and_then(|l| l.split('.').nth(1)).filter(|z| !z.is_empty()) {
            Some(zone) => {
                info!(location = zone, "detected");
                Ok(zone.to_string())
            }
            None => Err(Error::MalformedRedirect(location.map(String::from)).into()),
        }
    }

    pub fn format_error(&self, op: &'static str, err: BoxError, name: &str) -> ServiceError {
        ServiceError {
            op,
            err: format_error(err),
            servicer: self.to_string(),
            name: name.to_string(),
        }
    }
}

impl Servicer for Service {
    fn get<'a>(
        &'a self,
        name: &'a str,
        pairs: &'a [Pair],
    ) -> BoxFuture<'a, Result<Box<dyn Storager>, ServiceError>> {
        Box::pin(async move {
            let mut pairs = pairs.to_vec();
            pairs.push(Pair::Name(name.to_string()));

            match self.new_storage(&pairs).await {
                Err(err) => Err(self.format_error("get", err, name)),
                Ok(store) => Ok(Box::new(store) as Box<dyn Storager>),
            }
        })
    }
}

pub struct Storage {
    bucket: Box<dyn Bucket>,
    config: Config,
    properties: Properties,

    work_dir: String,
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Storager qingstor {{Name: {}, Location: {}, WorkDir: {}}}",
            self.properties.bucket_name, self.properties.zone, self.work_dir
        )
    }
}

impl Storager for Storage {
    fn metadata(&self) -> StorageMeta {
        StorageMeta {
            name: self.properties.bucket_name.clone(),
            location: self.properties.zone.clone(),
            work_dir: self.work_dir.clone(),
        }
    }
}

impl Storage {
    pub fn bucket(&self) -> &dyn Bucket {
        self.bucket.as_ref()
    }

    /// Effective config of this storage, including per-storage overrides.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn work_dir(&self) -> &str {
        &self.work_dir
    }

    fn prefix(&self) -> &str {
        self.work_dir.strip_prefix('/').unwrap_or(&self.work_dir)
    }

    /// Logical path to the key used against the bucket.
    pub fn get_abs_path(&self, path: &str) -> String {
        format!("{}{}", self.prefix(), path)
    }

    /// Bucket key back to the logical path. Plain textual prefix removal: a
    /// logical path that itself starts with the prefix is ambiguous.
    pub fn get_rel_path<'a>(&self, path: &'a str) -> &'a str {
        path.strip_prefix(self.prefix()).unwrap_or(path)
    }

    pub fn format_error(&self, op: &'static str, err: BoxError, path: &[&str]) -> StorageError {
        StorageError {
            op,
            err: format_error(err),
            storager: self.to_string(),
            path: path.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn new_object(&self, done: bool) -> Object {
        Object::new(self, done)
    }

    pub fn format_file_object(&self, v: &KeyType) -> Object {
        let key = v.key.as_deref().unwrap_or_default();

        let mut o = self.new_object(false);
        o.id = key.to_string();
        o.name = self.get_rel_path(key).to_string();
        o.ty = ObjectType::File;

        o.set_size(v.size.unwrap_or_default());
        if let Some(t) = convert_unix_timestamp_to_time(v.modified.unwrap_or_default()) {
            o.set_updated_at(t);
        }

        if let Some(mime_type) = &v.mime_type {
            o.set_content_type(mime_type);
        }
        if let Some(value) = v.storage_class.as_deref().filter(|v| !v.is_empty()) {
            match parse_storage_class(value) {
                Some(class) => {
                    o.set_storage_class(class);
                }
                None => warn!(key = key, storage_class = value, "unrecognized storage class"),
            }
        }
        if let Some(etag) = &v.etag {
            o.set_etag(etag);
        }

        o
    }
}
