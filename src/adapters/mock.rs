use std::sync::Mutex;

use futures::future::{self, BoxFuture};
use http::{header::LOCATION, HeaderValue, StatusCode};

use crate::{
    model::{
        error::BoxError,
        qingstor::{Bucket, Config, Properties, Service},
    },
    util::httpclient::HeadClient,
};

pub struct MockService {
    pub config: Config,
    pub buckets: Mutex<Vec<(String, String)>>,
}

impl MockService {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            buckets: Mutex::new(Vec::new()),
        }
    }
}

impl Service for MockService {
    fn bucket(&self, name: &str, zone: &str) -> Result<Box<dyn Bucket>, BoxError> {
        self.buckets
            .lock()
            .expect("failed to acquire `buckets` guard")
            .push((name.to_string(), zone.to_string()));

        Ok(Box::new(MockBucket {
            config: self.config.clone(),
            properties: Properties {
                bucket_name: name.to_string(),
                zone: zone.to_string(),
            },
        }))
    }
}

pub struct MockBucket {
    pub config: Config,
    pub properties: Properties,
}

impl Bucket for MockBucket {
    fn config(&self) -> &Config {
        &self.config
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }
}

pub enum MockHead {
    Respond {
        status: StatusCode,
        location: Option<&'static str>,
    },
    Fail(&'static str),
}

pub struct MockHeadClient {
    pub head: MockHead,
    pub urls: Mutex<Vec<String>>,
}

impl MockHeadClient {
    pub fn new(head: MockHead) -> Self {
        Self {
            head,
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn redirect(location: &'static str) -> Self {
        Self::new(MockHead::Respond {
            status: StatusCode::TEMPORARY_REDIRECT,
            location: Some(location),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.urls
            .lock()
            .expect("failed to acquire `urls` guard")
            .clone()
    }
}

impl HeadClient for MockHeadClient {
    fn send_head<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<http::Response<()>, BoxError>> {
        self.urls
            .lock()
            .expect("failed to acquire `urls` guard")
            .push(url.to_string());

        let result = match &self.head {
            MockHead::Respond { status, location } => {
                let mut resp = http::Response::new(());
                *resp.status_mut() = *status;
                if let Some(location) = location {
                    resp.headers_mut()
                        .insert(LOCATION, HeaderValue::from_static(*location));
                }
                Ok(resp)
            }
            MockHead::Fail(msg) => Err(BoxError::from(*msg)),
        };

        Box::pin(future::ready(result))
    }
}
