use tracing::debug;

use crate::model::{
    error::Error,
    pairs::{Credential, Endpoint, HttpClientOptions, Pair},
};

#[derive(Clone, Debug)]
pub struct PairServiceNew {
    pub credential: Credential,
    pub endpoint: Option<Endpoint>,
    pub http_client_options: HttpClientOptions,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PairStorageNew {
    pub name: String,
    pub location: Option<String>,
    pub work_dir: Option<String>,
    pub disable_uri_cleaning: Option<bool>,
}

pub fn parse_pair_service_new(pairs: &[Pair]) -> Result<PairServiceNew, Error> {
    let mut credential = None;
    let mut endpoint = None;
    let mut http_client_options = None;

    for pair in pairs {
        match pair {
            Pair::Credential(v) => credential = Some(v.clone()),
            Pair::Endpoint(v) => endpoint = Some(v.clone()),
            Pair::HttpClientOptions(v) => http_client_options = Some(v.clone()),
            other => debug!(pair = other.key(), "skipped for service_new"),
        }
    }

    Ok(PairServiceNew {
        credential: credential.ok_or(Error::PairRequired("credential"))?,
        endpoint,
        http_client_options: http_client_options.unwrap_or_default(),
    })
}

pub fn parse_pair_storage_new(pairs: &[Pair]) -> Result<PairStorageNew, Error> {
    let mut name = None;
    let mut opt = PairStorageNew::default();

    for pair in pairs {
        match pair {
            Pair::Name(v) => name = Some(v.clone()),
            Pair::Location(v) => opt.location = Some(v.clone()),
            Pair::WorkDir(v) => opt.work_dir = Some(v.clone()),
            Pair::DisableUriCleaning(v) => opt.disable_uri_cleaning = Some(*v),
            other => debug!(pair = other.key(), "skipped for storage_new"),
        }
    }

    opt.name = name.ok_or(Error::PairRequired("name"))?;
    Ok(opt)
}
