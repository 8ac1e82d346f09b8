use std::{fmt, time::Duration};

use crate::model::error::Error;

/// A single configuration option handed to the constructors.
#[derive(Clone, Debug)]
pub enum Pair {
    Credential(Credential),
    Endpoint(Endpoint),
    HttpClientOptions(HttpClientOptions),
    Name(String),
    Location(String),
    WorkDir(String),
    DisableUriCleaning(bool),
}

impl Pair {
    pub fn key(&self) -> &'static str {
        match self {
            Pair::Credential(_) => "credential",
            Pair::Endpoint(_) => "endpoint",
            Pair::HttpClientOptions(_) => "http_client_options",
            Pair::Name(_) => "name",
            Pair::Location(_) => "location",
            Pair::WorkDir(_) => "work_dir",
            Pair::DisableUriCleaning(_) => "disable_uri_cleaning",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialProtocol {
    Hmac,
    ApiKey,
    File,
    Env,
    Base64,
}

impl CredentialProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialProtocol::Hmac => "hmac",
            CredentialProtocol::ApiKey => "apikey",
            CredentialProtocol::File => "file",
            CredentialProtocol::Env => "env",
            CredentialProtocol::Base64 => "base64",
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    protocol: CredentialProtocol,
    args: Vec<String>,
}

impl Credential {
    pub fn new(protocol: CredentialProtocol, args: Vec<String>) -> Self {
        Self { protocol, args }
    }

    pub fn hmac(access_key: &str, secret_key: &str) -> Self {
        Self::new(
            CredentialProtocol::Hmac,
            vec![access_key.to_string(), secret_key.to_string()],
        )
    }

    /// Parses `<protocol>:<value>`, e.g. `hmac:access_key:secret_key`.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let invalid = |reason: String| Error::PairInvalid {
            name: "credential",
            reason,
        };

        let (protocol, value) = s
            .split_once(':')
            .ok_or_else(|| invalid(format!("missing protocol in {:?}", redact(s))))?;

        let cred = match protocol {
            "hmac" => {
                let (ak, sk) = value
                    .split_once(':')
                    .ok_or_else(|| invalid("hmac requires access_key:secret_key".to_string()))?;
                Self::hmac(ak, sk)
            }
            "apikey" => Self::new(CredentialProtocol::ApiKey, vec![value.to_string()]),
            "file" => Self::new(CredentialProtocol::File, vec![value.to_string()]),
            "env" => Self::new(CredentialProtocol::Env, vec![]),
            "base64" => Self::new(CredentialProtocol::Base64, vec![value.to_string()]),
            other => return Err(invalid(format!("unknown protocol {}", other))),
        };

        Ok(cred)
    }

    pub fn protocol(&self) -> CredentialProtocol {
        self.protocol
    }

    pub fn value(&self) -> &[String] {
        &self.args
    }
}

fn redact(s: &str) -> String {
    match s.split_once(':') {
        Some((protocol, _)) => format!("{}:***", protocol),
        None => "***".to_string(),
    }
}

// Keep secrets out of logs and InitError output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("protocol", &self.protocol.as_str())
            .field("args", &"***")
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Protocol::Http => 80,
            Protocol::Https => 443,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub protocol: Protocol,
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// Parses `<http|https>:<host>[:<port>]`.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let invalid = |reason: String| Error::PairInvalid {
            name: "endpoint",
            reason,
        };

        let (protocol, rest) = s
            .split_once(':')
            .ok_or_else(|| invalid(format!("missing protocol in {}", s)))?;

        let protocol = match protocol {
            "http" => Protocol::Http,
            "https" => Protocol::Https,
            other => return Err(invalid(format!("unknown protocol {}", other))),
        };

        let (host, port) = match rest.split_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|err| invalid(format!("bad port {}: {}", port, err)))?;
                (host, port)
            }
            None => (rest, protocol.default_port()),
        };

        if host.is_empty() {
            return Err(invalid(format!("empty host in {}", s)));
        }

        Ok(Self {
            protocol,
            host: host.to_string(),
            port,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpClientOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for HttpClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(30),
        }
    }
}
