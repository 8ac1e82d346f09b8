use futures::future::BoxFuture;
use reqwest::redirect::Policy;

use crate::model::{error::BoxError, pairs::HttpClientOptions};

/// Builds the client shared by the service config and location probing.
///
/// Redirects are never followed: location detection needs to see the 307 itself.
pub fn new_client(opt: &HttpClientOptions) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .connect_timeout(opt.connect_timeout)
        .timeout(opt.timeout)
        .build()
}

pub trait HeadClient: Send + Sync {
    fn send_head<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<http::Response<()>, BoxError>>;
}

impl HeadClient for reqwest::Client {
    fn send_head<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<http::Response<()>, BoxError>> {
        Box::pin(async move {
            let resp = self.head(url).send().await?;

            let mut out = http::Response::new(());
            *out.status_mut() = resp.status();
            *out.headers_mut() = resp.headers().clone();
            Ok(out)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use http::{header::LOCATION, StatusCode};
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;

    #[test]
    fn test_new_client() {
        let opt = HttpClientOptions {
            connect_timeout: Duration::from_millis(100),
            timeout: Duration::from_secs(1),
        };

        assert!(new_client(&opt).is_ok());
        assert!(new_client(&HttpClientOptions::default()).is_ok());
    }

    #[tokio::test]
    async fn test_send_head_does_not_follow_redirect() {
        let location = "https://mybucket.pek3a.qingstor.com";
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let resp = format!(
                "HTTP/1.1 307 Temporary Redirect\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                location
            );
            socket.write_all(resp.as_bytes()).await.unwrap();
            request
        });

        let client = new_client(&HttpClientOptions::default()).unwrap();
        let resp = client
            .send_head(&format!("http://{}", addr))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            resp.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some(location)
        );

        let request = server.await.unwrap();
        assert!(request.starts_with("HEAD / HTTP/1.1"), "unexpected request: {}", request);
    }
}
