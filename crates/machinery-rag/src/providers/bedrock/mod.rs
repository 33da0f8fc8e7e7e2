//! AWS Bedrock provider implementations
//!
//! - Bedrock runtime `invoke_model` for classification and answer generation
//! - Bedrock agent runtime `retrieve` for knowledge base search
//!
//! Both clients are built from one `SdkConfig`, so requests are SigV4-signed with whatever
//! the standard AWS credential chain resolves (environment, shared profile, SSO, instance
//! or task role).

mod knowledge_base;
mod runtime;

pub use knowledge_base::BedrockKnowledgeBaseClient;
pub use runtime::BedrockRuntimeClient;

use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::time::Duration;

use crate::config::BedrockConfig;

/// Resolve region, credentials and timeouts for the Bedrock clients
pub async fn load_sdk_config(config: &BedrockConfig, timeout: Duration) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build())
        .load()
        .await
}

#[cfg(test)]
pub(crate) mod test_support {
    use aws_config::{BehaviorVersion, Region, SdkConfig};
    use aws_credential_types::provider::SharedCredentialsProvider;
    use aws_credential_types::Credentials;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// SDK config with static test credentials, or none at all
    pub fn sdk_config(with_credentials: bool) -> SdkConfig {
        let mut builder = SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"));
        if with_credentials {
            builder = builder.credentials_provider(SharedCredentialsProvider::new(
                Credentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI", None, None, "test"),
            ));
        }
        builder.build()
    }

    /// Accept one connection, answer it with `body` as JSON and return the raw request
    pub async fn serve_once(body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];

            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);

                if let Some(head_end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&request[..head_end]).to_lowercase();
                    let length = head
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= head_end + 4 + length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            String::from_utf8_lossy(&request).into_owned()
        });

        (endpoint, handle)
    }
}
