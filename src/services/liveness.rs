use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Best-effort reachability signal for a URL.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LivenessProbe: Send + Sync {
    /// Never fails: any error, timeout or non-2xx status is `false`.
    async fn is_reachable(&self, url: &str) -> bool;
}

pub struct HttpLivenessProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpLivenessProbe {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl LivenessProbe for HttpLivenessProbe {
    async fn is_reachable(&self, url: &str) -> bool {
        // reqwest follows redirects by default and keeps no cookie store.
        match self.client.head(url).timeout(self.timeout).send().await {
            Ok(response) => {
                let ok = response.status().is_success();
                if !ok {
                    log::debug!("HEAD {} returned {}", url, response.status());
                }
                ok
            }
            Err(err) => {
                log::debug!("HEAD {} failed: {}", url, err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn unreachable_host_is_not_live() {
        let probe = HttpLivenessProbe::new(reqwest::Client::new(), Duration::from_millis(500));

        assert!(!probe.is_reachable("http://127.0.0.1:1/").await);
    }

    #[actix_web::test]
    async fn unparseable_url_is_not_live() {
        let probe = HttpLivenessProbe::new(reqwest::Client::new(), Duration::from_millis(500));

        assert!(!probe.is_reachable("not a url").await);
    }
}
