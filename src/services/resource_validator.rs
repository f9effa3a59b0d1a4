use std::panic::AssertUnwindSafe;

use futures::{future::join_all, FutureExt};
use reqwest::Url;

use crate::{
    models::domain::{Resource, ValidationOutcome},
    services::{liveness::LivenessProbe, url_extraction::SearchedUrlSet},
};

/// Keeps the resources whose URL is well-formed and either appeared in the
/// search results or answers a liveness probe. Order is preserved.
pub async fn validate_resources(
    resources: Vec<Resource>,
    searched_urls: &SearchedUrlSet,
    probe: &dyn LivenessProbe,
) -> Vec<Resource> {
    if resources.is_empty() {
        return Vec::new();
    }

    let checks = resources.into_iter().map(|resource| async move {
        // A panicking check only invalidates its own resource.
        let valid = AssertUnwindSafe(check_resource(&resource, searched_urls, probe))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                log::warn!("Validation of {} panicked, treating as invalid", resource.url);
                false
            });
        ValidationOutcome { resource, valid }
    });

    join_all(checks)
        .await
        .into_iter()
        .filter(|outcome| outcome.valid)
        .map(|outcome| outcome.resource)
        .collect()
}

async fn check_resource(
    resource: &Resource,
    searched_urls: &SearchedUrlSet,
    probe: &dyn LivenessProbe,
) -> bool {
    if !has_web_scheme(&resource.url) {
        log::debug!("Rejecting malformed resource URL {}", resource.url);
        return false;
    }

    if searched_urls.contains(&resource.url) {
        return true;
    }

    probe.is_reachable(&resource.url).await
}

fn has_web_scheme(url: &str) -> bool {
    Url::parse(url)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::liveness::MockLivenessProbe;
    use crate::test_utils::fixtures::resource;

    #[actix_web::test]
    async fn empty_input_makes_no_calls() {
        let mut probe = MockLivenessProbe::new();
        probe.expect_is_reachable().never();

        let result = validate_resources(vec![], &SearchedUrlSet::default(), &probe).await;
        assert!(result.is_empty());
    }

    #[actix_web::test]
    async fn non_web_scheme_is_always_rejected() {
        let url = "ftp://files.example.com/guide.pdf";
        let mut probe = MockLivenessProbe::new();
        probe.expect_is_reachable().never();
        let searched: SearchedUrlSet = [url].into_iter().collect();

        let result = validate_resources(vec![resource(url)], &searched, &probe).await;
        assert!(result.is_empty());
    }

    #[actix_web::test]
    async fn unparseable_url_is_rejected() {
        let mut probe = MockLivenessProbe::new();
        probe.expect_is_reachable().never();

        let result =
            validate_resources(vec![resource("redis.io/docs")], &SearchedUrlSet::default(), &probe)
                .await;
        assert!(result.is_empty());
    }

    #[actix_web::test]
    async fn searched_url_skips_liveness() {
        let url = "https://redis.io/docs/";
        let mut probe = MockLivenessProbe::new();
        probe.expect_is_reachable().never();
        let searched: SearchedUrlSet = [url].into_iter().collect();

        let result = validate_resources(vec![resource(url)], &searched, &probe).await;
        assert_eq!(result, vec![resource(url)]);
    }

    #[actix_web::test]
    async fn unsearched_url_follows_liveness() {
        let mut probe = MockLivenessProbe::new();
        probe
            .expect_is_reachable()
            .times(2)
            .returning(|url| url.contains("alive"));

        let result = validate_resources(
            vec![
                resource("https://alive.example.com/a"),
                resource("https://dead.example.com/b"),
            ],
            &SearchedUrlSet::default(),
            &probe,
        )
        .await;

        assert_eq!(result, vec![resource("https://alive.example.com/a")]);
    }

    #[actix_web::test]
    async fn preserves_relative_order() {
        let mut probe = MockLivenessProbe::new();
        probe.expect_is_reachable().returning(|url| !url.ends_with("/2"));
        let searched: SearchedUrlSet = ["https://a.com/3"].into_iter().collect();

        let input = vec![
            resource("https://a.com/1"),
            resource("https://a.com/2"),
            resource("https://a.com/3"),
            resource("https://a.com/4"),
        ];

        let result = validate_resources(input, &searched, &probe).await;
        let urls: Vec<&str> = result.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.com/1", "https://a.com/3", "https://a.com/4"]);
    }

    struct PanickingProbe;

    #[async_trait::async_trait]
    impl LivenessProbe for PanickingProbe {
        async fn is_reachable(&self, url: &str) -> bool {
            if url.contains("boom") {
                panic!("probe exploded");
            }
            true
        }
    }

    #[actix_web::test]
    async fn panicking_check_does_not_abort_siblings() {
        let result = validate_resources(
            vec![
                resource("https://boom.example.com/"),
                resource("https://fine.example.com/"),
            ],
            &SearchedUrlSet::default(),
            &PanickingProbe,
        )
        .await;

        assert_eq!(result, vec![resource("https://fine.example.com/")]);
    }
}
