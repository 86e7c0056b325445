// src/crawler/datascraper.rs

use reqwest::Client;
use url::Url;

use super::PageSource;
use crate::error::FetchError;
use crate::settings::Settings;

/// Fetches review pages over HTTP with a per-request timeout.
#[derive(Clone)]
pub struct Scraper {
    client: Client,
}

impl Scraper {
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .build()?;

        Ok(Self { client })
    }
}

impl PageSource for Scraper {
    async fn fetch(
        &self,
        url: &Url,
        headers: &[(&'static str, &'static str)],
    ) -> Result<String, FetchError> {
        let mut request = self.client.get(url.clone());
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| classify(url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| classify(url, e))
    }
}

fn classify(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout { url: url.to_string() }
    } else {
        FetchError::Connection {
            url: url.to_string(),
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_default_settings() {
        assert!(Scraper::new(&Settings::default()).is_ok());
    }

    #[tokio::test]
    async fn unreachable_host_fails() {
        let settings = Settings { timeout_secs: 2, ..Settings::default() };
        let scraper = Scraper::new(&settings).unwrap();
        // Port 9 on localhost: nothing listens there in a test environment.
        let url = Url::parse("http://127.0.0.1:9/reviews").unwrap();

        let err = scraper.fetch(&url, &[]).await.unwrap_err();
        assert!(err.to_string().contains("127.0.0.1:9"), "{err}");
    }
}
