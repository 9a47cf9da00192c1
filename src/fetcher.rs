use std::time::Duration;

use reqwest::blocking::Client;

pub const BASE_URL: &str = "https://db.ygoprodeck.com/api/v7/cardinfo.php";
pub const AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36 Edg/135.0.0.0";

const TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub url: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: BASE_URL.to_string(),
            user_agent: AGENT.to_string(),
            connect_timeout: TIMEOUT,
            timeout: TIMEOUT,
        }
    }
}

// Not URL-encoded.
#[allow(dead_code)]
pub fn url_by_archetype(archetype: &str) -> String {
    format!("{}?archetype={}", BASE_URL, archetype)
}

pub fn build_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .connect_timeout(config.connect_timeout)
        .timeout(config.timeout)
        .build()
}

pub fn fetch_body(client: &Client, url: &str) -> Result<String, reqwest::Error> {
    let response = client.get(url).send()?;
    log::debug!("GET {} -> {}", url, response.status());
    response.text()
}
