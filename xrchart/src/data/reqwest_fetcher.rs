use reqwest::blocking::{Client, ClientBuilder};

use crate::data::fetcher::DataFetcher;
use crate::error::XrChartError;

static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ReqwestDataFetcher {
    client: Client,
}

impl ReqwestDataFetcher {
    pub fn try_new() -> Result<Self, XrChartError> {
        Ok(Self {
            client: ClientBuilder::new().user_agent(USER_AGENT).build()?,
        })
    }
}

impl DataFetcher for ReqwestDataFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, XrChartError> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}
