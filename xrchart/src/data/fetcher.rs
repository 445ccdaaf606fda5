use std::sync::Arc;

use crate::error::XrChartError;

/// Retrieves the raw bytes of a remote (http/https) data source
pub trait DataFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, XrChartError>;
}

pub fn is_remote_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

pub fn make_data_fetcher() -> Result<Arc<dyn DataFetcher>, XrChartError> {
    cfg_if::cfg_if! {
        if #[cfg(feature = "reqwest")] {
            Ok(Arc::new(crate::data::reqwest_fetcher::ReqwestDataFetcher::try_new()?))
        } else {
            Err(XrChartError::DataError(
                "Fetching remote data requires the reqwest feature flag".to_string()
            ))
        }
    }
}
