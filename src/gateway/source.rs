use async_trait::async_trait;

use super::error::Result;
use crate::model::provider::{ProviderMatch, ProviderPlayer, ProviderSeries, SeriesBundle};

/// Trait that every cricket-data source must implement.
///
/// This is the seam between the page controllers and the concrete HTTP
/// client, so controllers can be exercised against a stub.
#[async_trait]
pub trait CricketDataSource: Send + Sync {
    /// All matches currently known to the provider (live, upcoming, recent).
    async fn current_matches(&self) -> Result<Vec<ProviderMatch>>;

    async fn match_info(&self, id: &str) -> Result<ProviderMatch>;

    async fn series_list(&self) -> Result<Vec<ProviderSeries>>;

    /// Series record plus its full match list.
    async fn series_info(&self, id: &str) -> Result<SeriesBundle>;

    /// Paginated player directory.
    async fn player_list(&self, offset: u32) -> Result<Vec<ProviderPlayer>>;

    async fn player_info(&self, id: &str) -> Result<ProviderPlayer>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
