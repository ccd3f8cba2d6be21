//! The season summary pipeline: demo shortcut, id parsing, cache, then
//! aggregate, derive and validate.

use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::aggregator::SeasonAggregator;
use crate::cache::TtlCache;
use crate::client::FplClient;
use crate::config::AppConfig;
use crate::demo;
use crate::error::{FplError, Result};
use crate::model::{DerivedSeasonSummary, ManagerId};
use crate::stats::derive_summary;
use crate::validation::validate_and_repair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum CacheStatus {
    Hit,
    Miss,
}

/// Where a served summary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum DataSource {
    #[strum(serialize = "FPL_API")]
    FplApi,
    #[strum(serialize = "CACHE")]
    Cache,
    #[strum(serialize = "DEMO")]
    Demo,
}

#[derive(Debug, Clone)]
pub struct ServedSummary {
    pub summary: DerivedSeasonSummary,
    pub cache: CacheStatus,
    pub source: DataSource,
    pub quality_score: u8,
}

#[derive(Debug, Clone)]
struct CachedSummary {
    summary: DerivedSeasonSummary,
    quality_score: u8,
}

/// Cheap to clone; clones share the cache.
#[derive(Debug, Clone)]
pub struct SeasonService {
    aggregator: SeasonAggregator,
    cache: TtlCache<ManagerId, CachedSummary>,
    ttl: Duration,
}

impl SeasonService {
    pub fn new(aggregator: SeasonAggregator, ttl: Duration) -> Self {
        Self {
            aggregator,
            cache: TtlCache::new(),
            ttl,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = FplClient::from_config(&config.upstream, &config.retry)?;
        let aggregator = SeasonAggregator::new(client, &config.pipeline);
        Ok(Self::new(aggregator, config.cache.ttl()))
    }

    /// Build, or fetch from cache, the summary for a raw manager id as typed
    /// by a user.
    #[instrument(skip(self))]
    pub async fn summary(&self, raw_id: &str) -> Result<ServedSummary> {
        if demo::is_demo_id(raw_id) {
            info!("serving demo season");
            return Ok(ServedSummary {
                summary: demo::demo_summary(),
                cache: CacheStatus::Miss,
                source: DataSource::Demo,
                quality_score: 100,
            });
        }

        let manager: ManagerId = raw_id.parse()?;

        if let Some(cached) = self.cache.get(&manager).await {
            info!(%manager, "serving cached season");
            return Ok(ServedSummary {
                summary: cached.summary,
                cache: CacheStatus::Hit,
                source: DataSource::Cache,
                quality_score: cached.quality_score,
            });
        }

        let bundle = self.aggregator.collect(manager).await?;
        let (summary, report) = validate_and_repair(derive_summary(&bundle));
        if !report.is_valid() {
            warn!(%manager, errors = ?report.errors, "summary still invalid after sanitizing");
            return Err(FplError::Processing {
                errors: report.errors,
            });
        }
        if !report.warnings.is_empty() {
            info!(%manager, warnings = ?report.warnings, "summary passed with warnings");
        }

        self.cache
            .set(
                manager,
                CachedSummary {
                    summary: summary.clone(),
                    quality_score: report.score,
                },
                self.ttl,
            )
            .await;
        info!(%manager, score = report.score, "built season summary");

        Ok(ServedSummary {
            summary,
            cache: CacheStatus::Miss,
            source: DataSource::FplApi,
            quality_score: report.score,
        })
    }
}
