use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::domain::entities::dataset::Dataset;
use crate::domain::error::DataLoadError;
use crate::domain::normalize::{normalize, NormalizeOptions};
use crate::infra::cache::dataset_cache::{DatasetCache, SourceIdentity};
use crate::infra::import::csv::CsvSource;
use crate::infra::import::xlsx::XlsxSource;
use crate::usecase::ports::source::TableSource;

pub struct LoadService {
    workbook: Arc<dyn TableSource>,
    csv: Arc<dyn TableSource>,
    options: NormalizeOptions,
    cache: Arc<DatasetCache>,
}

impl LoadService {
    pub fn new(
        workbook: Arc<dyn TableSource>,
        csv: Arc<dyn TableSource>,
        options: NormalizeOptions,
        cache: Arc<DatasetCache>,
    ) -> Self {
        Self {
            workbook,
            csv,
            options,
            cache,
        }
    }

    pub fn from_config(config: &Config, cache: Arc<DatasetCache>) -> Self {
        let workbook = XlsxSource {
            sheet: config.source.sheet.clone(),
            skip_rows: config.source.skip_rows,
        };
        let csv = CsvSource {
            skip_rows: config.source.skip_rows,
            delimiter: config.source.csv_delimiter as u8,
        };
        Self::new(
            Arc::new(workbook),
            Arc::new(csv),
            config.normalize_options(),
            cache,
        )
    }

    /// Normalized dataset for `path`, served from the cache while the file is unchanged.
    pub fn load(&self, path: &Path) -> Result<Arc<Dataset>, DataLoadError> {
        let identity = SourceIdentity::of(path)?;
        self.cache
            .get_or_load(&identity, || self.load_uncached(path))
    }

    pub fn load_uncached(&self, path: &Path) -> Result<Dataset, DataLoadError> {
        info!(path = %path.display(), "loading billing source");
        let table = self.source_for(path).read_table(path)?;
        normalize(&table, &self.options)
    }

    fn source_for(&self, path: &Path) -> &dyn TableSource {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            self.csv.as_ref()
        } else {
            self.workbook.as_ref()
        }
    }
}
