use crate::{
    config::{DashboardConfig, DataSourceKind},
    domain::{
        CalendarEvent, Equipment, EquipmentId, MaintenanceRequest, NewRequest, RequestFilter,
        RequestId, RequestStatus,
    },
    error::Result,
};
use async_trait::async_trait;
use std::sync::Arc;

pub mod mock;

#[cfg(feature = "http-source")]
pub mod http;

pub use mock::MockDataSource;

#[cfg(feature = "http-source")]
pub use http::HttpDataSource;

/// Where the dashboard reads requests, equipment and the calendar from,
/// and where status changes are sent.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Lists maintenance requests matching the filter
    async fn list_requests(&self, filter: &RequestFilter) -> Result<Vec<MaintenanceRequest>>;

    /// Moves a request to a new status.
    ///
    /// Callers must only invoke this for transitions the guard accepted.
    async fn update_request_status(&self, id: RequestId, status: RequestStatus) -> Result<()>;

    /// Creates a request; the returned request carries its server-assigned id
    async fn create_request(&self, request: &NewRequest) -> Result<MaintenanceRequest>;

    /// Lists all equipment
    async fn list_equipment(&self) -> Result<Vec<Equipment>>;

    /// Lists the maintenance history of one piece of equipment
    async fn equipment_requests(&self, id: EquipmentId) -> Result<Vec<MaintenanceRequest>>;

    /// Lists scheduled preventive maintenance
    async fn list_calendar(&self) -> Result<Vec<CalendarEvent>>;
}

/// Builds the data source selected by the configuration
pub async fn connect(config: &DashboardConfig) -> Result<Arc<dyn DataSource>> {
    match config.data_source {
        DataSourceKind::Mock => {
            let source = match &config.fixture_path {
                Some(path) => MockDataSource::from_json_file(path).await?,
                None => MockDataSource::seeded(),
            };
            tracing::info!(fixture = ?config.fixture_path, "Using mock data source");
            Ok(Arc::new(source))
        }
        #[cfg(feature = "http-source")]
        DataSourceKind::Live => {
            let source = HttpDataSource::new(&config.api_base_url, config.request_timeout())?;
            tracing::info!(base_url = %config.api_base_url, "Using live data source");
            Ok(Arc::new(source))
        }
        #[cfg(not(feature = "http-source"))]
        DataSourceKind::Live => Err(crate::error::GearGuardError::ConfigError(
            "live data source requires the http-source feature".to_string(),
        )),
    }
}
