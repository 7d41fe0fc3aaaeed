// ── Station fetching ──
//
// `StationSource` is the seam between the refresh cycle and the network.
// The HTTP implementation lives here; tests plug in scripted sources.

use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use chargewatch_api::StationClient;

use crate::error::FetchError;
use crate::model::{StationId, StationSnapshot};

/// Anything that can produce a fresh snapshot for one station.
///
/// Each call must reflect live state: implementations may not serve a
/// cached answer.
pub trait StationSource: Send + Sync {
    fn fetch(
        &self,
        id: &StationId,
    ) -> impl Future<Output = Result<StationSnapshot, FetchError>> + Send;
}

impl StationSource for StationClient {
    fn fetch(
        &self,
        id: &StationId,
    ) -> impl Future<Output = Result<StationSnapshot, FetchError>> + Send {
        async move {
            let info = self
                .station_info(id.as_str())
                .await
                .map_err(|e| FetchError::from_api(id.clone(), &e))?;
            debug!(station = %id, ports = info.ports().len(), "station fetched");
            Ok(StationSnapshot::from_info(id, info))
        }
    }
}

impl<S: StationSource> StationSource for Arc<S> {
    fn fetch(
        &self,
        id: &StationId,
    ) -> impl Future<Output = Result<StationSnapshot, FetchError>> + Send {
        (**self).fetch(id)
    }
}
