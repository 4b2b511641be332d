//! Application service: downstream service health listing.

use std::collections::BTreeMap;

use futures::future::join_all;
use nlq_common::ServiceStatus;

use crate::application::ports::HealthProbe;
use crate::domain::health::KNOWN_SERVICES;

/// Probe every known service concurrently.
///
/// Probes are independent: a slow or failing service only affects its own
/// entry.
pub async fn gather_service_status(probe: &impl HealthProbe) -> BTreeMap<String, ServiceStatus> {
    let checks = KNOWN_SERVICES.iter().map(|service| async move {
        let healthy = probe.is_healthy(service.port).await;
        (
            service.name.to_string(),
            ServiceStatus {
                port: service.port,
                healthy,
            },
        )
    });
    join_all(checks).await.into_iter().collect()
}
