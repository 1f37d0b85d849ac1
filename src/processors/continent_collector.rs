use crate::error::{ImportError, Result};
use crate::lookup::{GeonameLookup, LookupResponse};
use crate::models::{continent_code, ContinentMap, ServiceStatus};
use crate::utils::constants::STATUS_ACCOUNT_EXHAUSTED;
use crate::utils::ProgressReporter;
use tracing::{info, warn};

/// Look up every id in order and gather the continents keyed by code.
///
/// Stops at the first transport error or refused account; nothing is
/// returned for a partial batch.
pub async fn collect_continents<L: GeonameLookup>(
    lookup: &L,
    geoname_ids: &[u32],
    progress: &ProgressReporter,
) -> Result<ContinentMap> {
    let mut continents = ContinentMap::new();

    for (index, &geoname_id) in geoname_ids.iter().enumerate() {
        progress.set_message(&format!(
            "Looking up continent {}/{} (geonameId {})",
            index + 1,
            geoname_ids.len(),
            geoname_id
        ));
        let response = lookup.lookup(geoname_id).await?;
        continents = absorb_continent(continents, geoname_id, response)?;
    }

    Ok(continents)
}

/// Add one lookup reply to `continents`.
///
/// A status value of 10 means the account cannot be used and aborts the
/// batch. Failed HTTP replies are dropped. A successful reply must carry a
/// `continentCode`.
pub fn absorb_continent(
    mut continents: ContinentMap,
    geoname_id: u32,
    response: LookupResponse,
) -> Result<ContinentMap> {
    if let Some(status) = ServiceStatus::from_payload(&response.payload) {
        if status.value == Some(STATUS_ACCOUNT_EXHAUSTED) {
            return Err(ImportError::AccountStatus {
                value: STATUS_ACCOUNT_EXHAUSTED,
                message: status.message,
            });
        }
    }

    if !response.success {
        warn!(geoname_id, status = response.status_code, "Lookup failed, skipping continent");
        return Ok(continents);
    }

    let code = continent_code(&response.payload)
        .ok_or_else(|| {
            ImportError::MissingData(format!("continentCode in response for geonameId {}", geoname_id))
        })?
        .to_string();

    info!(geoname_id, continent = %code, "Fetched continent");
    continents.insert(code, response.payload);
    Ok(continents)
}
