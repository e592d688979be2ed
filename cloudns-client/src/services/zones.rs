use serde::Deserialize;
use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::http_client::HttpParams;
use crate::types::{Nameserver, NewZone, StatusResult, Zone, ZoneUpdateStatus, ZoneUsage};
use crate::utils::api_bool::ApiBool;

const PAGE_COUNT_URL: &str = "/dns/get-pages-count.json";
const LIST_URL: &str = "/dns/list-zones.json";
const GET_URL: &str = "/dns/get-zone-info.json";
const CREATE_URL: &str = "/dns/register.json";
const DELETE_URL: &str = "/dns/delete.json";
const TRIGGER_UPDATE_URL: &str = "/dns/update-zone.json";
const SET_ACTIVE_URL: &str = "/dns/change-status.json";
const IS_UPDATED_URL: &str = "/dns/is-updated.json";
const UPDATE_STATUS_URL: &str = "/dns/update-status.json";
const NAMESERVERS_URL: &str = "/dns/available-name-servers.json";
const USAGE_URL: &str = "/dns/get-zones-stats.json";

/// 每页最大记录数
const ROWS_PER_PAGE: u32 = 100;

/// Page count as returned by `/dns/get-pages-count.json`, a bare number or numeric string.
#[derive(Deserialize)]
#[serde(transparent)]
struct PageCount(#[serde(deserialize_with = "crate::utils::lenient::number")] u32);

/// Zone operations.
#[derive(Debug, Clone, Copy)]
pub struct ZoneService<'a> {
    client: &'a Client,
}

fn zone_params(zone: &str) -> HttpParams {
    let mut params = HttpParams::new();
    params.insert("domain-name".into(), Value::from(zone));
    params
}

impl<'a> ZoneService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// All zones of the account.
    pub async fn list(&self) -> Result<Vec<Zone>> {
        self.search(None, None).await
    }

    /// Zones matching `term` and/or belonging to `group_id`.
    ///
    /// Pages are fetched one after another. The first failing page fails the
    /// whole search.
    pub async fn search(&self, term: Option<&str>, group_id: Option<u64>) -> Result<Vec<Zone>> {
        let mut params = HttpParams::new();
        params.insert("rows-per-page".into(), Value::from(ROWS_PER_PAGE));
        if let Some(term) = term.filter(|t| !t.is_empty()) {
            params.insert("search".into(), Value::from(term));
        }
        if let Some(group_id) = group_id {
            params.insert("group-id".into(), Value::from(group_id));
        }

        let PageCount(pages) = self.client.post(PAGE_COUNT_URL, params.clone()).await?;
        log::debug!("Zone search spans {pages} page(s)");

        let mut zones = Vec::new();
        for page in 1..=pages {
            params.insert("page".into(), Value::from(page));
            let batch: Vec<Zone> = self.client.post(LIST_URL, params.clone()).await?;
            zones.extend(batch);
        }

        Ok(zones)
    }

    /// A single zone.
    pub async fn get(&self, zone: &str) -> Result<Zone> {
        self.client.post(GET_URL, zone_params(zone)).await
    }

    /// Registers a new zone.
    ///
    /// Invalid zones are rejected before anything is sent.
    pub async fn create(&self, zone: &NewZone) -> Result<StatusResult> {
        let params = zone.params()?;
        self.client.post(CREATE_URL, params).await
    }

    /// Deletes a zone with all of its records.
    pub async fn delete(&self, zone: &str) -> Result<StatusResult> {
        self.client.post(DELETE_URL, zone_params(zone)).await
    }

    /// Pushes the zone to all nameservers.
    pub async fn trigger_update(&self, zone: &str) -> Result<StatusResult> {
        self.client.post(TRIGGER_UPDATE_URL, zone_params(zone)).await
    }

    /// Enables or disables a zone.
    pub async fn set_active(&self, zone: &str, active: bool) -> Result<StatusResult> {
        let mut params = zone_params(zone);
        params.insert("status".into(), ApiBool(active).into());
        self.client.post(SET_ACTIVE_URL, params).await
    }

    /// Whether every nameserver serves the latest version of the zone.
    pub async fn is_updated(&self, zone: &str) -> Result<bool> {
        let updated: ApiBool = self.client.post(IS_UPDATED_URL, zone_params(zone)).await?;
        Ok(updated.into())
    }

    /// Update state of the zone per nameserver.
    pub async fn update_status(&self, zone: &str) -> Result<Vec<ZoneUpdateStatus>> {
        self.client.post(UPDATE_STATUS_URL, zone_params(zone)).await
    }

    pub async fn available_nameservers(&self) -> Result<Vec<Nameserver>> {
        self.client.post(NAMESERVERS_URL, HttpParams::new()).await
    }

    /// Zone count and plan limit.
    pub async fn usage(&self) -> Result<ZoneUsage> {
        self.client.post(USAGE_URL, HttpParams::new()).await
    }
}
