use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::client::Client;
use crate::error::{ErrorKind, Result};
use crate::http_client::HttpParams;
use crate::types::{
    DynamicUrl, RawRecord, Record, RecordFormat, RecordId, Soa, StatusResult, ZoneKind, ZoneType,
};
use crate::utils::api_bool::ApiBool;

const LIST_URL: &str = "/dns/records.json";
const CREATE_URL: &str = "/dns/add-record.json";
const UPDATE_URL: &str = "/dns/mod-record.json";
const DELETE_URL: &str = "/dns/delete-record.json";
const SET_ACTIVE_URL: &str = "/dns/change-record-status.json";
const SOA_URL: &str = "/dns/soa-details.json";
const UPDATE_SOA_URL: &str = "/dns/modify-soa.json";
const IMPORT_URL: &str = "/dns/records-import.json";
const EXPORT_URL: &str = "/dns/records-export.json";
const DYNAMIC_URL_URL: &str = "/dns/get-dynamic-url.json";
const CHANGE_DYNAMIC_URL_URL: &str = "/dns/change-dynamic-url.json";
const DISABLE_DYNAMIC_URL_URL: &str = "/dns/disable-dynamic-url.json";
const AVAILABLE_TTLS_URL: &str = "/dns/get-available-ttl.json";
const AVAILABLE_TYPES_URL: &str = "/dns/get-available-record-types.json";

/// Records keyed by id. An empty zone is answered with `[]`.
#[derive(Deserialize)]
#[serde(transparent)]
struct RecordListing(
    #[serde(deserialize_with = "crate::utils::lenient::object_or_empty_array")]
    BTreeMap<String, RawRecord>,
);

#[derive(Deserialize)]
struct ZoneExport {
    #[serde(default)]
    zone: String,
}

/// Record operations within a zone.
#[derive(Debug, Clone, Copy)]
pub struct RecordService<'a> {
    client: &'a Client,
}

fn zone_params(zone: &str) -> HttpParams {
    let mut params = HttpParams::new();
    params.insert("domain-name".into(), Value::from(zone));
    params
}

fn record_params(zone: &str, id: RecordId) -> HttpParams {
    let mut params = zone_params(zone);
    params.insert("record-id".into(), Value::from(id));
    params
}

impl<'a> RecordService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// All records of `zone`, ordered by id.
    pub async fn list(&self, zone: &str) -> Result<Vec<Record>> {
        self.search(zone, None, None).await
    }

    /// Records of `zone` filtered by host and/or type, ordered by id.
    ///
    /// A zone without matching records yields an empty vector.
    pub async fn search(
        &self,
        zone: &str,
        host: Option<&str>,
        record_type: Option<&str>,
    ) -> Result<Vec<Record>> {
        let mut params = zone_params(zone);
        if let Some(host) = host.filter(|h| !h.is_empty()) {
            params.insert("host".into(), Value::from(host));
        }
        if let Some(record_type) = record_type.filter(|t| !t.is_empty()) {
            params.insert("type".into(), Value::from(record_type));
        }

        let RecordListing(raw) = self.client.post(LIST_URL, params).await?;
        let mut records: Vec<Record> = raw.into_values().map(Record::from).collect();
        records.sort_by_key(|r| r.id);
        Ok(records)
    }

    /// Adds `record` to `zone`. The new id is in [`StatusResult::id`].
    pub async fn create(&self, zone: &str, record: &Record) -> Result<StatusResult> {
        let mut params = record.to_params();
        params.insert("domain-name".into(), Value::from(zone));
        self.client.post(CREATE_URL, params).await
    }

    /// Replaces record `id` with `record`.
    pub async fn update(&self, zone: &str, id: RecordId, record: &Record) -> Result<StatusResult> {
        let mut params = record.to_params();
        params.extend(record_params(zone, id));
        self.client.post(UPDATE_URL, params).await
    }

    pub async fn delete(&self, zone: &str, id: RecordId) -> Result<StatusResult> {
        self.client.post(DELETE_URL, record_params(zone, id)).await
    }

    /// Enables or disables a record.
    pub async fn set_active(&self, zone: &str, id: RecordId, active: bool) -> Result<StatusResult> {
        let mut params = record_params(zone, id);
        params.insert("status".into(), ApiBool(active).into());
        self.client.post(SET_ACTIVE_URL, params).await
    }

    /// SOA settings of `zone`.
    pub async fn soa(&self, zone: &str) -> Result<Soa> {
        self.client.post(SOA_URL, zone_params(zone)).await
    }

    /// Updates the SOA settings of `zone`.
    pub async fn update_soa(&self, zone: &str, soa: &Soa) -> Result<StatusResult> {
        let mut params = soa.params();
        params.insert("domain-name".into(), Value::from(zone));
        self.client.post(UPDATE_SOA_URL, params).await
    }

    /// Imports records from a zone file.
    ///
    /// With `delete_existing` the current records of the zone are removed first.
    pub async fn import(
        &self,
        zone: &str,
        format: RecordFormat,
        content: &str,
        delete_existing: bool,
    ) -> Result<StatusResult> {
        let mut params = zone_params(zone);
        params.insert("format".into(), Value::from(format.as_str()));
        params.insert("content".into(), Value::from(content));
        params.insert(
            "delete-existing-records".into(),
            ApiBool(delete_existing).into(),
        );
        self.client.post(IMPORT_URL, params).await
    }

    /// The zone in BIND format.
    pub async fn export(&self, zone: &str) -> Result<String> {
        let export: ZoneExport = self.client.post(EXPORT_URL, zone_params(zone)).await?;
        Ok(export.zone)
    }

    /// Dynamic DNS URL of an A or AAAA record.
    pub async fn dynamic_url(&self, zone: &str, id: RecordId) -> Result<DynamicUrl> {
        self.client
            .post(DYNAMIC_URL_URL, record_params(zone, id))
            .await
    }

    /// Replaces the dynamic DNS URL, invalidating the old one.
    pub async fn change_dynamic_url(&self, zone: &str, id: RecordId) -> Result<DynamicUrl> {
        self.client
            .post(CHANGE_DYNAMIC_URL_URL, record_params(zone, id))
            .await
    }

    pub async fn disable_dynamic_url(&self, zone: &str, id: RecordId) -> Result<StatusResult> {
        self.client
            .post(DISABLE_DYNAMIC_URL_URL, record_params(zone, id))
            .await
    }

    /// TTL values accepted for records of `zone`.
    pub async fn available_ttls(&self, zone: &str) -> Result<Vec<u32>> {
        self.client
            .post(AVAILABLE_TTLS_URL, zone_params(zone))
            .await
    }

    /// Record types that can be created in zones of this type and kind.
    ///
    /// Combinations that cannot hold records (slave zones, unknown types or
    /// kinds) fail with [`ErrorKind::IllegalArgument`] without a request.
    pub async fn available_record_types(
        &self,
        zone_type: ZoneType,
        kind: ZoneKind,
    ) -> Result<Vec<String>> {
        let category = record_type_category(zone_type, kind)?;

        let mut params = HttpParams::new();
        params.insert("zone-type".into(), Value::from(category));
        self.client.post(AVAILABLE_TYPES_URL, params).await
    }
}

/// Map a zone type and kind to the `zone-type` of the record type listing.
fn record_type_category(zone_type: ZoneType, kind: ZoneKind) -> Result<&'static str> {
    match (zone_type, kind) {
        (ZoneType::Parked, _) => Ok("parked"),
        (t, ZoneKind::Domain) if t.is_authoritative() => Ok("domain"),
        (t, k) if t.is_authoritative() && k.is_reverse() => Ok("reverse"),
        (t, k) => Err(ErrorKind::IllegalArgument.wrap(format!(
            "zone type {t:?} with kind {k:?} has no record types"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authoritative_forward_zones() {
        for t in [ZoneType::Master, ZoneType::GeoDns] {
            assert_eq!(record_type_category(t, ZoneKind::Domain).unwrap(), "domain");
        }
    }

    #[test]
    fn authoritative_reverse_zones() {
        for t in [ZoneType::Master, ZoneType::GeoDns] {
            for k in [ZoneKind::Ipv4, ZoneKind::Ipv6] {
                assert_eq!(record_type_category(t, k).unwrap(), "reverse");
            }
        }
    }

    #[test]
    fn parked_ignores_kind() {
        for k in [
            ZoneKind::Domain,
            ZoneKind::Ipv4,
            ZoneKind::Ipv6,
            ZoneKind::Unknown,
        ] {
            assert_eq!(record_type_category(ZoneType::Parked, k).unwrap(), "parked");
        }
    }

    #[test]
    fn everything_else_is_illegal() {
        let cases = [
            (ZoneType::Slave, ZoneKind::Domain),
            (ZoneType::Slave, ZoneKind::Ipv4),
            (ZoneType::Unknown, ZoneKind::Domain),
            (ZoneType::Master, ZoneKind::Unknown),
            (ZoneType::GeoDns, ZoneKind::Unknown),
        ];
        for (t, k) in cases {
            let err = record_type_category(t, k).unwrap_err();
            assert!(err.is(ErrorKind::IllegalArgument), "{t:?}/{k:?}: {err}");
        }
    }

    #[test]
    fn listing_accepts_empty_array() {
        let RecordListing(raw) = serde_json::from_str("[]").unwrap();
        assert!(raw.is_empty());
    }

    #[test]
    fn listing_decodes_object() {
        let RecordListing(raw) = serde_json::from_str(
            r#"{"5":{"id":"5","type":"A","host":"","record":"192.0.2.1","ttl":"60","status":"1"}}"#,
        )
        .unwrap();
        assert_eq!(raw.len(), 1);
    }
}
