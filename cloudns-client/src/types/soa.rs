use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http_client::HttpParams;

/// SOA settings of a zone.
///
/// The serial is managed by ClouDNS and is not sent back on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Soa {
    #[serde(
        default,
        rename = "serialNumber",
        deserialize_with = "crate::utils::lenient::number"
    )]
    pub serial: u64,
    /// Primary nameserver.
    #[serde(default, rename = "primaryNS")]
    pub primary_ns: String,
    /// Responsible mailbox.
    #[serde(default, rename = "adminMail")]
    pub admin_mail: String,
    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    pub refresh: u32,
    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    pub retry: u32,
    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    pub expire: u32,
    /// TTL applied to negative answers.
    #[serde(
        default,
        rename = "defaultTTL",
        deserialize_with = "crate::utils::lenient::number"
    )]
    pub default_ttl: u32,
}

impl Soa {
    /// Parameters of `/dns/modify-soa.json`, without the zone name.
    pub(crate) fn params(&self) -> HttpParams {
        let mut params = HttpParams::new();
        params.insert("primary-ns".into(), Value::from(self.primary_ns.as_str()));
        params.insert("admin-mail".into(), Value::from(self.admin_mail.as_str()));
        params.insert("refresh".into(), Value::from(self.refresh));
        params.insert("retry".into(), Value::from(self.retry));
        params.insert("expire".into(), Value::from(self.expire));
        params.insert("default-ttl".into(), Value::from(self.default_ttl));
        params
    }
}
