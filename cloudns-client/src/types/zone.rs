use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ErrorKind, Result};
use crate::http_client::HttpParams;

/// Zone type.
///
/// Unrecognized wire values decode to [`ZoneType::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    /// Authoritative zone hosted by ClouDNS.
    Master,
    /// Secondary zone transferred from a master server.
    Slave,
    /// Parked domain.
    Parked,
    /// Authoritative zone with GeoDNS records.
    #[serde(rename = "geodns")]
    GeoDns,
    /// Anything else.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ZoneType {
    /// Wire name, `None` for [`ZoneType::Unknown`].
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Self::Master => Some("master"),
            Self::Slave => Some("slave"),
            Self::Parked => Some("parked"),
            Self::GeoDns => Some("geodns"),
            Self::Unknown => None,
        }
    }

    /// Master and GeoDNS zones serve their own records.
    pub fn is_authoritative(self) -> bool {
        matches!(self, Self::Master | Self::GeoDns)
    }
}

/// Forward or reverse zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    /// Forward zone.
    Domain,
    /// IPv4 reverse zone.
    Ipv4,
    /// IPv6 reverse zone.
    Ipv6,
    /// Anything else.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ZoneKind {
    /// Whether this is a reverse (PTR) zone.
    pub fn is_reverse(self) -> bool {
        matches!(self, Self::Ipv4 | Self::Ipv6)
    }
}

/// A zone of the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone name, e.g. `example.com`.
    pub name: String,
    /// Zone type.
    #[serde(default, rename = "type")]
    pub zone_type: ZoneType,
    /// Zone kind.
    #[serde(default, rename = "zone")]
    pub kind: ZoneKind,
    /// Whether the zone is active.
    #[serde(default, rename = "status", with = "crate::utils::api_bool")]
    pub is_active: bool,
}

/// A zone to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewZone {
    /// Zone name.
    pub name: String,
    /// Zone type. [`ZoneType::Unknown`] is rejected.
    pub zone_type: ZoneType,
    /// Nameservers to use instead of the account defaults.
    pub nameservers: Vec<String>,
    /// Master server of a slave zone. Required for slave zones, ignored otherwise.
    pub master_ip: Option<IpAddr>,
}

impl NewZone {
    /// A master zone using the default nameservers.
    pub fn master(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            zone_type: ZoneType::Master,
            nameservers: Vec::new(),
            master_ip: None,
        }
    }

    /// A slave zone transferred from `master_ip`.
    pub fn slave(name: impl Into<String>, master_ip: IpAddr) -> Self {
        Self {
            name: name.into(),
            zone_type: ZoneType::Slave,
            nameservers: Vec::new(),
            master_ip: Some(master_ip),
        }
    }

    /// Parameters of `/dns/register.json`.
    pub(crate) fn params(&self) -> Result<HttpParams> {
        let Some(zone_type) = self.zone_type.as_str() else {
            return Err(ErrorKind::IllegalArgument.wrap(format!(
                "cannot register zone {} with unknown zone type",
                self.name
            )));
        };

        let mut params = HttpParams::new();
        params.insert("domain-name".into(), Value::from(self.name.as_str()));
        params.insert("zone-type".into(), Value::from(zone_type));
        if !self.nameservers.is_empty() {
            params.insert("ns".into(), Value::from(self.nameservers.clone()));
        }

        if self.zone_type == ZoneType::Slave {
            let Some(master_ip) = self.master_ip else {
                return Err(ErrorKind::IllegalArgument.wrap(format!(
                    "slave zone {} requires a master ip",
                    self.name
                )));
            };
            params.insert("master-ip".into(), Value::from(master_ip.to_string()));
        }

        Ok(params)
    }
}

/// Zone usage of the account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneUsage {
    /// Zones in use.
    #[serde(default, rename = "count", deserialize_with = "crate::utils::lenient::number")]
    pub current: u32,
    /// Zones allowed by the plan.
    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    pub limit: u32,
}

/// A nameserver available to the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nameserver {
    /// Nameserver class, e.g. `premium` or `free`.
    #[serde(default, rename = "type")]
    pub ns_type: String,
    /// Hostname.
    pub name: String,
    #[serde(default, deserialize_with = "crate::utils::lenient::optional_ip")]
    pub ip4: Option<IpAddr>,
    #[serde(default, deserialize_with = "crate::utils::lenient::optional_ip")]
    pub ip6: Option<IpAddr>,
    /// Location, e.g. `Germany, Frankfurt`.
    #[serde(default)]
    pub location: String,
    /// Country code of the location.
    #[serde(default)]
    pub location_cc: String,
    #[serde(default, with = "crate::utils::api_bool")]
    pub ddos_protected: bool,
}

/// Update state of one nameserver for a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneUpdateStatus {
    /// Nameserver hostname.
    pub server: String,
    #[serde(default, deserialize_with = "crate::utils::lenient::optional_ip")]
    pub ip4: Option<IpAddr>,
    #[serde(default, deserialize_with = "crate::utils::lenient::optional_ip")]
    pub ip6: Option<IpAddr>,
    /// Whether the nameserver serves the latest version of the zone.
    #[serde(default, with = "crate::utils::api_bool")]
    pub updated: bool,
}
