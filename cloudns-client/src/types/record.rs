use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http_client::HttpParams;

/// Record identifier assigned by ClouDNS.
pub type RecordId = u64;

/// Redirect code used when none is given.
const DEFAULT_REDIRECT_TYPE: u16 = 301;

/// A record of a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Absent until the record was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Host relative to the zone, empty for the apex.
    pub host: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Whether the record is served.
    pub is_active: bool,
    /// Type-specific record data.
    pub data: RecordData,
}

/// Frame and redirect options of a web redirect record.
///
/// Framed redirects use the title, keywords and description. Plain redirects
/// use the path and redirect code instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebRedirect {
    /// Show the target inside a frame instead of redirecting.
    pub frame: bool,
    pub frame_title: String,
    pub frame_keywords: String,
    pub frame_description: String,
    /// Append the requested path to the target URL.
    pub save_path: bool,
    /// HTTP redirect code, 301 or 302.
    pub redirect_type: u16,
}

impl Default for WebRedirect {
    fn default() -> Self {
        Self {
            frame: false,
            frame_title: String::new(),
            frame_keywords: String::new(),
            frame_description: String::new(),
            save_path: false,
            redirect_type: DEFAULT_REDIRECT_TYPE,
        }
    }
}

/// Type-specific record data.
///
/// Each variant carries only the fields ClouDNS accepts for that type.
/// Types without a dedicated variant use [`RecordData::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum RecordData {
    /// IPv4 address.
    A { address: String },
    /// IPv6 address.
    AAAA { address: String },
    /// Mail exchange.
    MX { priority: u16, exchange: String },
    /// Service locator.
    SRV {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    /// Text.
    TXT { text: String },
    /// Certification authority authorization.
    CAA {
        /// 0 or 128.
        flag: u8,
        /// `issue`, `issuewild` or `iodef`.
        tag: String,
        value: String,
    },
    /// TLS certificate association.
    TLSA {
        usage: u8,
        selector: u8,
        matching_type: u8,
        /// Certificate association data, hex encoded.
        data: String,
    },
    /// SSH key fingerprint.
    SSHFP {
        algorithm: u8,
        fingerprint_type: u8,
        fingerprint: String,
    },
    /// Naming authority pointer.
    NAPTR {
        order: u16,
        preference: u16,
        flags: String,
        service: String,
        regexp: String,
        replacement: String,
    },
    /// Responsible person.
    RP { mail: String, txt: String },
    /// Web redirect, a ClouDNS extension.
    WR { url: String, redirect: WebRedirect },
    /// ALIAS (ANAME) pointing the apex at another hostname.
    ALIAS { target: String },
    /// Canonical name.
    CNAME { target: String },
    /// Delegation.
    NS { nameserver: String },
    /// Reverse pointer.
    PTR { target: String },
    /// Any other type, with its value in `record`.
    Other { record_type: String, value: String },
}

impl RecordData {
    /// The wire type tag, e.g. `"MX"`.
    pub fn record_type(&self) -> &str {
        match self {
            Self::A { .. } => "A",
            Self::AAAA { .. } => "AAAA",
            Self::MX { .. } => "MX",
            Self::SRV { .. } => "SRV",
            Self::TXT { .. } => "TXT",
            Self::CAA { .. } => "CAA",
            Self::TLSA { .. } => "TLSA",
            Self::SSHFP { .. } => "SSHFP",
            Self::NAPTR { .. } => "NAPTR",
            Self::RP { .. } => "RP",
            Self::WR { .. } => "WR",
            Self::ALIAS { .. } => "ALIAS",
            Self::CNAME { .. } => "CNAME",
            Self::NS { .. } => "NS",
            Self::PTR { .. } => "PTR",
            Self::Other { record_type, .. } => record_type,
        }
    }

    /// The main value of the record, as sent in the `record` parameter.
    ///
    /// `None` for types that do not use it (CAA, NAPTR, RP).
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::A { address } | Self::AAAA { address } => Some(address),
            Self::MX { exchange, .. } => Some(exchange),
            Self::SRV { target, .. }
            | Self::ALIAS { target }
            | Self::CNAME { target }
            | Self::PTR { target } => Some(target),
            Self::TXT { text } => Some(text),
            Self::TLSA { data, .. } => Some(data),
            Self::SSHFP { fingerprint, .. } => Some(fingerprint),
            Self::WR { url, .. } => Some(url),
            Self::NS { nameserver } => Some(nameserver),
            Self::Other { value, .. } => Some(value),
            Self::CAA { .. } | Self::NAPTR { .. } | Self::RP { .. } => None,
        }
    }

    /// Insert the type-specific parameters into `params`.
    fn write_params(&self, params: &mut HttpParams) {
        let mut put = |key: &str, value: Value| {
            params.insert(key.to_string(), value);
        };

        if let Some(value) = self.value() {
            put("record", Value::from(value));
        }

        match self {
            Self::MX { priority, .. } => put("priority", Value::from(*priority)),
            Self::SRV {
                priority,
                weight,
                port,
                ..
            } => {
                put("priority", Value::from(*priority));
                put("weight", Value::from(*weight));
                put("port", Value::from(*port));
            }
            Self::CAA { flag, tag, value } => {
                put("caa_flag", Value::from(*flag));
                put("caa_type", Value::from(tag.as_str()));
                put("caa_value", Value::from(value.as_str()));
            }
            Self::TLSA {
                usage,
                selector,
                matching_type,
                ..
            } => {
                put("tlsa_usage", Value::from(*usage));
                put("tlsa_selector", Value::from(*selector));
                put("tlsa_matching_type", Value::from(*matching_type));
            }
            Self::SSHFP {
                algorithm,
                fingerprint_type,
                ..
            } => {
                put("algorithm", Value::from(*algorithm));
                put("fptype", Value::from(*fingerprint_type));
            }
            Self::NAPTR {
                order,
                preference,
                flags,
                service,
                regexp,
                replacement,
            } => {
                put("order", Value::from(*order));
                put("pref", Value::from(*preference));
                put("flag", Value::from(flags.as_str()));
                put("params", Value::from(service.as_str()));
                put("regexp", Value::from(regexp.as_str()));
                put("replace", Value::from(replacement.as_str()));
            }
            Self::RP { mail, txt } => {
                put("mail", Value::from(mail.as_str()));
                put("txt", Value::from(txt.as_str()));
            }
            Self::WR { redirect, .. } => {
                put("frame", Value::from(u8::from(redirect.frame)));
                if redirect.frame {
                    put("frame-title", Value::from(redirect.frame_title.as_str()));
                    put("frame-keywords", Value::from(redirect.frame_keywords.as_str()));
                    put(
                        "frame-description",
                        Value::from(redirect.frame_description.as_str()),
                    );
                } else {
                    put("save-path", Value::from(u8::from(redirect.save_path)));
                    put("redirect-type", Value::from(redirect.redirect_type));
                }
            }
            Self::A { .. }
            | Self::AAAA { .. }
            | Self::TXT { .. }
            | Self::ALIAS { .. }
            | Self::CNAME { .. }
            | Self::NS { .. }
            | Self::PTR { .. }
            | Self::Other { .. } => {}
        }
    }
}

impl Record {
    /// An active record without id.
    pub fn new(host: impl Into<String>, ttl: u32, data: RecordData) -> Self {
        Self {
            id: None,
            host: host.into(),
            ttl,
            is_active: true,
            data,
        }
    }

    /// The wire type tag.
    pub fn record_type(&self) -> &str {
        self.data.record_type()
    }

    /// Parameters of `/dns/add-record.json` and `/dns/mod-record.json`,
    /// without zone name and record id.
    pub fn to_params(&self) -> HttpParams {
        let mut params = HttpParams::new();
        params.insert("record-type".into(), Value::from(self.record_type()));
        params.insert("host".into(), Value::from(self.host.as_str()));
        params.insert("ttl".into(), Value::from(self.ttl));
        params.insert("status".into(), Value::from(u8::from(self.is_active)));
        self.data.write_params(&mut params);
        params
    }
}

/// Zone file format accepted by record imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// BIND zone file.
    Bind,
    /// tinydns data file.
    TinyDns,
}

impl RecordFormat {
    /// Wire name of the format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bind => "bind",
            Self::TinyDns => "tinydns",
        }
    }
}

/// Dynamic DNS update URL of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicUrl {
    /// Host of the record.
    #[serde(default)]
    pub host: String,
    /// Calling this URL points the record at the caller's address.
    pub url: String,
}

/// A record as listed by `/dns/records.json`.
///
/// Every type-specific field is present on the wire, mostly as strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawRecord {
    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    id: u64,
    #[serde(default, deserialize_with = "crate::utils::lenient::text")]
    host: String,
    #[serde(default, deserialize_with = "crate::utils::lenient::text")]
    record: String,
    #[serde(
        default,
        rename = "type",
        alias = "record-type",
        deserialize_with = "crate::utils::lenient::text"
    )]
    record_type: String,
    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    ttl: u32,
    #[serde(default, with = "crate::utils::api_bool")]
    status: bool,

    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    priority: u16,
    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    weight: u16,
    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    port: u16,

    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    caa_flag: u8,
    #[serde(default, deserialize_with = "crate::utils::lenient::text")]
    caa_type: String,
    #[serde(default, deserialize_with = "crate::utils::lenient::text")]
    caa_value: String,

    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    tlsa_usage: u8,
    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    tlsa_selector: u8,
    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    tlsa_matching_type: u8,

    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    algorithm: u8,
    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    fptype: u8,

    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    order: u16,
    #[serde(default, deserialize_with = "crate::utils::lenient::number")]
    pref: u16,
    #[serde(default, deserialize_with = "crate::utils::lenient::text")]
    flag: String,
    #[serde(default, deserialize_with = "crate::utils::lenient::text")]
    params: String,
    #[serde(default, deserialize_with = "crate::utils::lenient::text")]
    regexp: String,
    #[serde(default, deserialize_with = "crate::utils::lenient::text")]
    replace: String,

    #[serde(default, deserialize_with = "crate::utils::lenient::text")]
    mail: String,
    #[serde(default, deserialize_with = "crate::utils::lenient::text")]
    txt: String,

    #[serde(default, with = "crate::utils::api_bool")]
    frame: bool,
    #[serde(
        default,
        alias = "frame-title",
        deserialize_with = "crate::utils::lenient::text"
    )]
    frame_title: String,
    #[serde(
        default,
        alias = "frame-keywords",
        deserialize_with = "crate::utils::lenient::text"
    )]
    frame_keywords: String,
    #[serde(
        default,
        alias = "frame-description",
        deserialize_with = "crate::utils::lenient::text"
    )]
    frame_description: String,
    #[serde(default, alias = "save-path", with = "crate::utils::api_bool")]
    save_path: bool,
    #[serde(
        default,
        alias = "redirect-type",
        deserialize_with = "crate::utils::lenient::number"
    )]
    redirect_type: u16,
}

impl RawRecord {
    fn into_data(self) -> RecordData {
        let record_type = self.record_type.trim().to_ascii_uppercase();
        match record_type.as_str() {
            "A" => RecordData::A {
                address: self.record,
            },
            "AAAA" => RecordData::AAAA {
                address: self.record,
            },
            "MX" => RecordData::MX {
                priority: self.priority,
                exchange: self.record,
            },
            "SRV" => RecordData::SRV {
                priority: self.priority,
                weight: self.weight,
                port: self.port,
                target: self.record,
            },
            "TXT" => RecordData::TXT { text: self.record },
            "CAA" => RecordData::CAA {
                flag: self.caa_flag,
                tag: self.caa_type,
                value: self.caa_value,
            },
            "TLSA" => RecordData::TLSA {
                usage: self.tlsa_usage,
                selector: self.tlsa_selector,
                matching_type: self.tlsa_matching_type,
                data: self.record,
            },
            "SSHFP" => RecordData::SSHFP {
                algorithm: self.algorithm,
                fingerprint_type: self.fptype,
                fingerprint: self.record,
            },
            "NAPTR" => RecordData::NAPTR {
                order: self.order,
                preference: self.pref,
                flags: self.flag,
                service: self.params,
                regexp: self.regexp,
                replacement: self.replace,
            },
            "RP" => RecordData::RP {
                mail: self.mail,
                txt: self.txt,
            },
            "WR" => RecordData::WR {
                url: self.record,
                redirect: WebRedirect {
                    frame: self.frame,
                    frame_title: self.frame_title,
                    frame_keywords: self.frame_keywords,
                    frame_description: self.frame_description,
                    save_path: self.save_path,
                    redirect_type: if self.redirect_type == 0 {
                        DEFAULT_REDIRECT_TYPE
                    } else {
                        self.redirect_type
                    },
                },
            },
            "ALIAS" => RecordData::ALIAS {
                target: self.record,
            },
            "CNAME" => RecordData::CNAME {
                target: self.record,
            },
            "NS" => RecordData::NS {
                nameserver: self.record,
            },
            "PTR" => RecordData::PTR {
                target: self.record,
            },
            _ => RecordData::Other {
                record_type,
                value: self.record,
            },
        }
    }
}

impl From<RawRecord> for Record {
    fn from(mut raw: RawRecord) -> Self {
        Self {
            id: (raw.id != 0).then_some(raw.id),
            host: std::mem::take(&mut raw.host),
            ttl: raw.ttl,
            is_active: raw.status,
            data: raw.into_data(),
        }
    }
}
