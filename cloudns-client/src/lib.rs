//! # cloudns-client
//!
//! Typed async client for the [ClouDNS](https://www.cloudns.net/) HTTP API.
//!
//! ## Services
//!
//! | Service | Handle | Covers |
//! |---------|--------|--------|
//! | [`AccountService`] | [`Client::account`] | login check, current IP, balance |
//! | [`ZoneService`] | [`Client::zones`] | listing, registration, activation, nameserver state |
//! | [`RecordService`] | [`Client::records`] | records, SOA, import/export, dynamic URLs |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cloudns_client::{Client, Record, RecordData};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder()
//!         .auth_sub_user_name("deploy", "secret")
//!         .build()?;
//!
//!     for zone in client.zones().list().await? {
//!         println!("{} ({:?})", zone.name, zone.zone_type);
//!     }
//!
//!     let record = Record::new(
//!         "www",
//!         3600,
//!         RecordData::A { address: "192.0.2.10".to_string() },
//!     );
//!     let created = client.records().create("example.com", &record).await?;
//!     println!("created record {:?}", created.id());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T>`](Result). Errors carry an
//! [`ErrorKind`] and may wrap a cause; use [`Error::is`] to test for a kind
//! anywhere in the chain:
//!
//! ```rust,no_run
//! # use cloudns_client::{Client, ErrorKind};
//! # async fn example(client: Client) {
//! match client.zones().get("example.com").await {
//!     Err(e) if e.is(ErrorKind::InsufficientPrivileges) => eprintln!("sub-user may not read zones"),
//!     Err(e) => eprintln!("{e}"),
//!     Ok(zone) => println!("{}", zone.name),
//! }
//! # }
//! ```
//!
//! ## Logging
//!
//! Requests and responses are logged through the [`log`] facade at `debug`
//! level with credentials replaced by `[filtered]`. Install any logger to
//! see them.

mod auth;
mod client;
mod error;
mod http_client;
mod services;
mod types;
mod utils;

pub use auth::{Auth, Credentials};
pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::{BoxError, Error, ErrorKind, Result};
pub use http_client::{HttpParams, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use services::{AccountService, RecordService, ZoneService};
pub use types::{
    DynamicUrl, Nameserver, NewZone, Record, RecordData, RecordFormat, RecordId, Soa, StatusData,
    StatusResult, WebRedirect, Zone, ZoneKind, ZoneType, ZoneUpdateStatus, ZoneUsage,
};
pub use utils::api_bool::ApiBool;
