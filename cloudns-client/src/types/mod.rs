//! Typed request and response models.

mod record;
mod soa;
mod status;
mod zone;

pub(crate) use record::RawRecord;
pub use record::{DynamicUrl, Record, RecordData, RecordFormat, RecordId, WebRedirect};
pub use soa::Soa;
pub use status::{StatusData, StatusResult};
pub use zone::{Nameserver, NewZone, Zone, ZoneKind, ZoneType, ZoneUpdateStatus, ZoneUsage};
