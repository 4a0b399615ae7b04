// Lookup tables mapping small raw codes to named values
// Unmapped raw values never fail; they map to an explicit UNKNOWN entry.

pub mod data_unit;
pub mod opcode;
pub mod response;
pub mod service;
pub mod vendor;

pub use data_unit::DataUnitId;
pub use opcode::{InboundOpcode, Opcode};
pub use response::{DenyReason, Response};
pub use service::{ServiceClass, ServiceOptions};
pub use vendor::Vendor;
