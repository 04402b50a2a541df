//! Resource bindings, one per phpIPAM controller.
//!
//! Each binding borrows a [`crate::PhpIpamClient`] and maps domain operations
//! onto paths and verbs. Obtain them through the client accessors, e.g.
//! `client.subnets().first_free("7")`.

mod addresses;
mod devices;
mod l2domains;
mod prefix;
mod search;
mod sections;
mod subnets;
mod tools;
mod vlans;
mod vrfs;

pub use addresses::Addresses;
pub use devices::Devices;
pub use l2domains::L2Domains;
pub use prefix::Prefix;
pub use search::{Search, SearchOptions};
pub use sections::Sections;
pub use subnets::Subnets;
pub use tools::Tools;
pub use vlans::Vlans;
pub use vrfs::Vrfs;
