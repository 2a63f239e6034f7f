//! Runtime-free contract for the fake traffic session: candidate targets,
//! session planning, attempt records and storage keys.
//!
//! Nothing here touches the network or the AWS SDK; the Lambda crate wires
//! these primitives to real clients.

pub mod contract;
pub mod storage_keys;
pub mod targets;
