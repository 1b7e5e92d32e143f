//! Community ID flow hashing.
//!
//! A Community ID is a short, version-tagged fingerprint of a bidirectional network flow. Two
//! observers that capture the same flow from opposite directions compute the same value, which
//! makes it usable as a join key across independently produced logs (packet captures, IDS
//! alerts, flow records). See the [community-id-spec] for the published scheme and its baseline
//! vectors.
//!
//! [community-id-spec]: https://github.com/corelight/community-id-spec
//!
//! The crate has two halves:
//!
//! * [`FlowTuple`] holds the identifying fields of one flow as they were observed and knows how
//!   to put them into canonical order ([`FlowTuple::canonical`]).
//! * [`CommunityId`] is an immutable calculator holding a seed and an output [`Encoding`]. It
//!   hashes the canonical form of a tuple and renders it as `1:<digest>`.
//!
//! # Usage
//!
//! ```
//! use community_id::{CommunityId, FlowTuple};
//!
//! let tuple = FlowTuple::tcp("128.232.110.120", "66.35.250.204", 34855, 80).unwrap();
//! let reverse = FlowTuple::tcp("66.35.250.204", "128.232.110.120", 80, 34855).unwrap();
//!
//! let calculator = CommunityId::default();
//! assert_eq!(calculator.calc(&tuple), "1:LQU9qZlK+B5F3KDmev6m5PMibrg=");
//! assert_eq!(calculator.calc(&tuple), calculator.calc(&reverse));
//! ```

#![deny(unused_imports)]

mod calc;
mod config;
mod error;
mod icmpv4;
mod icmpv6;
mod internal_events;
mod protocol;
mod tuple;

pub use calc::{CommunityId, DIGEST_LEN, MAX_FLOW_BYTES, VERSION_PREFIX};
pub use config::{CommunityIdConfig, Encoding};
pub use error::{FlowTupleError, Result};
pub use protocol::Protocol;
pub use tuple::{CanonicalTuple, FlowAddr, FlowTuple};
