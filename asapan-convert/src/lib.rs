//! Cisco ASA to Palo Alto Networks policy conversion.
//!
//! The library turns ASA configuration lines (network objects, object-groups and
//! access-lists) into either PAN-OS `set` commands or a Panorama XML document.
//!
//! # Architecture
//!
//! Data flows one way: raw lines → [`objects::ObjectTable`] → numbered
//! [`rule::Rule`] records → rendered output.
//!
//! - [`address`]: address/mask normalization to `network/prefix`
//! - [`objects`]: object and object-group table
//! - [`rule`]: access-list line parsing
//! - [`render`]: the `set` command and Panorama XML renderers
//! - [`convert`]: the pipeline, including the malformed-line policy
//! - [`config`]: optional TOML settings file
//! - [`summary`]: per-run counts
//!
//! # Examples
//!
//! ```
//! use asapan_convert::convert::{convert, ConvertOptions};
//!
//! let lines = [
//!     "object network WEBSRV",
//!     " host 10.0.0.5",
//!     "access-list test extended permit tcp object WEBSRV any eq 443",
//! ];
//! let conversion = convert(&lines, &ConvertOptions::default()).unwrap();
//! let text = String::from_utf8(conversion.output).unwrap();
//! assert!(text.contains("set rulebase security rules test_1 service tcp-443"));
//! ```

pub mod address;
pub mod config;
pub mod convert;
pub mod objects;
pub mod render;
pub mod rule;
pub mod summary;
