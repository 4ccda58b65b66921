//! Prefixed, time-ordered identifiers.
//!
//! A Pika ID is a 64-bit Snowflake (42-bit signed millisecond delta from an
//! epoch, 10-bit node ID, 12-bit sequence) wrapped in a typed textual form:
//! a lower-case tag, `_`, and the URL-safe base64 of the decimal ID.
//! Prefixes registered as `secure` also mix 128 bits of random salt into
//! the payload.
//!
//! ```
//! use pika::{Pika, PikaOptions, PrefixDefinition};
//!
//! let pika = Pika::new(
//!     PikaOptions::new()
//!         .prefix(PrefixDefinition::new("user"))
//!         .prefix(PrefixDefinition::new("sk").secure(true)),
//! )
//! .unwrap();
//!
//! let user = pika.generate("user").unwrap();
//! let key = pika.generate("sk").unwrap();
//! assert_ne!(user.snowflake(), key.snowflake());
//!
//! let decoded = pika.decode(key.as_str()).unwrap();
//! assert_eq!(decoded.snowflake(), key.snowflake());
//! ```
//!
//! The generators can also be used on their own through the
//! [`PikaGenerator`] trait:
//!
//! - [`BasicPikaGenerator`]: single-threaded, infallible.
//! - [`LockPikaGenerator`]: shared across threads behind a mutex.
//!
//! ## Features
//!
//! - `parking-lot`: use `parking_lot::Mutex` instead of `std::sync::Mutex`.
//! - `cache-padded`: pad the lock generator's shared state to a cache line.
//! - `mac-address`: enable [`derive_node_id`] (when built with the feature).
//! - `instrument`: emit `trace` spans around every generator poll.

mod codec;
mod config;
mod error;
mod generator;
mod id;
#[cfg(feature = "mac-address")]
mod node;
mod rand;
mod registry;
mod time;

pub use crate::codec::*;
pub use crate::config::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
#[cfg(feature = "mac-address")]
pub use crate::node::*;
pub use crate::rand::*;
pub use crate::registry::*;
pub use crate::time::*;
