//! Decode nested values from flat environment variables
//!
//! `nestenv` rebuilds arbitrarily nested Rust values (structs, vectors, arrays,
//! maps and optional values) from a flat set of environment variables. The
//! position of a value in the structure is encoded in the variable name:
//! segments are joined by a separator, sequence elements are addressed by their
//! index and map entries by their key.
//!
//! # Features
//!
//! - **Declarative**: `#[derive(Decode)]` on structs with named fields
//! - **Nested**: structs, `Vec`, arrays, `HashMap`/`BTreeMap`, `Option`, `Box`
//! - **Case policies**: look names up as written, upper-cased or lower-cased
//! - **Expansion**: `$VAR` and `${VAR}` references in string values are expanded
//! - **Custom deserializers**: `#[env(deserializer = "serde_json::from_str")]`
//!
//! # Naming
//!
//! With prefix `ACME` and separator `_`:
//!
//! | Value                                | Variable              |
//! |--------------------------------------|-----------------------|
//! | field `Port`                         | `ACME_Port`           |
//! | field `Inner` of struct field `Db`   | `ACME_Db_Inner`       |
//! | element 2 of sequence field `Hosts`  | `ACME_Hosts_2`        |
//! | entry `eu` of map field `Regions`    | `ACME_Regions_eu`     |
//! | field `Addr` of map entry `eu`       | `ACME_Regions_eu_Addr`|
//!
//! Sequence elements and map entries that are structs start a fresh name path
//! below their index or key. The case policy is applied to the whole name, the
//! prefix included.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use nestenv::{Decode, FromEnv, Namespace};
//!
//! #[derive(Debug, Default, Decode)]
//! struct NetCnf {
//!     addr: String,
//!     https: bool,
//! }
//!
//! #[derive(Debug, Default, Decode)]
//! #[env(prefix = "acme", case = "upper")]
//! struct Config {
//!     name: String,
//!     ports: Vec<u16>,
//!     listen: HashMap<String, NetCnf>,
//!     timeout: Option<u64>,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let env = Namespace::from_iter([
//!     ("ACME_NAME", "coyote"),
//!     ("ACME_PORTS_0", "80"),
//!     ("ACME_PORTS_1", "443"),
//!     ("ACME_LISTEN_PUBLIC_ADDR", "0.0.0.0:443"),
//!     ("ACME_LISTEN_PUBLIC_HTTPS", "true"),
//!     ("ACME_TIMEOUT", "30"),
//! ]);
//! let config = Config::from_namespace(&env)?;
//! assert_eq!(config.name, "coyote");
//! assert_eq!(config.ports, [80, 443]);
//! assert!(config.listen["PUBLIC"].https);
//! assert_eq!(config.timeout, Some(30));
//! #     Ok(())
//! # }
//! ```
//!
//! Every field is required. An unset variable fails with
//! [`DecodeError::MissingKey`]; fields decoded before the failure keep their
//! values.
//!
//! Values start from [`Decode::placeholder`], so neither the struct nor leaf
//! types such as `std::net::IpAddr` need a `Default` impl.
//!
//! # Attributes
//!
//! ## `#[env(prefix = "..", separator = "..", case = "..")]`
//!
//! Struct-level settings used by [`FromEnv::from_env`]. `case` is one of
//! `none` (default), `upper` or `lower`; `separator` defaults to `_`.
//!
//! ## `#[env(name = "CUSTOM_NAME")]`
//!
//! Name segment of the field, instead of the field's identifier.
//!
//! ```rust
//! # use nestenv::{Decode, FromEnv, Namespace};
//! #[derive(Default, Decode)]
//! struct Config {
//!     #[env(name = "REDIS_URL")]
//!     redis_connection_string: String,
//! }
//! # let env = Namespace::from_iter([("REDIS_URL", "redis://localhost")]);
//! # let config = Config::from_namespace(&env).unwrap();
//! # assert_eq!(config.redis_connection_string, "redis://localhost");
//! ```
//!
//! ## `#[env(skip)]`
//!
//! The field is left untouched.
//!
//! ## `#[env(deserializer = "function")]`
//!
//! Parse the field from a single variable with a `fn(&str) -> Result<T, E>`.
//!
//! ```rust
//! # use nestenv::{Decode, FromEnv, Namespace};
//! #[derive(Default, Decode)]
//! struct Config {
//!     #[env(deserializer = "serde_json::from_str")]
//!     tags: Vec<String>,
//! }
//! # let env = Namespace::from_iter([("tags", r#"["a", "b"]"#)]);
//! # let config = Config::from_namespace(&env).unwrap();
//! # assert_eq!(config.tags, ["a", "b"]);
//! ```
//!
//! Only structs with named fields can be derived:
//!
//! ```compile_fail
//! #[derive(nestenv::Decode)]
//! enum Mode {
//!     Fast,
//!     Slow,
//! }
//! ```

#[doc(hidden)]
pub mod de;

mod decoder;
mod error;
mod impls;
mod name;
mod namespace;
mod shape;

pub use decoder::{decode, decode_named, Decoder, FromEnv, DEFAULT_MAX_DEPTH};
pub use error::DecodeError;
pub use name::{resolve, Case};
pub use namespace::{Iter, Namespace};
pub use nestenv_derive::Decode;
pub use shape::{
    Decode, FillElement, FillSlot, Float, Int, LeafTarget, MappingTarget, PointerTarget, RecordTarget,
    SequenceTarget, Shape, Target, Uint,
};
