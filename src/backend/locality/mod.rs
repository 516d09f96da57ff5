//! Network Locality Module
//!
//! Works out whether a client that reached the server by name is actually on
//! the same LAN, so the UI can offer the direct `http://<lan-ip>:<port>` URL.
//!
//! - **`address`** - Pure IP and header helpers (private ranges, CDN-internal
//!   block, `Host` parsing, client IP for file records)
//! - **`discovery`** - Ordered strategy chain for the server's LAN address
//! - **`probe`** - Reachability check of the discovered address
//! - **`classifier`** - Builds the `LocalitySignal` for one request

pub mod address;
pub mod classifier;
pub mod discovery;
pub mod probe;

pub use address::client_ip;
pub use classifier::{LocalityRequest, LocalityService, LocalitySignal};
pub use discovery::{AddressDiscovery, AddressStrategy, ServerAddress};
pub use probe::{FixedProbe, HttpProbe, ReachabilityProbe};
