//! A fixed capacity key to value map using open addressing, linear probing and tombstone
//! deletion, plus a coarse locked wrapper and a small line shell to drive it.

pub mod error;
pub mod hash;
pub mod hashmap;
pub mod options;
pub mod session;
pub mod shared_hashmap;
pub mod shell;
pub mod stats;

pub use error::{MapError, OptionError};
pub use hashmap::{OpenAddressingMap, DEFAULT_CAPACITY};
pub use options::MapOptions;
pub use shared_hashmap::{SharedHashMap, SharedMap};
pub use stats::MapStats;
