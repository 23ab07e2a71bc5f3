mod config;
mod describe;
mod dispose;
mod lazy;
mod loader;
mod manager;
mod refcount;
mod table;

pub use config::{ManagerConfig, ConfigError, DEFAULT_CACHE_CAPACITY};
pub use describe::{ResourceDescriptor, DeviceDescriptor};
pub use dispose::DisposeToken;
pub use error::AllocationError;
pub use lazy::LazyEvictionManager;
pub use loader::{ResourceLoader, DeviceLoader, ParentLoader};
pub use manager::ResourceManager;
pub use refcount::{ReferenceCountingManager, DeviceResourceManager, ScopedManager};
