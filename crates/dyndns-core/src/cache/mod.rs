//! Address cache implementations

pub mod file;
pub mod memory;

pub use file::FileAddressCache;
pub use memory::MemoryAddressCache;
