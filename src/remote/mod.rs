pub mod memory;

pub use memory::MemoryRemote;
