//! Adapters - concrete implementations of ports (traits)

pub mod json;
mod memory_store;
mod settings_store;

#[cfg(test)]
pub mod fake_device;

pub use memory_store::MemoryStore;
pub use settings_store::SettingsStore;
