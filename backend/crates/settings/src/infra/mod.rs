//! Infrastructure Layer - Repository and file store implementations

pub mod disk;
pub mod memory;
pub mod postgres;

pub use disk::DiskFileStore;
pub use memory::InMemorySettingsRepository;
pub use postgres::PgSettingsRepository;
