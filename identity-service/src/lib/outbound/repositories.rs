pub mod identity;

pub use identity::PostgresIdentityStore;
