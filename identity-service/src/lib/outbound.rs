pub mod replication;
pub mod repositories;
