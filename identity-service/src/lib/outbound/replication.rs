pub mod client;

pub use client::HttpProfileReplicator;
