pub mod replica;

pub use replica::PostgresReplicaRepository;
