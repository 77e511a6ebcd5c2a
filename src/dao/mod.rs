/// Startup connection helpers shared by the backends.
pub mod connection;
/// Database model definitions.
pub mod models;
/// Player persistence gateway and its backends.
pub mod player_store;
/// Storage abstraction layer for database operations.
pub mod storage;
