//! Database integration for seeding test data.
//!
//! The [`Seeder`] inserts generated fixtures through a [`FixtureStore`]:
//! [`MongoStore`] for a real server, [`MemoryStore`] for tests.

mod collections;
mod memory;
mod seeder;
mod store;

pub use collections::Collection;
pub use memory::MemoryStore;
pub use seeder::{SeedError, Seeder};
pub use store::{FixtureStore, MongoStore, favorites_update};
