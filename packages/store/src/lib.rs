// ABOUTME: Central state store for Crewboard
// ABOUTME: One snapshot, a closed mutation vocabulary, and a pure reducer over it

pub mod mutation;
pub mod state;
pub mod store;

pub use mutation::Mutation;
pub use state::AppState;
pub use store::Store;
