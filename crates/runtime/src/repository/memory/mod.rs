mod state;

pub use state::InMemorySessionRepository;
