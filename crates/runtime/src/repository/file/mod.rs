mod state;

pub use state::FileSessionRepository;
