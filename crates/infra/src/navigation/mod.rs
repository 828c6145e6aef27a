//! Router implementations

pub mod history;

pub use history::HistoryRouter;
