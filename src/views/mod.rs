pub mod components;
pub mod layout;
pub mod quiz;
pub mod session;
pub mod tip;

// Re-export commonly used functions from layout
pub use layout::page;
