pub mod error;
pub mod exercises;
pub mod interact;
pub mod notify;
pub mod overlay;
pub mod scheduler;
pub mod settings;
pub mod storage;
