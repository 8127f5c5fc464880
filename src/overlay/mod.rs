pub mod scheduler;
pub mod window;
