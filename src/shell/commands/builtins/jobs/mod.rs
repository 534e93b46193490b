pub mod fg;
pub mod jobs;
pub mod kill;
