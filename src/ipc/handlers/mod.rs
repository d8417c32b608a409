pub mod capture;
pub mod core;
pub mod export;
