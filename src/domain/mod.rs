pub mod error;
pub mod feedback;
pub mod report;
pub mod sentiment;
pub mod settings;
