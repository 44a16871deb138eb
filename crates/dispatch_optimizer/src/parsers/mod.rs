pub mod error;
pub mod parser;
pub mod ride_file;
pub mod solution_file;
