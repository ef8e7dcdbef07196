pub mod parser;
pub mod search_path;
