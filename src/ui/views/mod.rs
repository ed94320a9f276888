pub mod detail;
pub mod generate;
pub mod history;
