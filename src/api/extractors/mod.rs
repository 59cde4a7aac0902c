pub mod payload;
pub mod visitor;
