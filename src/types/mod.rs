pub mod category;
pub mod document;
pub mod payload;
pub mod row;
pub mod schema;
