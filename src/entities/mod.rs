pub mod category;
pub mod movie;
