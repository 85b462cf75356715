pub mod category_resolver;
