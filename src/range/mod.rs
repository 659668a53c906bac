pub mod range_resolver;
