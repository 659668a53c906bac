pub mod resolution_selector;
