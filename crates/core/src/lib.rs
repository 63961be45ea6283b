pub mod application;
pub mod domain;
pub mod error;
pub mod ports;
pub mod sanitizer;
pub mod sorter;
pub mod utils;
