pub mod aggregate;
pub mod collect;
pub mod data;
pub mod extract;
pub mod parsers;
pub mod scan;
pub mod store;
