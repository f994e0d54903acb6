pub mod header;
pub mod pagination;
pub mod sort_header;
