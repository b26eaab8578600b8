// Page retrieval and description extraction.

pub mod extract;
pub mod fetcher;
