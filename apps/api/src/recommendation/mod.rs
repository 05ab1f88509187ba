// Recommendation engine: catalog filtering, prompt construction, resilient
// oracle-output parsing, program matching, and assembly.
// All oracle calls go through the `oracle` module — no direct API calls here.

pub mod assembler;
pub mod catalog_filter;
pub mod handlers;
pub mod matcher;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod similarity;
