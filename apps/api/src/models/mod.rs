pub mod assessment;
pub mod catalog;
pub mod recommendation;
