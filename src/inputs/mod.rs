/// Site list input
pub mod sites;
