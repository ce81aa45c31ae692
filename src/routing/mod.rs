//! Routing scopes: map request paths to configured cluster targets.

pub mod table;

pub use table::RouteTable;
