//! Native pieces of the mlview CLI: a reqwest-backed transport for the
//! tracking client and terminal rendering of the dashboard tables.

pub mod table;
pub mod transport;

pub use transport::ReqwestTransport;
