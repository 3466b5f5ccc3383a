//! Wire transports (§1): stdio JSON-RPC loop and an HTTP axum server.
//! Both share the same tool dispatch call/return (`crate::tools::dispatch`).

pub mod http;
pub mod stdio;
