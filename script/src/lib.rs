//! Command-line front end: fetches proofs over JSON-RPC, pins their roots and
//! renders the walk.

pub mod bundle;
pub mod cli;
pub mod commands;
pub mod render;
pub mod rpc;
