pub mod client;
pub mod http;
pub mod service;
#[cfg(test)]
pub mod simulator;
