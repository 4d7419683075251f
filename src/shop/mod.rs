pub mod orders;
pub mod page;
pub mod parser;
#[cfg(test)]
pub mod simulator;
