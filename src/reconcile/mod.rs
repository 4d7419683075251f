pub mod join;
pub mod matcher;
