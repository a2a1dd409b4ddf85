pub mod bootstrap;
pub mod host;
