pub mod exec;
pub mod repl;
pub mod restore;
