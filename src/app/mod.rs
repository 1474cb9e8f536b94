// Application layer: turns CLI commands into queries and mutations.

pub mod commands;

pub use commands::CommandRunner;
