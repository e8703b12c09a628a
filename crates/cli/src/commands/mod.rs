//! Account commands shared by the one-shot subcommands and the menu loop.

pub mod users;
