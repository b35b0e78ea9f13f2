// Command line interface

mod args;

pub use args::{Cli, Mode, PayloadArgs, RunArgs};
