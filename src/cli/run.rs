use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, changes::changes, css::css, disable::disable, hardcoded::hardcoded,
        init::init, keys::keys,
    },
};

/// Dispatch to the command handler.
///
/// `Err` means the command could not run at all (bad config, missing
/// directory, invalid pattern); violations are part of the `CommandResult`.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Command::Css(cmd) => css(cmd),
        Command::Keys(cmd) => keys(cmd),
        Command::Hardcoded(cmd) => hardcoded(cmd),
        Command::Disable(cmd) => disable(cmd),
        Command::Changes(cmd) => changes(cmd),
        Command::Init => init(),
    }
}
