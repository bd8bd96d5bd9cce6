/*!
CLI command modules.

  src/cmd/
    mod.rs          (this file)
    commands.rs     (Commands enum + dispatch)
    settings.rs     (connection flags / env / config file -> Calibre)
    output.rs       (JSON and human rendering, error kinds)
    format.rs       (box / table / colour primitives)

Conventions:
  - Dispatch returns `anyhow::Result<Outcome>`; rendering happens once, in main.
  - Library errors travel inside anyhow and are downcast for exit codes.
*/

pub mod commands;
pub mod format;
pub mod output;
pub mod settings;

pub use commands::{Commands, Outcome, dispatch};
pub use settings::{ConnectionArgs, resolve};
