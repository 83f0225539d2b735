use clap::Parser;
use log::info;

use crate::config::Config;
use crate::database::Database;
use crate::error::ConvoFixError;
use crate::schema;

#[derive(Parser)]
#[command(
    name = "convofix",
    version,
    about = "Adds the missing conversation schema columns to the local database"
)]
pub struct Cli {}

impl Cli {
    pub fn handle_command_line() -> Result<(), ConvoFixError> {
        // No flags or subcommands; parsing still handles --help and --version
        // and rejects anything else.
        let _args = Cli::parse();

        Self::run_fix()
    }

    fn run_fix() -> Result<(), ConvoFixError> {
        let db_path = Config::resolve_db_path()?;
        info!("Fixing conversation schema in {}", db_path.display());

        let mut db = Database::connect(&db_path)?;
        let added = schema::fix_schema(db.conn_mut())?;
        info!("Schema fix added {} column(s)", added);

        println!("Schema fix completed successfully.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing_no_arguments() {
        let result = Cli::try_parse_from(["convofix"]);
        assert!(result.is_ok(), "Should accept a bare invocation");
    }

    #[test]
    fn test_cli_parsing_rejects_arguments() {
        let result = Cli::try_parse_from(["convofix", "extra"]);
        assert!(result.is_err(), "Should reject positional arguments");

        let result = Cli::try_parse_from(["convofix", "--invalid-flag"]);
        assert!(result.is_err(), "Should reject unknown flags");
    }
}
