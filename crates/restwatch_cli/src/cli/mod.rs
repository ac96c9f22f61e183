use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "restwatch", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the break timer
    ///
    /// Prompts for break settings on the first run. While running, type
    /// `pause`, `resume`, `edit`, `stop` or `quit` followed by Enter.
    Start,
    /// Inspect or change the persisted break settings
    Config {
        #[command(subcommand)]
        config: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the current break settings
    ///
    /// Example: restwatch config show --json
    Show,
    /// Edit and persist the break settings
    Edit,
    /// Reset the break settings and reconfigure from scratch
    Reset,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, ConfigCommand};
    use clap::Parser;

    #[test]
    fn parses_start_command() {
        let cli = Cli::try_parse_from(["restwatch", "start"]).unwrap();
        assert!(matches!(cli.command, Command::Start));
        assert!(!cli.json);
    }

    #[test]
    fn parses_config_show_with_global_json_flag() {
        let cli = Cli::try_parse_from(["restwatch", "config", "show", "--json"]).unwrap();
        match cli.command {
            Command::Config { config } => assert!(matches!(config, ConfigCommand::Show)),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(cli.json);
    }

    #[test]
    fn rejects_unknown_command() {
        assert!(Cli::try_parse_from(["restwatch", "snooze"]).is_err());
    }
}
