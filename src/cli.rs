use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "filegate")]
#[command(author, version, about = "Check marketplace uploads against the file-type and size rules", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check one or more uploads
    Check {
        /// Filenames as received from the platform (or local files)
        #[arg(required = true)]
        names: Vec<String>,

        /// Upload size in bytes, applied to every name
        #[arg(short, long)]
        size: Option<u64>,

        /// Print one JSON object per name
        #[arg(long)]
        json: bool,
    },

    /// List supported (or blocked) extensions
    Formats {
        /// List the blocked extensions instead
        #[arg(long)]
        blocked: bool,

        /// Print a JSON array
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["filegate", "check", "a.pdf", "b.exe", "--size", "42", "--json"]).unwrap();
        match cli.command {
            Commands::Check { names, size, json } => {
                assert_eq!(names, vec!["a.pdf", "b.exe"]);
                assert_eq!(size, Some(42));
                assert!(json);
            }
            Commands::Formats { .. } => panic!("expected check"),
        }
    }

    #[test]
    fn test_check_requires_a_name() {
        assert!(Cli::try_parse_from(["filegate", "check"]).is_err());
    }

    #[test]
    fn test_parse_formats() {
        let cli = Cli::try_parse_from(["filegate", "formats", "--blocked"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Formats {
                blocked: true,
                json: false
            }
        ));
    }
}
