use clap::Subcommand;
use std::path::PathBuf;

pub mod herf;
pub mod tlk;
pub mod twoda;

#[derive(Subcommand)]
pub enum Commands {
    /// 2DA table commands
    #[command(subcommand)]
    Twoda(TwodaCommands),

    /// HERF archive commands
    #[command(subcommand)]
    Herf(HerfCommands),

    /// TLK talk table commands
    #[command(subcommand)]
    Tlk(TlkCommands),
}

#[derive(Subcommand)]
pub enum TwodaCommands {
    /// Dump a 2DA table as plain text (reads binary V2.b tables too)
    Dump {
        /// Source 2DA file
        source: PathBuf,

        /// Output file (stdout when omitted)
        destination: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum HerfCommands {
    /// List the resources in a HERF archive
    List {
        /// HERF archive
        source: PathBuf,
    },

    /// Extract resources from a HERF archive
    Extract {
        /// HERF archive
        source: PathBuf,

        /// Output directory
        destination: PathBuf,

        /// Extract a single resource by name
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TlkCommands {
    /// Print a string from a TLK talk table
    Get {
        /// TLK file
        source: PathBuf,

        /// String reference to look up
        str_ref: u32,

        /// Text encoding of the table (a WHATWG label, e.g. "utf-8")
        #[arg(short, long, default_value = "windows-1252")]
        encoding: String,
    },

    /// Print a TLK file's language ID
    Language {
        /// TLK file
        source: PathBuf,
    },
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Twoda(TwodaCommands::Dump {
                source,
                destination,
            }) => twoda::dump(source, destination.as_deref()),
            Commands::Herf(HerfCommands::List { source }) => herf::list(source),
            Commands::Herf(HerfCommands::Extract {
                source,
                destination,
                name,
            }) => herf::extract(source, destination, name.as_deref()),
            Commands::Tlk(TlkCommands::Get {
                source,
                str_ref,
                encoding,
            }) => tlk::get(source, *str_ref, encoding),
            Commands::Tlk(TlkCommands::Language { source }) => tlk::language(source),
        }
    }
}
