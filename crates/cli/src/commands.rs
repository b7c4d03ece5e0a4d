use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Args {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Commands {
    /// Load the project's .env file and print the resulting definitions
    Emit(Emit),
}

#[derive(clap::Args, Debug)]
pub(crate) struct Emit {
    /// Directory containing the .env file
    #[clap(short, long, env = "PROJECT_DIR", default_value = ".")]
    pub project_dir: PathBuf,
    #[clap(short, long, value_enum, default_value_t = Format::Flags)]
    pub format: Format,
    /// Write to this file instead of stdout
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Format {
    /// `-DKEY=value` compiler flags
    Flags,
    /// C header with `#define` lines
    Header,
    /// `cargo:rustc-env` build script directives
    Cargo,
}
