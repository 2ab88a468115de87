use clap::{ArgAction, Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to the satis manifest file
    #[arg(short, long, global = true, default_value = "satis.json", value_hint = ValueHint::FilePath)]
    pub manifest: String,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record mirrored repositories in the manifest
    #[command(arg_required_else_help = true)]
    #[clap(name = "add", visible_alias = "a")]
    Add {
        /// Repository URLs to record
        #[arg(required = true)]
        urls: Vec<String>,

        /// Permission bits for the written manifest, in octal
        #[arg(required = false, long, value_parser = parse_mode, default_value = "644")]
        mode: u32,
    },

    /// List the repositories recorded in the manifest
    #[clap(name = "list", visible_alias = "ls")]
    List,
}

fn parse_mode(s: &str) -> Result<u32, String> {
    u32::from_str_radix(s, 8).map_err(|err| format!("invalid mode `{s}`: {err}"))
}
