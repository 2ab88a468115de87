use clap::Parser;
use cli::{Args, Commands};
use logging::setup_logging;
use pharos_config::error::Result;

mod add;
mod cli;
mod list;
mod logging;
mod utils;

fn handle_cli() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        let mut color = utils::COLOR.write().unwrap();
        *color = false;
    }

    match args.command {
        Commands::Add { ref urls, mode } => add::add_repositories(&args.manifest, urls, mode)?,
        Commands::List => list::list_repositories(&args.manifest, args.json)?,
    }

    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
