mod cli;
mod convert_cmd;
mod info_cmd;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Convert {
            ref file,
            ref selector,
            nested,
            pretty,
            ref output,
            quiet,
        } => convert_cmd::run(
            file,
            selector.as_deref(),
            nested,
            pretty,
            output.as_deref(),
            quiet,
        ),
        cli::Commands::Info { ref file, json } => info_cmd::run(file, json),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
