use clap::Parser;
use clap::Subcommand;
use cmd::command::gen;
use cmd::command::gen::Gen;
use cmd::error::Error;
use cmd::error::Result;
use cmd::init_tracing;
use tracing::info;

#[derive(Subcommand, Clone)]
enum Commands {
    /// Generate the date dimension and the viewing and subscription facts
    Gen(Gen),
}

#[derive(Parser)]
#[command(propagate_version = true)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let Some(command) = &args.command else {
        return Err(Error::BadRequest("no command specified".to_string()));
    };

    match command {
        Commands::Gen(args) => {
            let settings = args.settings()?;
            init_tracing(settings.log_level)?;

            let version = env!("CARGO_PKG_VERSION");
            info!("facts v{version}");

            gen::start(settings)?;
        }
    }

    Ok(())
}
