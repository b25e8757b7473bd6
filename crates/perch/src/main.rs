mod commands;

use clap::{Parser, Subcommand};

use perch_core::WindowHandle;

#[derive(Parser)]
#[command(name = "perch", version, about = "A dockable toolbar host for Windows")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// List monitors, primary first
    Monitors {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List switchable windows on a monitor
    Windows(commands::windows::WindowsArgs),
    /// Bring a window to the foreground
    Activate {
        /// Window handle, decimal or 0x-prefixed hex
        handle: WindowHandle,
    },
    /// Run the toolbar host until closed
    Run,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Monitors { json } => commands::monitors::execute(json),
        Commands::Windows(args) => commands::windows::execute(&args),
        Commands::Activate { handle } => commands::activate::execute(handle),
        Commands::Run => commands::run::execute(),
    }
}
