mod menus;
mod repl;
mod terminal;

use anyhow::Result;
use clap::Parser;

use baf::definitions;

/// An interactive BASICfuck programming environment.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The number of BASICfuck cells to allocate.
    #[arg(long, default_value_t = definitions::cells::SIZE)]
    cells: usize,

    /// The size, in bytes, of the input history.
    #[arg(long, default_value_t = definitions::history::SIZE)]
    history_size: usize,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    log::debug!(
        "starting with {} cells and {} bytes of history",
        args.cells,
        args.history_size
    );

    let mut terminal = terminal::CrosstermTerminal::new()?;
    repl::Repl::new(args.cells, args.history_size).run(&mut terminal);

    Ok(())
}
