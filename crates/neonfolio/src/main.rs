use clap::Parser;
use neonfolio_config::Config;

mod app;
mod cli;
mod eggs;
mod logging;
mod page;

use app::App;
use cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}
