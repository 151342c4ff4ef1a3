//! spn-play - play scientific pitch notation in the terminal
//!
//! Run with: cargo run -- "C4/4 E4/4 G4/2" --preset synthesizer "C3/2 G2/2"

mod app;
mod args;
mod logger;
mod ui;

use app::Player;
use args::Command;
use ui::Exit;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let composition = match args::parse(std::env::args().skip(1))? {
        Command::Help => {
            println!("{}", args::USAGE);
            return Ok(());
        }
        Command::Play(composition) => composition,
    };

    // Keep going without the log pane if another logger got there first
    let logger = logger::init().ok();

    let player = Player::new(composition)?;
    match player.run(logger)? {
        Exit::Finished => println!("done"),
        Exit::Stopped => println!("stopped"),
    }
    Ok(())
}
