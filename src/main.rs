use clap::Parser;

use connect_four::game::connect_four::{DEFAULT_HEIGHT, DEFAULT_WIDTH, STREAK_LENGTH};
use connect_four::game::{ConnectFour, Game};
use connect_four::session::{GameSession, StdinInput};

/// Two-player Connect Four on the terminal.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Number of columns
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,
    /// Number of rows
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if args.width < STREAK_LENGTH || args.height < STREAK_LENGTH {
        return Err(format!(
            "board must be at least {STREAK_LENGTH}x{STREAK_LENGTH}, got {}x{}",
            args.width, args.height
        )
        .into());
    }

    println!("Connect Four!\n");
    let game = ConnectFour::with_board_size(&[1, 2], args.width, args.height)?;
    let mut session = GameSession::new(game, StdinInput);
    session.run()?;

    Ok(())
}
