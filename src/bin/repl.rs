use std::io::{self, BufRead, Write};
use tabletop_dice::DiceRoller;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut roller = DiceRoller::new();
    let stdin = io::stdin();
    print!("> ");
    io::stdout().flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if !input.is_empty() {
            println!("{}", roller.roll_with_context(input, None));
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
