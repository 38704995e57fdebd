use clap::Subcommand;
use timechallenge_core::Config;

#[derive(Subcommand)]
pub enum PlayerAction {
    /// Print the player greeting
    Show,
    /// Set the player name
    Set {
        /// New name
        name: String,
    },
    /// Forget the player name
    Clear,
}

pub fn run(action: PlayerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;

    match action {
        PlayerAction::Show => {}
        PlayerAction::Set { name } => {
            config.player.set_name(name);
            config.save()?;
        }
        PlayerAction::Clear => {
            config.player.name = None;
            config.save()?;
        }
    }

    println!("{}", config.player.greeting());
    Ok(())
}
