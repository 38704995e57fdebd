use serde::Serialize;
use timechallenge_core::{ChallengeBoard, Config, SystemClock};

#[derive(Serialize)]
struct ChallengeRow {
    index: usize,
    title: String,
    target_time_secs: f64,
    label: String,
}

pub fn list(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let board = ChallengeBoard::new(config.challenges()?, SystemClock::new());
    let rows: Vec<ChallengeRow> = board
        .iter()
        .map(|controller| controller.challenge())
        .enumerate()
        .map(|(i, c)| ChallengeRow {
            index: i + 1,
            title: c.title().to_string(),
            target_time_secs: c.target_time_secs(),
            label: c.target_label(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", config.player.greeting());
    for row in rows {
        println!("{:>3}  {:<12} {}", row.index, row.title, row.label);
    }
    Ok(())
}
