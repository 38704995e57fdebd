use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use timechallenge_core::{
    ChallengeBoard, ChallengeController, Config, Event, Outcome, RunState, SystemClock,
};

/// Renders controller events on the terminal.
fn render(event: &Event) {
    match event {
        Event::ChallengeStarted { .. } => println!("{}", RunState::Running.status_label()),
        Event::ChallengeWon { .. } => {
            println!("{}", RunState::Resolved(Outcome::Won).status_label())
        }
        Event::ChallengeLost { .. } => {
            println!("{}", RunState::Resolved(Outcome::Lost).status_label())
        }
        Event::ResultDialogRequested { dialog, .. } => {
            println!();
            print!("{}", dialog.render());
            println!("Press Enter to play again, q to quit.");
        }
        _ => {}
    }
}

pub fn run(key: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut board = ChallengeBoard::new(config.challenges()?, SystemClock::new());
    let controller = board
        .get_mut(key)
        .ok_or_else(|| format!("unknown challenge: {key}"))?;
    controller.subscribe(render);

    println!("{}", config.player.greeting());
    println!(
        "{}: stop the timer before it runs out ({}).",
        controller.challenge().title(),
        controller.challenge().target_label()
    );
    println!("{}", controller.state().status_label());
    println!("Press Enter to start/stop, q to quit.");

    let tick = Duration::from_millis(config.runtime.tick_interval_ms);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(play_loop(controller, tick))
}

async fn play_loop(
    controller: &mut ChallengeController<SystemClock>,
    tick: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                controller.tick();
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().eq_ignore_ascii_case("q") {
                    break;
                }
                if let Err(e) = controller.toggle() {
                    // A stop that lands after the deadline resolves the run
                    // as lost; the dialog has already been rendered.
                    if controller.outcome().is_none() {
                        return Err(e.into());
                    }
                }
            }
        }
    }

    if controller.state().is_running() {
        tracing::info!("quitting with a challenge still running");
    }
    Ok(())
}
