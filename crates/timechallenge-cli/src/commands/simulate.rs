use clap::Args;
use timechallenge_core::{Challenge, ChallengeController, Event, ManualClock};

#[derive(Args)]
pub struct SimulateArgs {
    /// Target time in seconds
    #[arg(long)]
    pub target: f64,
    /// Stop the challenge after this many milliseconds; without it the
    /// timer runs out
    #[arg(long)]
    pub stop_after: Option<u64>,
    /// Keep the clock running this many milliseconds after the stop
    #[arg(long, default_value = "0")]
    pub advance: u64,
    /// Clock step between ticks, in milliseconds
    #[arg(long, default_value = "100")]
    pub step: u64,
    /// Challenge title
    #[arg(long, default_value = "Simulated")]
    pub title: String,
}

fn print_event(event: &Event) {
    match serde_json::to_string(event) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!("failed to serialize event: {e}"),
    }
}

/// Advance the clock by `total_ms` in `step_ms` increments, ticking after each.
fn advance_by(
    clock: &ManualClock,
    controller: &mut ChallengeController<ManualClock>,
    total_ms: u64,
    step_ms: u64,
) {
    let mut left = total_ms;
    while left > 0 {
        let step = left.min(step_ms);
        clock.advance_ms(step);
        controller.tick();
        left -= step;
    }
}

/// Prints one JSON event per line, ending with a state snapshot.
pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.step == 0 {
        return Err("--step must be greater than zero".into());
    }
    let challenge = Challenge::new(args.title, args.target)?;
    let clock = ManualClock::new();
    let mut controller = ChallengeController::new(challenge, clock.clone());
    controller.subscribe(print_event);

    controller.start()?;
    match args.stop_after {
        Some(stop_after) => {
            advance_by(&clock, &mut controller, stop_after, args.step);
            if let Err(e) = controller.stop() {
                eprintln!("stop rejected: {e}");
            }
        }
        None => {
            while controller.state().is_running() {
                advance_by(&clock, &mut controller, args.step, args.step);
            }
        }
    }
    advance_by(&clock, &mut controller, args.advance, args.step);

    print_event(&controller.snapshot());
    Ok(())
}
