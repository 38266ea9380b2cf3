// Example: how the reverse-auction price decays over the first hour
//
// Pure schedule math; no wallet, no network.

use pawnz_mint_widget::{format_sol, WidgetConfig};

fn main() {
    let config = WidgetConfig::default();
    let schedule = config.schedule();

    println!(
        "Start {} SOL, floor {} SOL, -{} SOL per {}s",
        format_sol(schedule.starting_lamports),
        format_sol(schedule.floor_lamports),
        format_sol(schedule.decay_lamports),
        schedule.interval_ms / 1_000
    );

    for minute in (0u64..=60).step_by(5) {
        let elapsed_ms = minute * 60_000;
        println!(
            "t+{minute:>2}m  price {} SOL",
            format_sol(schedule.price_at(elapsed_ms))
        );
    }

    // a long-idle auction sits at the floor
    println!(
        "t+ a week  price {} SOL",
        format_sol(schedule.price_at(7 * 24 * 3_600_000))
    );
}
