const USAGE: &str = "\
Usage: trip-planner [OPTION]

Plan a Singapore trip from the terminal.

Options:
  (none)                    Run the interactive planner
  --tui-smoke[=TARGET]      Render one screen off-terminal and exit
                            TARGET: welcome, travel-type, duration, group,
                            interests, requirements, destinations, itinerary
  --plan-smoke              Run a scripted planning session and print a transcript
  -h, --help                Show this help

Configuration: ./trip-planner.toml (or $TRIP_PLANNER_CONFIG), TRIP_PLANNER_* env vars.";

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE);
        return;
    }

    // Non-interactive planning proof mode (for automated checks / log capture).
    // Prints a transcript, writes `plan_smoke_transcript.log` and exits 0/1.
    if args.iter().any(|a| a == "--plan-smoke") {
        trip_planner::run_plan_smoke();
        return;
    }

    // Single-frame TUI smoke (no real terminal required).
    // Usage: --tui-smoke or --tui-smoke=<target>
    if let Some(arg) = args
        .iter()
        .find(|a| a.as_str() == "--tui-smoke" || a.starts_with("--tui-smoke="))
    {
        let target = arg
            .split_once('=')
            .map(|(_, v)| v.to_string())
            .filter(|v| !v.trim().is_empty());
        trip_planner::run_tui_smoke(target);
        return;
    }

    if let Some(unknown) = args.iter().skip(1).find(|a| a.starts_with('-')) {
        eprintln!("Unknown option: {}\n\n{}", unknown, USAGE);
        std::process::exit(2);
    }

    trip_planner::run_tui();
}
