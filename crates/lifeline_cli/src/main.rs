use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lifeline_engine::{
    AgeTrace, BirthProfile, CivilTime, CloseCarry, LifeEngine, LifeSeries, NativeCalendar,
    SeriesStats,
};
use lifeline_ganzhi::{ALL_POSITIONS, Gender, TenGod, next_jie, prev_jie};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lifeline", about = "Life K-line: 80 annual candles from a birth moment")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args)]
struct BirthArgs {
    /// Birthday in China Standard Time: YYYY-MM-DD or "YYYY-MM-DD HH:MM"
    birthday: String,
    /// Gender convention for the decade cycles: male or female
    #[arg(long, default_value = "female")]
    gender: Gender,
    /// Scoring weights TOML (see config/weights.toml)
    #[arg(long)]
    weights: Option<PathBuf>,
    /// Close carried into the next year: unrounded or rounded
    #[arg(long, default_value = "unrounded")]
    carry: CloseCarry,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the 80 annual candles
    Series(BirthArgs),
    /// Show the birth pillars, roles, element distribution and decade start
    Pillars(BirthArgs),
    /// Summary statistics of the series
    Stats(BirthArgs),
    /// Every factor behind each year's candle
    Explain(BirthArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Series(args) => {
            let (engine, moment) = prepare(&args);
            let series = engine.series_for(moment, args.gender).unwrap_or_else(|e| fail(e));
            if args.json {
                print_json(&series);
            } else {
                print_series(moment, &series);
            }
        }

        Commands::Pillars(args) => {
            let (engine, moment) = prepare(&args);
            let profile = engine.profile(moment, args.gender).unwrap_or_else(|e| fail(e));
            if args.json {
                print_json(&profile);
            } else {
                print_profile(&profile);
            }
        }

        Commands::Stats(args) => {
            let (engine, moment) = prepare(&args);
            let series = engine.series_for(moment, args.gender).unwrap_or_else(|e| fail(e));
            let Some(stats) = SeriesStats::from_series(&series) else {
                fail("empty series");
            };
            if args.json {
                print_json(&stats);
            } else {
                print_stats(&stats);
            }
        }

        Commands::Explain(args) => {
            let (engine, moment) = prepare(&args);
            let traces = engine.explain(moment, args.gender).unwrap_or_else(|e| fail(e));
            if args.json {
                print_json(&traces);
            } else {
                print_traces(&traces);
            }
        }
    }
}

fn prepare(args: &BirthArgs) -> (LifeEngine<NativeCalendar>, CivilTime) {
    let engine = match &args.weights {
        Some(path) => {
            LifeEngine::with_weights_file(NativeCalendar, path).unwrap_or_else(|e| fail(e))
        }
        None => LifeEngine::native(),
    };
    let moment = CivilTime::parse_birthday(&args.birthday).unwrap_or_else(|e| {
        eprintln!("Invalid birthday: {e}");
        eprintln!("Expected YYYY-MM-DD or \"YYYY-MM-DD HH:MM\"");
        std::process::exit(2);
    });
    (engine.with_carry(args.carry), moment)
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => fail(e),
    }
}

fn print_series(moment: CivilTime, series: &LifeSeries) {
    println!(
        "{:>3}  {:>4}  {:>10} {:>10} {:>10} {:>10}",
        "age", "year", "open", "close", "low", "high"
    );
    for (age, r) in series.iter().enumerate() {
        println!(
            "{:>3}  {:>4}  {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            age,
            moment.year() + age as i32,
            r.open,
            r.close,
            r.low,
            r.high
        );
    }
}

fn roles_label(roles: impl Iterator<Item = TenGod>) -> String {
    roles.map(|r| r.hanzi()).collect::<Vec<_>>().join(",")
}

fn print_profile(profile: &BirthProfile) {
    println!("Birth:   {} (China Standard Time), {}", profile.moment, profile.gender);
    println!("Pillars: {}", profile.pillars);
    let jd = profile.moment.to_jd();
    if let (Ok(prev), Ok(next)) = (prev_jie(jd), next_jie(jd)) {
        println!("Month:   {prev} to {next}");
    }
    println!();
    println!("{:<6} {:<6} {:<12} {:<6} hidden", "pillar", "ganzhi", "na-yin", "role");
    for position in ALL_POSITIONS {
        let pillar = profile.pillars.get(position);
        println!(
            "{:<6} {:<6} {:<12} {:<6} {}",
            position.name(),
            pillar.hanzi(),
            format!("{} ({})", pillar.na_yin(), pillar.na_yin_element().name()),
            profile.pillars.primary_role(position).hanzi(),
            roles_label(profile.pillars.secondary_roles(position))
        );
    }
    println!();
    let dist: Vec<String> = profile
        .distribution
        .iter()
        .map(|(e, n)| format!("{} {n}", e.name()))
        .collect();
    println!("Elements: {}", dist.join(", "));
    println!(
        "Scores:   elemental {:.2}, decile {:.2}, base {:.2}",
        profile.elemental_score, profile.decile_score, profile.base_score
    );
    match &profile.decade_start {
        Some(s) => println!(
            "Decades:  start at {}y {}m {}d ({}), age {:.2}",
            s.years,
            s.months,
            s.days,
            if s.forward { "forward" } else { "backward" },
            s.start_age()
        ),
        None => println!("Decades:  start unavailable, cycles aligned to birth"),
    }
}

fn print_stats(stats: &SeriesStats) {
    println!("first open    {:.2}", stats.first_open);
    println!("first close   {:.2}", stats.first_close);
    println!("last close    {:.2}", stats.last_close);
    println!("max high      {:.2} at age {}", stats.max_high, stats.max_high_age);
    println!("min low       {:.2} at age {}", stats.min_low, stats.min_low_age);
    println!("mean close    {:.2}", stats.mean_close);
    println!("variance      {:.2}", stats.close_variance);
    println!("total return  {:+.2}%", stats.total_return_pct);
    println!("volatility    {:.2}%", stats.volatility_pct);
}

fn cycle_label(t: &AgeTrace) -> String {
    if t.cycle.is_started() {
        t.cycle.index.to_string()
    } else {
        "-".into()
    }
}

fn print_traces(traces: &[AgeTrace]) {
    println!(
        "{:>3} {:>4} {:<6} {:>3} {:>6} {:>8} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5} {:>7} {:>5} {:>9}",
        "age", "year", "pillar", "dy", "dyf", "score", "chg", "gz", "zhi", "ann", "stg", "wx", "total", "vol", "close"
    );
    for t in traces {
        println!(
            "{:>3} {:>4} {:<6} {:>3} {:>6.4} {:>8.4} {:>+5.2} {:>5.2} {:>5.2} {:>5.3} {:>5.3} {:>5.3} {:>+7.4} {:>5.3} {:>9.2}",
            t.age,
            t.year,
            t.annual_pillar.hanzi(),
            cycle_label(t),
            t.cycle.factor,
            t.score,
            t.score_change,
            t.gan_zhi_factor,
            t.zhi_factor,
            t.annual_factor,
            t.life_stage_factor,
            t.five_elements_match,
            t.total_change,
            t.volatility,
            t.record.close
        );
    }
}
