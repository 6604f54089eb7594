use std::env;
use std::error::Error;
use std::io::stdin;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tinyrand::{Seeded, StdRand};
use tracing::{debug, info};

use matchday::data::{self, LeagueEntry};
use matchday::file;
use matchday::kickoff::KickoffConfig;
use matchday::league::{League, LeagueConfig};
use matchday::odds::OddsTable;
use matchday::print;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// file to source the players dataset from
    #[clap(short = 'f', long)]
    players: PathBuf,

    /// league catalogue file; the whole dataset forms one league if omitted
    #[clap(short = 'l', long)]
    leagues: Option<PathBuf>,

    /// 1-based index into the league catalogue; prompts if omitted
    #[clap(long)]
    league: Option<usize>,

    /// odds table file; the built-in baseline applies if omitted
    #[clap(short = 'o', long)]
    odds: Option<PathBuf>,

    /// kickoff catalogue file; the built-in catalogue applies if omitted
    #[clap(short = 'k', long)]
    kickoffs: Option<PathBuf>,

    /// seed for deterministic replay; drawn from the clock if omitted
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// write the kickoff-annotated schedule to this file
    #[clap(long = "schedule-file")]
    schedule_file: Option<PathBuf>,

    /// print the kickoff-annotated fixture list before simulating
    #[clap(short = 'x', long = "fixtures")]
    print_fixtures: bool,

    /// print every match's event log
    #[clap(short = 'e', long = "events")]
    print_events: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if !self.players.exists() {
            bail!("players file {} does not exist", self.players.display());
        }
        if self.league.is_some() && self.leagues.is_none() {
            bail!("--league requires a league catalogue (-l)");
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let records = data::load_players(&args.players)?;
    info!("{} player records loaded", records.len());

    let leagues = match &args.leagues {
        Some(path) => data::load_leagues(path)?,
        None => vec![data::combined_league(&records)],
    };
    let entry = select_league(&leagues, args.league)?;

    let odds = match &args.odds {
        Some(path) => data::load_odds(path)?,
        None => OddsTable::baseline(),
    };
    let kickoff = match &args.kickoffs {
        Some(path) => data::load_kickoffs(path)?,
        None => KickoffConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(entropy_seed);
    info!("simulating {} with seed {seed}", entry.name);
    let mut rand = StdRand::seed(seed);

    let start = Instant::now();
    let mut league = League::new(
        entry.name.clone(),
        &entry.clubs,
        &records,
        odds,
        LeagueConfig {
            kickoff,
            ..LeagueConfig::default()
        },
        &mut rand,
    )?;

    if let Some(path) = &args.schedule_file {
        file::write_json(path, &league.schedule())?;
        info!("schedule written to {}", path.display());
    }

    let renderer = Console::default();
    if args.print_fixtures {
        println!("{}", renderer.render(&print::tabulate_schedule(league.schedule())));
    }
    let mut matches = 0;
    while let Some(played) = league.simulate_week(&mut rand) {
        matches += played.len();
        if args.print_events {
            for play in &played {
                println!(
                    "{} v {} ({})",
                    play.fixture.home,
                    play.fixture.away,
                    print::format_kickoff(play.fixture.kickoff)
                );
                println!("{}", renderer.render(&print::tabulate_events(play.outcome.events())));
            }
        }
    }
    let elapsed = start.elapsed();
    info!("{}: {matches} matches simulated in {elapsed:?}", league.name());

    println!("{}", renderer.render(&print::tabulate_standings(league.standings())));
    Ok(())
}

fn select_league(leagues: &[LeagueEntry], choice: Option<usize>) -> anyhow::Result<&LeagueEntry> {
    if leagues.is_empty() {
        bail!("the league catalogue is empty");
    }
    if leagues.len() == 1 {
        return Ok(&leagues[0]);
    }
    if let Some(index) = choice {
        if (1..=leagues.len()).contains(&index) {
            return Ok(&leagues[index - 1]);
        }
        bail!("league index {index} out of range 1..={}", leagues.len());
    }

    println!("Please enter the league you would like to simulate:");
    for (index, league) in leagues.iter().enumerate() {
        println!("    {} - {}", index + 1, league.name);
    }
    loop {
        let mut line = String::new();
        stdin().read_line(&mut line)?;
        match line.trim().parse::<usize>() {
            Ok(num) if (1..=leagues.len()).contains(&num) => return Ok(&leagues[num - 1]),
            _ => println!("Please enter a valid input!"),
        }
    }
}

fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}
