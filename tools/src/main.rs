//! game-runner: headless seeded runner for Soldiers of Wealth.
//!
//! Usage:
//!   game-runner --seed 12345 --weeks 8 --db run.db
//!   game-runner --seed 12345 --data-dir ./data

use anyhow::Result;
use wealth_core::{
    action::{ActionDraft, InvestmentDraft, OffensiveDraft, OffensiveKind},
    combat::{success_chance, DefenseLabel},
    command::PlayerCommand,
    config::GameConfig,
    engine::GameEngine,
    market::MarketKey,
    player::Player,
    returns::potential_return,
    rng::{GameRng, StreamSlot},
    store::GameStore,
};
use std::env;

const COMMANDER_NAMES: [&str; 6] = [
    "Ada Sterling",
    "Brock Mason",
    "Cleo Vance",
    "Dmitri Volkov",
    "Elena Cruz",
    "Farid Osei",
];

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let weeks = parse_arg(&args, "--weeks", 8u64);
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].to_string());

    println!("Soldiers of Wealth — game-runner");
    println!("  seed:   {seed}");
    println!("  weeks:  {weeks}");
    println!("  db:     {db}");
    println!();

    // For :memory: use a SQLite shared-memory URI so a reopened
    // connection would still see the same database.
    let db_effective: String = if db == ":memory:" {
        format!("file:gamerun_{}?mode=memory&cache=shared", unix_now())
    } else {
        db.to_string()
    };
    let store = GameStore::open(&db_effective)?;
    store.migrate()?;

    let config = match data_dir {
        Some(dir) => GameConfig::load(&dir)?,
        None => GameConfig::builtin(),
    };

    let run_id = format!("run-{seed}-{}", unix_now());
    let mut engine = GameEngine::build(run_id.clone(), seed, store, &config)?;

    let mut roster_rng = engine.rng_bank().for_stream(StreamSlot::Roster);
    let roster = seed_roster(&engine, &run_id, &mut roster_rng)?;

    engine.apply(PlayerCommand::ToggleAutoSimulation)?;

    for _ in 0..weeks {
        submit_weekly_moves(&mut engine, &roster, &mut roster_rng);
        engine.run_days(7)?;
    }

    print_summary(&engine, &run_id, weeks)?;
    Ok(())
}

fn seed_roster(
    engine: &GameEngine,
    run_id: &str,
    rng: &mut GameRng,
) -> Result<Vec<Player>> {
    let defenses = [
        DefenseLabel::Weak,
        DefenseLabel::Moderate,
        DefenseLabel::Strong,
        DefenseLabel::VeryStrong,
    ];
    let mut roster = Vec::new();
    for (i, name) in COMMANDER_NAMES.iter().enumerate() {
        let player = Player {
            id: format!("p{}", i + 1),
            name: (*name).to_string(),
            soldiers: 50 + rng.next_u64_below(200) as u32,
            defense: defenses[i % defenses.len()],
            investments: Default::default(),
        };
        engine.store().upsert_player(run_id, &player)?;
        roster.push(player);
    }
    Ok(roster)
}

fn submit_weekly_moves(engine: &mut GameEngine, roster: &[Player], rng: &mut GameRng) {
    for (i, player) in roster.iter().enumerate() {
        let draft = if rng.next_u64_below(4) == 0 && roster.len() > 1 {
            // Occasional attack against the next commander down the list.
            let target = &roster[(i + 1) % roster.len()];
            ActionDraft {
                offensive: Some(OffensiveDraft {
                    kind: Some(OffensiveKind::Attack),
                    target_player: Some(target.id.clone()),
                    target_name: Some(target.name.clone()),
                    market: None,
                }),
                ..Default::default()
            }
        } else {
            let market = MarketKey::ALL[rng.next_u64_below(4) as usize];
            let ceiling = u64::from(player.soldiers.saturating_sub(10)).max(1);
            ActionDraft {
                investment: Some(InvestmentDraft {
                    kind: None,
                    amount: Some(10 + rng.next_u64_below(ceiling) as u32),
                    market: Some(market),
                }),
                ..Default::default()
            }
        };

        let command = PlayerCommand::SubmitActions {
            player_id: player.id.clone(),
            draft,
        };
        if let Err(e) = engine.apply(command) {
            log::warn!("move rejected for {}: {e}", player.id);
        }
    }
}

fn print_summary(engine: &GameEngine, run_id: &str, weeks: u64) -> Result<()> {
    let store = engine.store();
    let actions = store.action_count(run_id)?;

    println!("=== RUN SUMMARY ===");
    println!("  run_id:     {run_id}");
    println!("  weeks run:  {weeks}");
    println!("  final day:  {}", engine.clock.current_day);
    println!("  cycle:      {}", engine.cycles.state.current_cycle);
    println!("  actions:    {actions}");

    println!();
    println!("=== MARKET RETURNS ===");
    for (key, current_return) in engine.cycles.market_returns() {
        println!(
            "  {key:<12} {current_return:>7.1}%   100 soldiers -> {}",
            potential_return(100, current_return)
        );
    }

    let roster = store.roster(run_id)?;
    if roster.len() >= 2 {
        let (a, d) = (&roster[0], &roster[1]);
        println!();
        println!("=== SAMPLE COMBAT ODDS ===");
        println!(
            "  {} ({} soldiers) vs {} ({} soldiers, {}): {}%",
            a.name,
            a.soldiers,
            d.name,
            d.soldiers,
            d.defense,
            success_chance(a.soldiers, d.soldiers, d.defense)
        );
    }

    if let Some(snapshot) = store.latest_snapshot(run_id)? {
        println!();
        println!(
            "  latest snapshot: week {} under '{}'",
            snapshot.week, snapshot.cycle
        );
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
