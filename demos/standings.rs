use footstats::{format_number, FileSource, StandingsMode, StatsRepository};

#[tokio::main]
async fn main() {
    let root = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let source = FileSource::new(root);

    let mut repo = StatsRepository::new();
    let found = match repo.load_first_available_default(&source).await {
        Ok(found) => found,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    println!("Loaded {} and {}", found.matches, found.stats);

    let kpis = repo.kpis();
    println!(
        "{} matches, {} goals, {} teams, {} seasons",
        format_number(kpis.total_matches as i64),
        format_number(kpis.total_goals as i64),
        kpis.total_teams,
        kpis.total_seasons
    );

    let Some(season) = repo.seasons().pop() else {
        return;
    };
    println!("\nStandings {season}");
    for (rank, row) in repo
        .standings(&season, StandingsMode::Global)
        .iter()
        .enumerate()
    {
        println!(
            "{:>2}. {:<24} {:>3} {:>3} {:>3} {:>3} {:>4}:{:<4} {:>4} {:>3}",
            rank + 1,
            row.team,
            row.mj,
            row.v,
            row.n,
            row.d,
            row.gf,
            row.ga,
            row.diff,
            row.pts
        );
    }

    println!("\nMetrics");
    for option in repo.metric_options() {
        println!("  {:<28} {}", option.key, option.label);
    }
}
