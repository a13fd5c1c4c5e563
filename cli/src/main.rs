use clap::{Parser, Subcommand};
use relay_common::db::core::ServiceGrid;
use relay_common::db::parser::layout;
use relay_common::geom::coord::GridCoord;
use relay_common::util::config::Config;
use relay_common::util::generator::RandomSampler;
use relay_common::util::{check, logger, visualization};
use relay_placer::{CoveragePlanner, GreedyPlanner};
use relay_router::Hops;
use std::path::{Path, PathBuf};

const PLANNED_LAYOUT: &str = "planned.txt";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a random obstacle layout.
    Generate {
        #[arg(long, default_value_t = 10)]
        rows: u32,
        #[arg(long, default_value_t = 10)]
        cols: u32,
        #[arg(long, default_value_t = 0.3)]
        fraction: f64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "inputs/random.txt")]
        output: String,
    },
    /// Place relays and save the planned layout.
    Plan,
    /// Search a planned layout for the shortest hop path.
    Route {
        #[arg(long, value_parser = parse_coord)]
        from: Option<GridCoord>,
        #[arg(long, value_parser = parse_coord)]
        to: Option<GridCoord>,
    },
    /// Plan, verify, search and render in one go.
    Flow,
}

fn parse_coord(s: &str) -> Result<GridCoord, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{}'", s))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("bad row '{}': {}", row, e))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("bad column '{}': {}", col, e))?;
    Ok(GridCoord::new(row, col))
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    if path.exists() {
        log::info!("Loading configuration from {:?}", path);
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    } else {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            path
        );
        Ok(Config::default())
    }
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();
    let config = load_config(&args.config)?;

    match args.command.unwrap_or(Commands::Flow) {
        Commands::Generate {
            rows,
            cols,
            fraction,
            seed,
            output,
        } => {
            prepare_output_dir(&output)?;
            log::info!(
                "Generating random layout ({}x{}, {:.0}% obstructed)...",
                rows,
                cols,
                fraction * 100.0
            );
            let grid = ServiceGrid::generate(
                rows,
                cols,
                fraction,
                &mut RandomSampler::from_seed_option(seed),
            )?;
            layout::save(&grid, &output)?;
            log::info!("Generated: {}", output);
        }
        Commands::Plan => {
            let grid = run_planning(&config)?;
            let out = output_path(&config, PLANNED_LAYOUT)?;
            log::info!("Writing planned layout to {}", out);
            layout::save(&grid, &out)?;
            render(&config, &grid, None, "planned.png");
        }
        Commands::Route { from, to } => {
            let input = output_path(&config, PLANNED_LAYOUT)?;
            if !Path::new(&input).exists() {
                return Err(anyhow::anyhow!(
                    "Planned layout missing: '{}'. Did you run 'plan'?",
                    input
                ));
            }
            let grid = layout::parse(&input)
                .map_err(|e| anyhow::anyhow!("Invalid layout in '{}': {}", input, e))?;
            let start = from.unwrap_or_else(|| config_coord(config.search.start));
            let end = to.unwrap_or_else(|| config_coord(config.search.end));
            run_search(&config, &grid, start, end)?;
        }
        Commands::Flow => {
            let grid = run_planning(&config)?;
            let start = config_coord(config.search.start);
            let end = config_coord(config.search.end);
            run_search(&config, &grid, start, end)?;
        }
    }

    Ok(())
}

fn config_coord([row, col]: [u32; 2]) -> GridCoord {
    GridCoord::new(row, col)
}

fn prepare_output_dir(path_str: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path_str).parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            log::info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn output_path(config: &Config, name: &str) -> anyhow::Result<String> {
    let path = Path::new(&config.output.directory).join(name);
    let path = path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path {:?} is not valid UTF-8", path))?
        .to_string();
    prepare_output_dir(&path)?;
    Ok(path)
}

fn load_grid(config: &Config) -> anyhow::Result<ServiceGrid> {
    if let Some(file) = &config.grid.layout_file {
        log::info!("Parsing layout: {}", file);
        return layout::parse(file)
            .map_err(|e| anyhow::anyhow!("Invalid layout in '{}': {}", file, e));
    }

    let grid = ServiceGrid::generate(
        config.grid.rows,
        config.grid.cols,
        config.grid.obstacle_fraction,
        &mut RandomSampler::from_seed_option(config.grid.seed),
    )?;
    Ok(grid)
}

fn run_planning(config: &Config) -> anyhow::Result<ServiceGrid> {
    let mut grid = load_grid(config)?;

    // A preplanned layout does not record its radius, so it cannot be verified.
    let planned_radius = if grid.is_planned() {
        log::warn!("Layout already carries coverage. Skipping relay placement and verification.");
        None
    } else {
        let planner = GreedyPlanner::from_config(&config.coverage);
        planner.plan(&mut grid)?;
        Some(planner.radius())
    };

    let counts = grid.counts();
    log::info!(
        "Grid: {} covered, {} obstructed, {} free, {} relays",
        counts.covered,
        counts.obstructed,
        counts.free,
        grid.relays().len()
    );

    if let Some(radius) = planned_radius {
        check::run_coverage_check(&grid, radius)
            .map_err(|e| anyhow::anyhow!("Verification Failed: {}", e))?;
    }

    println!("{}", visualization::render_ascii(&grid, None));
    Ok(grid)
}

fn run_search(
    config: &Config,
    grid: &ServiceGrid,
    start: GridCoord,
    end: GridCoord,
) -> anyhow::Result<Hops> {
    log::info!("Searching for a path {} -> {}...", start, end);
    let path = relay_router::find_path(grid, start, end)?;
    let hops = Hops::along(path.as_deref());

    match hops {
        Hops::Reachable(n) => log::info!("Reliable path: {} hops", n),
        Hops::Unreachable => log::warn!("{} is unreachable from {}", end, start),
    }

    println!("{}", visualization::render_ascii(grid, path.as_deref()));
    render(config, grid, path.as_deref(), "route.png");
    Ok(hops)
}

fn render(config: &Config, grid: &ServiceGrid, path: Option<&[GridCoord]>, name: &str) {
    if !config.output.png {
        return;
    }
    let out = match output_path(config, name) {
        Ok(out) => out,
        Err(e) => {
            log::warn!("Skipping visualization: {}", e);
            return;
        }
    };
    log::info!("Generating visualization {}", out);
    if let Err(e) = visualization::draw_grid_png(grid, path, &out, config.output.cell_pixels) {
        log::warn!("Failed to write {}: {}", out, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_common::util::config::ObstaclePolicy;

    #[test]
    fn coord_argument() {
        assert_eq!(parse_coord("4, 7").unwrap(), GridCoord::new(4, 7));
        assert!(parse_coord("4").is_err());
        assert!(parse_coord("a,1").is_err());
        assert!(parse_coord("-1,1").is_err());
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!((config.grid.rows, config.grid.cols), (10, 10));
        assert_eq!(config.grid.obstacle_fraction, 0.3);
        assert_eq!(config.coverage.radius, 2);
        assert_eq!(config.coverage.obstacle_policy, ObstaclePolicy::Overwrite);
        assert_eq!(config.search.start, [4, 4]);
        assert_eq!(config.search.end, [7, 7]);
    }

    #[test]
    fn partial_config_overrides() {
        let config: Config = toml::from_str(
            r#"
            [grid]
            rows = 25
            seed = 9
            layout_file = "inputs/city.txt"

            [coverage]
            obstacle_policy = "preserve"

            [output]
            png = false
            "#,
        )
        .unwrap();
        assert_eq!(config.grid.rows, 25);
        assert_eq!(config.grid.cols, 10);
        assert_eq!(config.grid.seed, Some(9));
        assert_eq!(config.grid.layout_file.as_deref(), Some("inputs/city.txt"));
        assert_eq!(config.coverage.obstacle_policy, ObstaclePolicy::Preserve);
        assert!(!config.output.png);
        assert_eq!(config.output.cell_pixels, 32);
    }

    fn quiet_config(extra: &str) -> Config {
        toml::from_str(&format!("[output]\npng = false\n{}", extra)).unwrap()
    }

    #[test]
    fn preplanned_layout_skips_radius_verification() {
        let path = std::env::temp_dir().join(format!("relay-cli-planned-{}.txt", std::process::id()));
        std::fs::write(&path, "T++\n+++\n").unwrap();
        let config = quiet_config(&format!(
            "[grid]\nlayout_file = {:?}\n[coverage]\nradius = 0\n",
            path.to_str().unwrap()
        ));
        let result = run_planning(&config);
        std::fs::remove_file(&path).ok();

        let grid = result.unwrap();
        assert_eq!(grid.relays(), &[GridCoord::new(0, 0)]);
    }

    #[test]
    fn fresh_grid_is_planned_and_verified() {
        let config = quiet_config("[grid]\nrows = 6\ncols = 6\nseed = 11\n[coverage]\nradius = 1\n");
        let grid = run_planning(&config).unwrap();
        assert!(grid.is_planned());
        assert_eq!(grid.counts().obstructed + grid.counts().covered + grid.counts().free, 36);
    }

    #[test]
    fn search_reports_hops_from_the_path() {
        let config = quiet_config("");
        let grid = layout::parse_str("...\n.#.\n...\n").unwrap();
        let hops = run_search(&config, &grid, GridCoord::new(1, 0), GridCoord::new(1, 2)).unwrap();
        assert_eq!(hops, Hops::Reachable(4));
        let walled = layout::parse_str(".#.\n").unwrap();
        let hops = run_search(&config, &walled, GridCoord::new(0, 0), GridCoord::new(0, 2)).unwrap();
        assert_eq!(hops, Hops::Unreachable);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(toml::from_str::<Config>("[coverage]\nobstacle_policy = \"erase\"").is_err());
    }
}
