// Entry point and high-level CLI flow.
//
// The binary stands in for the dashboard front end:
// - Option [1] loads the three census tables in parallel.
// - Options [2]-[5] change the selection, direction, threshold and ranking
//   order, the same inputs the map and sidebar provide.
// - Option [6] prints the state profile and exports it to files.
use anyhow::Result;
use census_migration::config::{load_config, Config, DataConfig};
use census_migration::flows::{self, FlowView};
use census_migration::normalize::{census_availability, is_indian_state, normalize, CensusAvailability};
use census_migration::store::{DatasetStore, TableSlot};
use census_migration::util::{format_int, format_number, non_negative, parse_count_safe};
use census_migration::{geo, loader, output, reports, Direction, Order, Query};
use clap::Parser;
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

// Loaded tables for the whole run; the menu can reload them at any time.
static STORE: Lazy<DatasetStore> = Lazy::new(DatasetStore::new);

#[derive(Debug, Parser)]
#[command(name = "census-migration", version, about = "Explore Census 2011 state-to-state migration")]
struct Cli {
    /// Optional config file (YAML). If omitted, loads ./census.yaml if present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Primary flow table (place of birth)
    #[arg(long)]
    flows: Option<PathBuf>,
    /// Duration-of-stay table
    #[arg(long)]
    duration: Option<PathBuf>,
    /// Reason-for-migration table
    #[arg(long)]
    reasons: Option<PathBuf>,
    /// Print one profile for this state and exit
    #[arg(long)]
    state: Option<String>,
    #[arg(long, value_enum)]
    direction: Option<Direction>,
    /// Minimum migrants per flow
    #[arg(long)]
    threshold: Option<u64>,
    /// Number of counterparts in the ranking
    #[arg(long)]
    top: Option<usize>,
    #[arg(long, value_enum)]
    order: Option<Order>,
    /// Directory for exported CSV / JSON files
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl Cli {
    fn apply(self, mut cfg: Config) -> (Config, Option<String>) {
        if let Some(p) = self.flows {
            cfg.data.flows = p;
        }
        if let Some(p) = self.duration {
            cfg.data.duration = p;
        }
        if let Some(p) = self.reasons {
            cfg.data.reasons = p;
        }
        if let Some(d) = self.direction {
            cfg.view.direction = d;
        }
        if let Some(t) = self.threshold {
            cfg.view.threshold = t;
        }
        if let Some(k) = self.top {
            cfg.view.top = k;
        }
        if let Some(o) = self.order {
            cfg.view.order = o;
        }
        if let Some(dir) = self.output_dir {
            cfg.output_dir = dir;
        }
        (cfg, self.state)
    }
}

/// UI-side selection state. Every profile render turns it into a fresh
/// `Query`.
struct ViewState {
    selected: Option<String>,
    direction: Direction,
    threshold: u64,
    top: usize,
    order: Order,
}

impl ViewState {
    fn query(&self) -> Query {
        Query::new(self.selected.as_deref(), self.direction, self.threshold)
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Handle option [1]: load all three tables concurrently.
fn handle_load(paths: &DataConfig) {
    let jobs = [
        (TableSlot::Flows, paths.flows.as_path()),
        (TableSlot::Duration, paths.duration.as_path()),
        (TableSlot::Reasons, paths.reasons.as_path()),
    ];
    std::thread::scope(|s| {
        for (slot, path) in jobs {
            let ticket = STORE.begin_load(slot);
            s.spawn(move || {
                let result = loader::read_table(path);
                if let Err(e) = &result {
                    error!(path = %path.display(), "failed to read table: {}", e);
                }
                STORE.finish_load(ticket, result);
            });
        }
    });

    if let Some(report) = STORE.flow_report() {
        println!(
            "Processing dataset... ({} rows read, {} domestic flows kept)",
            format_int(report.total_rows),
            format_int(report.kept_rows)
        );
        println!(
            "Note: skipped {} zero-count, {} same-state and {} non-domestic rows.",
            format_int(report.zero_count),
            format_int(report.self_loops),
            format_int(report.non_domestic)
        );
    }
    println!(
        "Auxiliary tables: {} duration rows, {} reason rows.\n",
        format_int(STORE.duration().len()),
        format_int(STORE.reasons().len())
    );
}

fn handle_select(view: &mut ViewState) {
    let name = normalize(&read_line("State name: "));
    if name.is_empty() {
        println!("No state entered.\n");
        return;
    }
    if !is_indian_state(&name) {
        println!("Unknown state '{}'.\n", name);
        return;
    }
    println!("Selected {}.\n", name);
    view.selected = Some(name);
}

fn handle_threshold(view: &mut ViewState) {
    let input = read_line("Minimum migrants: ");
    match parse_count_safe(Some(input.as_str())) {
        Some(v) => {
            view.threshold = non_negative(v);
            println!("Threshold set to {}.\n", format_int(view.threshold));
        }
        None => println!("Invalid number.\n"),
    }
}

fn export_profile(dir: &Path, view: &FlowView<'_>, query: &Query) -> census_migration::Result<()> {
    std::fs::create_dir_all(dir)?;
    output::write_csv(dir.join("counterparts.csv"), &reports::generate_counterpart_table(view))?;
    output::write_csv(dir.join("duration.csv"), &reports::generate_duration_report(&STORE.duration(), query))?;
    output::write_csv(dir.join("reasons.csv"), &reports::generate_reason_report(&STORE.reasons(), query))?;
    output::write_json(dir.join("summary.json"), &reports::generate_summary(view))?;
    output::write_json(dir.join("flow_lines.json"), &geo::flow_lines(view))?;
    Ok(())
}

/// Handle option [6]: print every panel of the state profile.
fn handle_profile(view_state: &ViewState, output_dir: &Path) {
    let query = view_state.query();
    let Some(entity) = query.selected() else {
        println!("Error: No state selected. Please select a state first (option 2).\n");
        return;
    };
    if let CensusAvailability::NotEnumerated { formed } = census_availability(entity) {
        println!("{}\nData Not Available", entity);
        println!("{} was formed in {}. This data is from Census 2011.\n", entity, formed);
        return;
    }

    let records = STORE.flows();
    let view = flows::query(&records, &query);
    let totals = view.totals;
    let side = match query.direction {
        Direction::Inflow => "From",
        Direction::Outflow => "To",
    };

    println!("{}", entity);
    println!("Domestic {} (min. {} migrants)\n", query.direction.label(), format_int(query.threshold));
    println!("Total {}: {}\n", query.direction.label(), format_int(totals.count));

    let chart_title = match view_state.order {
        Order::Highest => "Top State Counterparts",
        Order::Lowest => "Bottom State Counterparts",
    };
    output::preview_table(chart_title, None, &reports::generate_ranking(&view, view_state.top, view_state.order), view_state.top);
    output::preview_table(
        &format!("State Migration ({})", side),
        Some("highest first"),
        &reports::generate_counterpart_table(&view),
        usize::MAX,
    );

    let ratio = totals
        .male_female_ratio()
        .map(|r| format_number(r, 2))
        .unwrap_or_else(|| "N/A".to_string());
    output::preview_table(
        "Gender Breakdown",
        Some(format!("M:F Ratio = {}", ratio).as_str()),
        &reports::generate_gender_breakdown(&totals),
        2,
    );
    output::preview_table(
        "Urban / Rural Breakdown",
        Some(format!("Urban share: {}%", format_number(totals.urban_share(), 1)).as_str()),
        &reports::generate_area_breakdown(&totals),
        2,
    );
    output::preview_table("Duration of Stay", None, &reports::generate_duration_report(&STORE.duration(), &query), usize::MAX);
    output::preview_table("Reason for Migration", None, &reports::generate_reason_report(&STORE.reasons(), &query), usize::MAX);

    match export_profile(output_dir, &view, &query) {
        Ok(()) => println!("(Tables exported to {})\n", output_dir.display()),
        Err(e) => eprintln!("Write error: {}", e),
    }
}

fn run_menu(cfg: &Config, mut view: ViewState) {
    loop {
        println!("Select an action:");
        println!("[1] Load the files");
        println!("[2] Select state");
        println!("[3] Toggle inflow/outflow (now: {})", view.direction);
        println!("[4] Set minimum migrants (now: {})", format_int(view.threshold));
        println!("[5] Toggle highest/lowest ranking");
        println!("[6] Show state profile");
        println!("[7] Clear selection");
        println!("[0] Exit\n");
        match read_line("Enter choice: ").as_str() {
            "1" => handle_load(&cfg.data),
            "2" => handle_select(&mut view),
            "3" => view.direction = view.direction.toggled(),
            "4" => handle_threshold(&mut view),
            "5" => view.order = view.order.toggled(),
            "6" => handle_profile(&view, &cfg.output_dir),
            "7" => view.selected = None,
            "0" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter 0-7.\n"),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;
    let (cfg, state) = cli.apply(cfg);
    info!(flows = %cfg.data.flows.display(), "census-migration starting");

    let view = ViewState {
        selected: None,
        direction: cfg.view.direction,
        threshold: cfg.view.threshold,
        top: cfg.view.top,
        order: cfg.view.order,
    };

    match state {
        Some(raw) => {
            let name = normalize(&raw);
            if !is_indian_state(&name) {
                warn!(state = %raw, "not a recognised state or union territory");
            }
            handle_load(&cfg.data);
            handle_profile(&ViewState { selected: Some(name), ..view }, &cfg.output_dir);
        }
        None => run_menu(&cfg, view),
    }
    Ok(())
}
