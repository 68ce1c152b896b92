use census_migration::auxiliary::{ingest_auxiliary, sum_columns};
use census_migration::flows::{self, FlowTotals};
use census_migration::loader::{ingest, read_table_from_reader};
use census_migration::normalize::{is_indian_state, normalize};
use census_migration::schema::{duration, reason};
use census_migration::{Direction, MigrationRecord, Order, Query, RawRow};

fn rows_from(text: &str) -> Vec<RawRow> {
    read_table_from_reader(text.as_bytes()).expect("table parses").0
}

const NEW_HEADERS: &str = "\
AreaName,BirthPlace,Total_Persons,Total_Males,Total_Females,Rural_Persons,Urban_Persons
State - Maharashtra (27),Gujarat,1200,700,500,400,800
State - Maharashtra (27),Bihar,0,0,0,0,0
State - Maharashtra (27),Maharashtra,9000,5000,4000,1000,8000
State - Maharashtra (27),Nepal,300,200,100,100,200
NCT of Delhi,Orissa,250,150,100,50,200
Delhi,Uttar Pradesh,4000,2500,1500,500,3500
State - Karnataka (29),Maharashtra,650,300,350,200,450
";

const OLD_HEADERS: &str = "\
Area Name,Birth place,Total,Male,Female,Rural_Total,Urban_Total
State - Maharashtra (27),Gujarat,1200,700,500,400,800
State - Maharashtra (27),Bihar,0,0,0,0,0
State - Maharashtra (27),Maharashtra,9000,5000,4000,1000,8000
State - Maharashtra (27),Nepal,300,200,100,100,200
NCT of Delhi,Orissa,250,150,100,50,200
Delhi,Uttar Pradesh,4000,2500,1500,500,3500
State - Karnataka (29),Maharashtra,650,300,350,200,450
";

#[test]
fn end_to_end_single_flow() {
    let text = "\
AreaName,BirthPlace,Total,Male,Female,Rural_Total,Urban_Total
Maharashtra,Gujarat,1200,700,500,400,800
Maharashtra,Bihar,0,,,,
";
    let records = ingest(&rows_from(text));
    assert_eq!(records.len(), 1);

    let view = flows::query(&records, &Query::new(Some("MAHARASHTRA"), Direction::Inflow, 0));
    assert_eq!(view.filtered.len(), 1);
    assert_eq!(view.totals.count, 1200);
    assert_eq!(view.totals.male, 700);
    assert!((view.totals.urban_share() - 66.7).abs() < 0.05);
}

#[test]
fn unrepresentable_totals_count_as_zero() {
    let text = "\
AreaName,BirthPlace,Total,Male,Female
Goa,Kerala,1e30,1e30,0
Goa,Bihar,1e30,0,0
Goa,Assam,1e30,0,0
Goa,Punjab,40,25,15
";
    let records = ingest(&rows_from(text));
    assert_eq!(records.len(), 1);
    let view = flows::query(&records, &Query::new(Some("Goa"), Direction::Inflow, 0));
    assert_eq!(view.totals.count, 40);
}

#[test]
fn ingested_records_hold_invariants() {
    let records = ingest(&rows_from(NEW_HEADERS));
    assert_eq!(records.len(), 4);
    for r in &records {
        assert_ne!(r.origin, r.destination);
        assert!(is_indian_state(&r.origin));
        assert!(is_indian_state(&r.destination));
        assert!(r.count > 0);
    }
}

#[test]
fn header_aliases_ingest_identically() {
    let new = ingest(&rows_from(NEW_HEADERS));
    let old = ingest(&rows_from(OLD_HEADERS));
    assert_eq!(new, old);
}

#[test]
fn rural_urban_fall_back_to_gender_columns() {
    let text = "\
AreaName,BirthPlace,Total,Rural_Persons,Rural_Males,Rural_Females,Urban_Persons,Urban_Males,Urban_Females
Goa,Kerala,100,,25,15,0,40,20
";
    let records = ingest(&rows_from(text));
    assert_eq!(records[0].rural, 40);
    assert_eq!(records[0].urban, 60);
}

#[test]
fn delhi_spellings_share_a_bucket() {
    assert_eq!(normalize("Delhi"), normalize("NCT OF DELHI"));
    let records = ingest(&rows_from(NEW_HEADERS));
    let view = flows::query(&records, &Query::new(Some("Delhi"), Direction::Inflow, 0));
    assert_eq!(view.filtered.len(), 2);
    assert_eq!(view.totals.count, 4250);
}

#[test]
fn no_selection_is_empty() {
    let records = ingest(&rows_from(NEW_HEADERS));
    for direction in [Direction::Inflow, Direction::Outflow] {
        let view = flows::query(&records, &Query::new(None, direction, 0));
        assert!(view.filtered.is_empty());
        assert_eq!(view.totals, FlowTotals::default());
    }
}

#[test]
fn outflow_ranks_destinations() {
    let records = ingest(&rows_from(NEW_HEADERS));
    let view = flows::query(&records, &Query::new(Some("Maharashtra"), Direction::Outflow, 0));
    let top = view.top_n(5, Order::Highest);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name, "KARNATAKA");
    assert_eq!(top[0].value, 650);
}

fn many_records() -> Vec<MigrationRecord> {
    let origins = ["BIHAR", "GOA", "KERALA", "PUNJAB", "ASSAM", "SIKKIM", "TRIPURA", "GUJARAT"];
    let counts = [500, 40, 900, 500, 12_000, 7, 900, 3_000];
    origins
        .iter()
        .zip(counts)
        .map(|(o, c)| MigrationRecord {
            origin: o.to_string(),
            destination: "HARYANA".to_string(),
            count: c,
            male: c / 2,
            female: c - c / 2,
            rural: c / 3,
            urban: c - c / 3,
        })
        .collect()
}

#[test]
fn top_n_dominates_remaining_records() {
    let records = many_records();
    let view = flows::query(&records, &Query::new(Some("Haryana"), Direction::Inflow, 0));
    let top = view.top_n(5, Order::Highest);
    let floor = top.iter().map(|r| r.value).min().unwrap();
    let top_names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
    for r in &view.filtered {
        if !top_names.contains(&r.origin.as_str()) {
            assert!(r.count <= floor);
        }
    }
}

#[test]
fn highest_and_lowest_are_opposite_orders() {
    let records = many_records();
    let view = flows::query(&records, &Query::new(Some("Haryana"), Direction::Inflow, 0));
    let k = view.filtered.len();
    let high: Vec<u64> = view.top_n(k, Order::Highest).iter().map(|r| r.value).collect();
    let mut low: Vec<u64> = view.top_n(k, Order::Lowest).iter().map(|r| r.value).collect();
    low.reverse();
    assert_eq!(high, low);
}

#[test]
fn raising_threshold_never_grows_the_view() {
    let records = many_records();
    let mut previous = usize::MAX;
    for threshold in (0..=13_000).step_by(500) {
        let view = flows::query(&records, &Query::new(Some("Haryana"), Direction::Inflow, threshold));
        assert!(view.filtered.len() <= previous);
        previous = view.filtered.len();
    }
}

#[test]
fn auxiliary_tables_match_by_entity_only() {
    let text = "\
AreaName,LastResidence,Persons_LT1yr,Persons_20plusyr,Persons_Work,Males_Work,Females_Work
Maharashtra,Gujarat,5,100,40,30,10
MAHARASHTRA,Orissa,1,,2,,x
Gujarat,Maharashtra,9,9,9,9,9
";
    let rows = ingest_auxiliary(rows_from(text));
    let q = Query::new(Some("Maharashtra"), Direction::Inflow, 1_000_000);

    let durations = sum_columns(&rows, &q, &duration::columns());
    assert_eq!(durations[duration::LT_1YR], 6);
    assert_eq!(durations[duration::Y20_PLUS], 100);
    assert_eq!(durations[duration::NOT_STATED], 0);

    let males = sum_columns(&rows, &q, &reason::columns(reason::Breakdown::Males));
    assert_eq!(males["Males_Work"], 30);
    let females = sum_columns(&rows, &q, &reason::columns(reason::Breakdown::Females));
    assert_eq!(females["Females_Work"], 10);
}

#[test]
fn empty_auxiliary_table_sums_to_zero() {
    let cols = reason::columns(reason::Breakdown::Persons);
    let sums = sum_columns(&[], &Query::new(Some("Goa"), Direction::Outflow, 0), &cols);
    assert_eq!(sums.len(), 7);
    assert!(sums.values().all(|v| *v == 0));
}

#[test]
fn empty_flow_set_gives_zero_totals() {
    let records: Vec<MigrationRecord> = ingest(&rows_from("AreaName,BirthPlace,Total\n"));
    let view = flows::query(&records, &Query::new(Some("Goa"), Direction::Inflow, 0));
    assert_eq!(view.totals, FlowTotals::default());
    assert_eq!(view.totals.male_female_ratio(), None);
}
