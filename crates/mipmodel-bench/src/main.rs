use clap::{Parser, Subcommand, ValueEnum};
use mipmodel_core::{ComparisonSense, ConstraintId, Model, PrettyPrintOptions, VariableId};
use mipmodel_tools::{MeasurementRecorder, StageMeasurement, capture_rss_bytes, rss_delta};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

const DEFAULT_CASES: [usize; 4] = [100, 1_000, 10_000, 100_000];
const SCHEMA_VERSION: u32 = 1;

#[derive(Parser, Debug)]
#[command(author, version, about = "mipmodel model-building benchmark runner")]
struct Cli {
    /// Log filter directive (falls back to MIPMODEL_TRACE)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build synthetic models and measure each stage
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Comma-separated list of variable counts
    #[arg(long, value_delimiter = ',')]
    cases: Option<Vec<usize>>,

    /// Run a single case with this variable count
    #[arg(long)]
    variables: Option<usize>,

    /// Override number of constraints for --variables
    #[arg(long, requires = "variables")]
    constraints: Option<usize>,

    /// Ratio of constraints per variable when explicit constraints are not provided
    #[arg(long, default_value_t = 0.01)]
    constraint_ratio: f64,

    /// How many times every term is repeated before canonicalization
    #[arg(long, default_value_t = 1)]
    duplicates: usize,

    /// Add a diagonal quadratic objective term per variable
    #[arg(long)]
    quadratic: bool,

    /// Number of repetitions per case
    #[arg(long, default_value_t = 1)]
    repetitions: u32,

    /// Skip resident memory sampling
    #[arg(long)]
    no_memory: bool,

    /// JSONL output artifact path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Print a preview of the last built model
    #[arg(long)]
    show_model: bool,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Ndjson,
}

#[derive(Debug, Clone)]
struct CaseConfig {
    name: String,
    variables: usize,
    constraints: Option<usize>,
}

#[derive(Debug)]
struct CaseExecution {
    variables: usize,
    constraints: usize,
    raw_terms: usize,
    canonical_terms: usize,
    stage_measurements: Vec<StageMeasurement>,
    model: Model,
}

#[derive(Debug, Clone, Serialize)]
struct BenchRecord {
    schema_version: u32,
    run_id: String,
    case_name: String,
    repetition: u32,
    variables: usize,
    constraints: usize,
    raw_terms: usize,
    canonical_terms: usize,
    stage: String,
    duration_ms: f64,
    rss_before_bytes: Option<u64>,
    rss_after_bytes: Option<u64>,
    rss_delta_bytes: Option<i64>,
}

#[derive(Debug, Clone, Eq, Ord, PartialEq, PartialOrd)]
struct SummaryKey {
    case_name: String,
    stage: String,
}

#[derive(Debug, Clone, Serialize)]
struct SummaryRow {
    case_name: String,
    stage: String,
    samples: usize,
    mean_duration_ms: f64,
    max_duration_ms: f64,
    mean_rss_delta_bytes: Option<f64>,
    max_rss_after_bytes: Option<u64>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    mipmodel_tools::enable_logging(cli.log_level)?;
    match cli.command {
        Command::Run(args) => run_command(args),
    }
}

fn run_command(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.repetitions == 0 {
        return Err(boxed_input_error("repetitions must be greater than zero"));
    }
    if args.duplicates == 0 {
        return Err(boxed_input_error("duplicates must be greater than zero"));
    }
    if args.constraint_ratio <= 0.0 {
        return Err(boxed_input_error(
            "constraint-ratio must be greater than zero",
        ));
    }

    let run_id = build_run_id()?;
    let mut records = Vec::new();
    let mut last_model = None;

    for case in resolve_cases(&args) {
        for rep_idx in 0..args.repetitions {
            let execution = execute_case(&case, &args)?;
            records.extend(case_records(&run_id, &case.name, rep_idx + 1, &execution));
            last_model = Some(execution.model);
        }
    }

    if let Some(path) = args.output.as_ref() {
        write_records_jsonl(path, &records)?;
    }
    render_output(args.format, &records)?;
    if let Some(path) = args.output.as_ref() {
        println!("artifact: {}", path.display());
    }
    if let (true, Some(model)) = (args.show_model, last_model.as_ref()) {
        println!("{}", model.format_model(PrettyPrintOptions::preview()));
    }

    Ok(())
}

fn resolve_cases(args: &RunArgs) -> Vec<CaseConfig> {
    if let Some(variables) = args.variables {
        return vec![CaseConfig {
            name: format!("vars_{}", variables),
            variables,
            constraints: args.constraints,
        }];
    }

    args.cases
        .clone()
        .unwrap_or_else(|| DEFAULT_CASES.to_vec())
        .into_iter()
        .map(|variables| CaseConfig {
            name: format!("vars_{}", variables),
            variables,
            constraints: None,
        })
        .collect()
}

fn constraint_count(case: &CaseConfig, constraint_ratio: f64) -> usize {
    case.constraints
        .unwrap_or_else(|| (case.variables as f64 * constraint_ratio).round() as usize)
        .max(1)
}

/// Build one synthetic model. Every variable appears in exactly one
/// constraint and in the objective, each term repeated `duplicates` times.
fn execute_case(
    case: &CaseConfig,
    args: &RunArgs,
) -> Result<CaseExecution, Box<dyn std::error::Error>> {
    let variable_count = case.variables;
    let constraint_count = constraint_count(case, args.constraint_ratio);

    let mut model = Model::with_capacities(variable_count, constraint_count);
    let mut recorder = if args.no_memory {
        MeasurementRecorder::without_memory()
    } else {
        MeasurementRecorder::new()
    };

    let total_started = Instant::now();
    let total_rss_before = if args.no_memory {
        None
    } else {
        capture_rss_bytes("total")
    };

    let stage_start = recorder.begin_stage("variables");
    let mut vars: Vec<VariableId> = Vec::with_capacity(variable_count);
    for idx in 0..variable_count {
        let var = match idx % 3 {
            0 => model.new_float(0.0, 1_000.0)?,
            1 => model.new_int(0, 100),
            _ => model.new_bool(),
        };
        vars.push(var);
    }
    recorder.end_stage(stage_start);

    let stage_start = recorder.begin_stage("constraints");
    let mut rows: Vec<ConstraintId> = Vec::with_capacity(constraint_count);
    for _ in 0..constraint_count {
        rows.push(model.new_constraint(ComparisonSense::LessEqual, 10_000.0)?);
    }
    recorder.end_stage(stage_start);

    let stage_start = recorder.begin_stage("constraint_terms");
    for _ in 0..args.duplicates {
        for (idx, &var) in vars.iter().enumerate() {
            model.add_constraint_term(rows[idx % rows.len()], 1.0, var)?;
        }
    }
    recorder.end_stage(stage_start);

    let stage_start = recorder.begin_stage("objective_terms");
    for _ in 0..args.duplicates {
        for (idx, &var) in vars.iter().enumerate() {
            model.add_objective_term((idx % 7 + 1) as f64, var)?;
            if args.quadratic {
                model.add_objective_quadratic_term(0.5, var, var)?;
            }
        }
    }
    recorder.end_stage(stage_start);

    let raw_terms = model.objective().raw_terms().len()
        + model.objective().raw_quadratic_terms().len()
        + model
            .iter_constraints()
            .map(|constraint| constraint.raw_terms().len())
            .sum::<usize>();

    let stage_start = recorder.begin_stage("canonicalize");
    let canonical_terms = model.objective().terms().len()
        + model.objective().quadratic_terms().len()
        + model
            .iter_constraints()
            .map(|constraint| constraint.terms().len())
            .sum::<usize>();
    recorder.end_stage(stage_start);

    let stage_start = recorder.begin_stage("copy");
    let copy = model.copy();
    recorder.end_stage(stage_start);

    let total_duration = total_started.elapsed();
    let total_rss_after = if args.no_memory {
        None
    } else {
        capture_rss_bytes("total")
    };

    let mut stages = recorder.stages().to_vec();
    stages.push(StageMeasurement {
        stage: "total".to_string(),
        duration: total_duration,
        rss_before_bytes: total_rss_before,
        rss_after_bytes: total_rss_after,
        rss_delta_bytes: rss_delta(total_rss_before, total_rss_after),
    });

    Ok(CaseExecution {
        variables: copy.num_variables(),
        constraints: copy.num_constraints(),
        raw_terms,
        canonical_terms,
        stage_measurements: stages,
        model,
    })
}

fn case_records(
    run_id: &str,
    case_name: &str,
    repetition: u32,
    execution: &CaseExecution,
) -> Vec<BenchRecord> {
    execution
        .stage_measurements
        .iter()
        .map(|measurement| BenchRecord {
            schema_version: SCHEMA_VERSION,
            run_id: run_id.to_string(),
            case_name: case_name.to_string(),
            repetition,
            variables: execution.variables,
            constraints: execution.constraints,
            raw_terms: execution.raw_terms,
            canonical_terms: execution.canonical_terms,
            stage: measurement.stage.clone(),
            duration_ms: measurement.duration.as_secs_f64() * 1000.0,
            rss_before_bytes: measurement.rss_before_bytes,
            rss_after_bytes: measurement.rss_after_bytes,
            rss_delta_bytes: measurement.rss_delta_bytes,
        })
        .collect()
}

fn render_output(
    format: OutputFormat,
    records: &[BenchRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Table => {
            let rows = summarize_records(records);
            print_summary_table(&rows);
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
            Ok(())
        }
        OutputFormat::Ndjson => {
            for record in records {
                println!("{}", serde_json::to_string(record)?);
            }
            Ok(())
        }
    }
}

fn summarize_records(records: &[BenchRecord]) -> Vec<SummaryRow> {
    #[derive(Default)]
    struct Acc {
        samples: usize,
        duration_sum: f64,
        duration_max: f64,
        rss_delta_sum: f64,
        rss_delta_count: usize,
        rss_after_max: Option<u64>,
    }

    let mut groups: BTreeMap<SummaryKey, Acc> = BTreeMap::new();
    for record in records {
        let key = SummaryKey {
            case_name: record.case_name.clone(),
            stage: record.stage.clone(),
        };
        let entry = groups.entry(key).or_default();
        entry.samples += 1;
        entry.duration_sum += record.duration_ms;
        entry.duration_max = entry.duration_max.max(record.duration_ms);
        if let Some(delta) = record.rss_delta_bytes {
            entry.rss_delta_sum += delta as f64;
            entry.rss_delta_count += 1;
        }
        entry.rss_after_max = entry.rss_after_max.max(record.rss_after_bytes);
    }

    groups
        .into_iter()
        .map(|(key, acc)| SummaryRow {
            case_name: key.case_name,
            stage: key.stage,
            samples: acc.samples,
            mean_duration_ms: if acc.samples == 0 {
                0.0
            } else {
                acc.duration_sum / acc.samples as f64
            },
            max_duration_ms: acc.duration_max,
            mean_rss_delta_bytes: (acc.rss_delta_count > 0)
                .then(|| acc.rss_delta_sum / acc.rss_delta_count as f64),
            max_rss_after_bytes: acc.rss_after_max,
        })
        .collect()
}

fn print_summary_table(rows: &[SummaryRow]) {
    println!(
        "{:<16} {:<18} {:>7} {:>12} {:>12} {:>14} {:>14}",
        "case", "stage", "samples", "mean_ms", "max_ms", "mean_rss_mb", "max_rss_mb"
    );
    for row in rows {
        println!(
            "{:<16} {:<18} {:>7} {:>12.3} {:>12.3} {:>14} {:>14}",
            row.case_name,
            row.stage,
            row.samples,
            row.mean_duration_ms,
            row.max_duration_ms,
            format_option_mb_f64(row.mean_rss_delta_bytes),
            format_option_mb_f64(row.max_rss_after_bytes.map(|bytes| bytes as f64)),
        );
    }
}

fn format_option_mb_f64(value: Option<f64>) -> String {
    value.map_or_else(
        || "-".to_string(),
        |bytes| format!("{:.3}", bytes / (1024.0 * 1024.0)),
    )
}

fn write_records_jsonl(
    path: &Path,
    records: &[BenchRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn build_run_id() -> Result<String, Box<dyn std::error::Error>> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| std::io::Error::other(err.to_string()))?
        .as_millis();
    Ok(format!("bench_{}", millis))
}

fn boxed_input_error(message: &str) -> Box<dyn std::error::Error> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        message.to_string(),
    ))
}
