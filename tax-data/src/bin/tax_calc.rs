use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::{
    IncomeComponents, IncomeSweep, IncomeType, SystemComparison, TaxParameterPreset, TaxSystem,
    TaxpayerCharacteristics,
};
use tracing::debug;

use tax_data::logging::init_logging;
use tax_data::{
    BracketLoader, ComparisonReport, DEFAULT_PRESET, PresetList, PresetLoader, PresetRegistry,
    ResultReport, SweepReport,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Finnish earned income tax calculator.
///
/// Computes contributions, deductions, taxes, net income and effective and
/// marginal tax rates for a taxpayer under a named parameter preset.
#[derive(Debug, Parser)]
#[command(name = "tax-calc", version, about)]
struct Cli {
    /// TOML file with additional presets. Presets with a built-in key
    /// replace the built-in one.
    #[arg(long, global = true)]
    presets: Option<PathBuf>,

    /// CSV file with state income tax brackets (`min,rate` or
    /// `min,max,rate`) replacing those of the current preset.
    #[arg(long, global = true)]
    brackets: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the available presets.
    Presets,

    /// Calculate the tax burden under one preset.
    Calculate {
        #[command(flatten)]
        person: PersonArgs,

        #[command(flatten)]
        income: IncomeArgs,

        /// Preset to calculate with.
        #[arg(long, default_value = DEFAULT_PRESET)]
        preset: String,
    },

    /// Compare the tax burden under two presets.
    Compare {
        #[command(flatten)]
        person: PersonArgs,

        #[command(flatten)]
        income: IncomeArgs,

        #[command(flatten)]
        systems: SystemArgs,
    },

    /// Compare two presets over a range of incomes.
    Sweep {
        #[command(flatten)]
        person: PersonArgs,

        #[command(flatten)]
        systems: SystemArgs,

        /// Income stream the swept amount is placed in.
        #[arg(long, default_value = "work", value_parser = parse_income_type)]
        income_type: IncomeType,

        #[arg(long, default_value = "0")]
        start: Decimal,

        #[arg(long, default_value = "180000")]
        end: Decimal,

        #[arg(long, default_value = "120")]
        step: Decimal,
    },
}

#[derive(Debug, Args)]
struct PersonArgs {
    /// Age in whole years.
    #[arg(long, default_value_t = 35)]
    age: u32,

    /// Member of the Evangelical Lutheran or Orthodox Church.
    #[arg(long)]
    church: bool,

    /// Number of dependent children.
    #[arg(long, default_value_t = 0)]
    children: u32,

    #[arg(long)]
    single_parent: bool,

    /// Union membership fee as a percentage of work income.
    #[arg(long, value_name = "PCT")]
    union_fee: Option<Decimal>,
}

impl From<&PersonArgs> for TaxpayerCharacteristics {
    fn from(args: &PersonArgs) -> Self {
        TaxpayerCharacteristics {
            age: args.age,
            is_church_member: args.church,
            dependent_children: args.children,
            is_single_parent: args.single_parent,
            is_union_member: args.union_fee.is_some(),
            union_fee_percentage: args.union_fee.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Args)]
struct IncomeArgs {
    #[arg(long, default_value = "0")]
    work: Decimal,

    #[arg(long, default_value = "0")]
    pension: Decimal,

    /// Other earned income, e.g. social benefits.
    #[arg(long, default_value = "0")]
    other: Decimal,
}

impl From<&IncomeArgs> for IncomeComponents {
    fn from(args: &IncomeArgs) -> Self {
        IncomeComponents::new(args.work, args.pension, args.other)
    }
}

#[derive(Debug, Args)]
struct SystemArgs {
    /// Preset for the current system.
    #[arg(long, default_value = "2026_he")]
    preset: String,

    /// Preset for the reference system.
    #[arg(long, default_value = "2026_base")]
    reference: String,
}

fn parse_income_type(s: &str) -> Result<IncomeType, String> {
    IncomeType::parse(s).ok_or_else(|| format!("expected 'work' or 'pension', got '{s}'"))
}

// ─── helpers ─────────────────────────────────────────────────────────────────

fn load_registry(cli: &Cli) -> Result<PresetRegistry> {
    let mut registry = PresetRegistry::builtin();

    if let Some(path) = &cli.presets {
        let loaded = PresetLoader::load_file(path, &registry)
            .with_context(|| format!("Failed to load presets: {}", path.display()))?;
        debug!(count = loaded.len(), path = %path.display(), "Loaded preset file");
        registry.extend(loaded);
    }

    Ok(registry)
}

/// The system the user is evaluating, with `--brackets` applied.
fn current_system(
    cli: &Cli,
    registry: &PresetRegistry,
    key: &str,
) -> Result<TaxSystem> {
    let mut parameters = registry.get(key)?.parameters.clone();

    if let Some(path) = &cli.brackets {
        parameters.state_income_tax_brackets = BracketLoader::load_file(path)
            .with_context(|| format!("Failed to load brackets: {}", path.display()))?;
    }

    Ok(TaxSystem::new(&parameters))
}

#[derive(Serialize)]
struct PresetSummary<'a> {
    key: &'a str,
    #[serde(flatten)]
    preset: &'a TaxParameterPreset,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = load_registry(&cli)?;

    match &cli.command {
        Command::Presets => {
            if cli.json {
                let presets: Vec<PresetSummary<'_>> = registry
                    .iter()
                    .map(|(key, preset)| PresetSummary { key, preset })
                    .collect();
                print_json(&presets)?;
            } else {
                print!("{}", PresetList(&registry));
            }
        }
        Command::Calculate {
            person,
            income,
            preset,
        } => {
            let system = current_system(&cli, &registry, preset)?;
            let result = system.calculate(&person.into(), &income.into());

            if cli.json {
                print_json(&result)?;
            } else {
                print!("{}", ResultReport(&result));
            }
        }
        Command::Compare {
            person,
            income,
            systems,
        } => {
            let current = current_system(&cli, &registry, &systems.preset)?;
            let reference = registry.tax_system(&systems.reference)?;
            let point =
                SystemComparison::new(&current, &reference).compare(&person.into(), &income.into());

            if cli.json {
                print_json(&point)?;
            } else {
                print!(
                    "{}",
                    ComparisonReport {
                        current: &systems.preset,
                        reference: &systems.reference,
                        point: &point,
                    }
                );
            }
        }
        Command::Sweep {
            person,
            systems,
            income_type,
            start,
            end,
            step,
        } => {
            let current = current_system(&cli, &registry, &systems.preset)?;
            let reference = registry.tax_system(&systems.reference)?;
            let sweep = IncomeSweep::new(*start, *end, *step);
            let points =
                SystemComparison::new(&current, &reference).sweep(&person.into(), *income_type, &sweep);

            if cli.json {
                print_json(&points)?;
            } else {
                print!("{}", SweepReport(&points));
            }
        }
    }

    Ok(())
}
