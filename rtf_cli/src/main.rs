use clap::{Parser, Subcommand, ValueEnum};
use rtf_core::export::{save_atomic, write_program_csv, write_program_json};
use rtf_core::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rtf")]
#[command(about = "Reps to Failure program calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(clap::Args)]
struct ProgramArgs {
    /// Starting training max (kg)
    #[arg(long)]
    weight: f64,

    /// Program style (standard, hypertrophy)
    #[arg(long)]
    style: Option<String>,

    /// Generate the 18-week layout without deload weeks
    #[arg(long)]
    no_deloads: bool,

    /// Rounding increment (kg)
    #[arg(long)]
    increment: Option<f64>,

    /// Performance history (.json or .csv)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Use the basic hypertrophy calculator (week 1 weight override)
    #[arg(long, conflicts_with_all = ["style", "increment"])]
    basic: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a program
    Generate {
        #[command(flatten)]
        program: ProgramArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show training max adjustments over the program
    Trend {
        #[command(flatten)]
        program: ProgramArgs,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    rtf_core::logging::init_with_level(rtf_core::logging::level_for_verbosity(cli.verbose));

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Generate {
            program,
            format,
            output,
        } => cmd_generate(&config, &program, format, output.as_deref()),
        Commands::Trend { program } => cmd_trend(&config, &program),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn build_program(
    config: &Config,
    args: &ProgramArgs,
) -> Result<(ProgressionConfig, Vec<WeeklyLog>)> {
    let history = match &args.history {
        Some(path) => load_history(path)?,
        None => Vec::new(),
    };
    let with_deloads = if args.no_deloads { Some(false) } else { None };

    if args.basic {
        let with_deloads = with_deloads.unwrap_or(config.program.with_deloads);
        let weeks = basic_hypertrophy::generate(args.weight, with_deloads, &history)?;
        let settings =
            ProgressionConfig::new(args.weight, ProgramStyle::Hypertrophy, with_deloads)
                .with_increment(ProgramStyle::Hypertrophy.default_increment_kg());
        return Ok((settings, weeks));
    }

    let style = args
        .style
        .as_deref()
        .map(str::parse::<ProgramStyle>)
        .transpose()?;
    let settings = config.progression_config(args.weight, style, with_deloads, args.increment);
    let weeks = generate_program(&settings, &history)?;

    tracing::debug!("Built {} weeks for {:?}", weeks.len(), settings);
    Ok((settings, weeks))
}

fn cmd_generate(
    config: &Config,
    args: &ProgramArgs,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let (settings, weeks) = build_program(config, args)?;

    match output {
        Some(path) => {
            save_atomic(path, |w| render(&settings, &weeks, format, w))?;
            println!("✓ Wrote {} weeks to {}", weeks.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            render(&settings, &weeks, format, &mut handle)?;
            handle.flush()?;
        }
    }

    Ok(())
}

fn cmd_trend(config: &Config, args: &ProgramArgs) -> Result<()> {
    let (settings, weeks) = build_program(config, args)?;
    let points = tm_trend(&weeks);

    println!(
        "{} TM trend from {}kg",
        settings.style,
        progression::format_kg(settings.initial_weight)
    );

    if points.is_empty() {
        println!("  No TM adjustments.");
        return Ok(());
    }

    for point in &points {
        println!(
            "  Week {:>2}: {} -> {}kg ({:+.1}%)",
            point.week,
            progression::format_kg(point.adjustment.previous_tm),
            progression::format_kg(point.adjustment.new_tm),
            point.adjustment.percent_change
        );
    }

    Ok(())
}

fn render<W: Write>(
    settings: &ProgressionConfig,
    weeks: &[WeeklyLog],
    format: OutputFormat,
    mut writer: W,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(settings, weeks, &mut writer),
        OutputFormat::Json => {
            let export = ProgramExport::new(settings.clone(), weeks.to_vec());
            write_program_json(&export, &mut writer)
        }
        OutputFormat::Csv => write_program_csv(weeks, &mut writer),
    }
}

fn write_table<W: Write>(
    settings: &ProgressionConfig,
    weeks: &[WeeklyLog],
    writer: &mut W,
) -> Result<()> {
    writeln!(writer, "╭─────────────────────────────────────────╮")?;
    writeln!(
        writer,
        "│  {} PROGRAM ({} weeks)",
        settings.style,
        weeks.len()
    )?;
    writeln!(writer, "╰─────────────────────────────────────────╯")?;
    writeln!(
        writer,
        "  Starting TM: {}kg, rounding to {}kg",
        progression::format_kg(settings.initial_weight),
        progression::format_kg(settings.increment_kg())
    )?;
    writeln!(writer)?;

    for log in weeks {
        writeln!(writer, "  Week {:>2}  {}", log.week, log.goal)?;
        if log.action != "-" {
            writeln!(writer, "           → {}", log.action)?;
        }
    }

    writeln!(writer)?;
    Ok(())
}
