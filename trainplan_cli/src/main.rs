use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::path::PathBuf;
use trainplan_core::*;

#[derive(Parser)]
#[command(name = "trainplan")]
#[command(about = "Personalized strength training program generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a multi-week program from questionnaire answers
    Generate {
        /// Training days per week (clamped to 2-6)
        #[arg(long, allow_negative_numbers = true)]
        frequency: Option<i64>,

        /// Program length in weeks
        #[arg(long, allow_negative_numbers = true)]
        weeks: Option<i64>,

        /// Goal, e.g. "Force", "Prise de masse", "Tonification"
        #[arg(long)]
        objective: Option<String>,

        /// Experience level, e.g. "Débutant", "Intermédiaire", "Avancé"
        #[arg(long)]
        level: Option<String>,

        /// Session length, e.g. "30 min", "45 min", "60 min", "90 min"
        #[arg(long)]
        session_duration: Option<String>,

        /// Muscle priority ("haut du corps" or "bas du corps")
        #[arg(long)]
        priority: Option<String>,

        /// Injury site, repeatable (first two are used)
        #[arg(long = "injury")]
        injuries: Vec<String>,

        /// Available equipment, comma separated
        #[arg(long, value_delimiter = ',')]
        equipment: Vec<String>,

        /// Split method (fullbody, upper_lower, ppl, split, none)
        #[arg(long)]
        method: Option<String>,

        /// Owner recorded on the program
        #[arg(long)]
        user_id: Option<String>,

        /// Program title
        #[arg(long, default_value = engine::DEFAULT_TITLE)]
        title: String,

        /// Seed for reproducible exercise selection
        #[arg(long)]
        seed: Option<u64>,

        /// JSON or CSV catalog replacing the configured one
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Show every week instead of the first one
        #[arg(long)]
        all_weeks: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the program to a file (json or csv format); relative paths land in the configured output dir
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List catalog exercises by muscle group and check them
    Catalog {
        /// JSON or CSV catalog replacing the configured one
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Fail when the catalog has validation problems
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

fn main() -> Result<()> {
    // Initialize logging
    trainplan_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Generate {
            frequency,
            weeks,
            objective,
            level,
            session_duration,
            priority,
            injuries,
            equipment,
            method,
            user_id,
            title,
            seed,
            catalog,
            all_weeks,
            format,
            output,
        } => {
            let request = ProfileRequest {
                frequency,
                duration_weeks: weeks,
                objective,
                level,
                session_duration,
                priority,
                injuries,
                equipment_available: equipment,
                preferred_method: method,
                user_id,
            };
            let options = GenerateOptions {
                title,
                seed,
                catalog,
                all_weeks,
                format,
                output,
            };
            cmd_generate(request, options, &config)
        }
        Commands::Catalog { catalog, strict } => cmd_catalog(catalog, strict, &config),
    }
}

struct GenerateOptions {
    title: String,
    seed: Option<u64>,
    catalog: Option<PathBuf>,
    all_weeks: bool,
    format: OutputFormat,
    output: Option<PathBuf>,
}

fn load_configured_catalog(path: Option<PathBuf>, config: &Config) -> Result<Catalog> {
    match path.or_else(|| config.catalog.path.clone()) {
        Some(path) => load_catalog(&path),
        None => Ok(build_default_catalog()),
    }
}

fn cmd_generate(request: ProfileRequest, options: GenerateOptions, config: &Config) -> Result<()> {
    if options.output.is_some() && options.format == OutputFormat::Text {
        return Err(Error::Other(
            "--output needs --format json or --format csv".into(),
        ));
    }

    let catalog = load_configured_catalog(options.catalog, config)?;
    for problem in catalog.validate() {
        tracing::warn!("Catalog: {}", problem);
    }

    let (profile, intake_diagnostics) =
        request.into_profile_with_default_minutes(config.generator.default_session_minutes);

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut generation =
        generate_program_with(&catalog, &profile, &options.title, &config.generator, &mut rng)?;
    let mut diagnostics = intake_diagnostics;
    diagnostics.append(&mut generation.diagnostics);
    generation.diagnostics = diagnostics;

    if !options.all_weeks {
        generation.program = generation.program.first_week_only();
    }

    let output = options
        .output
        .map(|path| config.resolve_output_path(&path));

    match (options.format, output) {
        (OutputFormat::Json, Some(path)) => {
            write_program_json(&generation.program, &path)?;
            println!("✓ Program written to {}", path.display());
            print_diagnostics(&generation.diagnostics);
        }
        (OutputFormat::Csv, Some(path)) => {
            write_program_csv(&generation.program, &path)?;
            println!("✓ Program written to {}", path.display());
            print_diagnostics(&generation.diagnostics);
        }
        (OutputFormat::Json, None) => {
            println!("{}", serde_json::to_string_pretty(&generation)?);
        }
        (OutputFormat::Csv, None) => {
            export::write_csv(&generation.program, io::stdout().lock())?;
        }
        (OutputFormat::Text, _) => {
            display_program(&generation.program, &profile);
            print_diagnostics(&generation.diagnostics);
        }
    }

    Ok(())
}

fn cmd_catalog(path: Option<PathBuf>, strict: bool, config: &Config) -> Result<()> {
    let catalog = load_configured_catalog(path, config)?;

    println!("{} exercises", catalog.len());
    for (group, exercises) in catalog.by_group() {
        println!();
        println!("{} ({})", group, exercises.len());
        for exercise in exercises {
            println!("  {:<28} {:<20} {}", exercise.name, exercise.equipment, exercise.slug);
        }
    }

    let errors = catalog.validate();
    if errors.is_empty() {
        println!("\n✓ Catalog is valid");
        return Ok(());
    }

    eprintln!("Catalog validation errors:");
    for error in &errors {
        eprintln!("  - {}", error);
    }
    if strict {
        return Err(Error::CatalogValidation(format!(
            "{} problem(s) found",
            errors.len()
        )));
    }
    Ok(())
}

fn display_program(program: &Program, profile: &Profile) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", program.title);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  {} · {} · {} days/week · {} weeks",
        profile.objective, profile.experience, profile.frequency, program.duration_weeks
    );

    for week in &program.weeks {
        println!();
        println!("── Semaine {} ──", week.week_number);
        for session in &week.sessions {
            println!();
            println!("  {} (~{} min)", session.title, session.estimated_minutes);
            if session.exercises.is_empty() {
                println!("    rest or light mobility");
            }
            for row in export::session_rows(session) {
                println!(
                    "    {}. {:<28} {} × {} @ RPE {}",
                    row.order_index + 1,
                    row.exercise_name,
                    row.sets,
                    row.reps,
                    row.rpe
                );
            }
        }
    }

    if program.weeks.len() < program.duration_weeks as usize {
        println!();
        println!(
            "  (showing week 1 of {}, use --all-weeks for the full program)",
            program.duration_weeks
        );
    }
    println!();
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    eprintln!("Notes:");
    for diagnostic in diagnostics {
        eprintln!("  ℹ {}", diagnostic);
    }
}
