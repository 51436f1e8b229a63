//! Verrux: Wart treatment decision support
//! Entry point for the `verrux` binary.

mod config;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use verrux_common::{Gender, PatientProfile, SideEffectSeverity, TreatmentRequest};
use verrux_model::ModelArtifacts;
use verrux_ranker::{report, CostEstimator, PredictionContext};

#[derive(Parser)]
#[command(name = "verrux", version, about = "Predict and rank wart treatment outcomes")]
struct Cli {
    /// Path to verrux.toml
    #[arg(long, global = true, env = "VERRUX_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the exported model artifacts
    #[arg(long, global = true, env = "VERRUX_MODEL_DIR")]
    model_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict success probability for one treatment method
    Predict(PredictArgs),
    /// Rank every known treatment method for a patient
    Rank(PatientArgs),
    /// List the lesion types and treatment methods the model supports
    Catalog,
    /// Show the heuristic cost estimate for a treatment
    Cost(CostArgs),
    /// Serve the JSON API
    Serve {
        #[arg(long, env = "VERRUX_BIND")]
        bind: Option<String>,
    },
}

#[derive(Args)]
struct PatientArgs {
    #[arg(long, default_value_t = 30)]
    age: u32,
    #[arg(long)]
    gender: Gender,
    #[arg(long)]
    lesion: String,
    #[arg(long, default_value = "None")]
    side_effects: SideEffectSeverity,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl PatientArgs {
    fn profile(&self) -> PatientProfile {
        PatientProfile {
            age: self.age,
            gender: self.gender,
            lesion_type: self.lesion.clone(),
            side_effects: self.side_effects,
        }
    }
}

#[derive(Args)]
struct PredictArgs {
    #[command(flatten)]
    patient: PatientArgs,
    #[arg(long)]
    method: String,
    /// Manual cost entry instead of the estimate
    #[arg(long)]
    cost: Option<u32>,
}

#[derive(Args)]
struct CostArgs {
    #[arg(long)]
    method: String,
    #[arg(long)]
    lesion: String,
    #[arg(long, default_value = "None")]
    side_effects: SideEffectSeverity,
}

fn build_context(config: &config::Config) -> anyhow::Result<PredictionContext> {
    let artifacts = ModelArtifacts::load(&config.model.dir, &config.model.files)?;
    let costs = CostEstimator::new(&config.cost)?;
    let context = PredictionContext::new(
        artifacts,
        &config.catalog.baselines,
        costs,
        config.engine_settings(),
    )?;
    Ok(context)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("verrux=info,tower_http=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = config::Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.model_dir {
        config.model.dir = dir;
    }

    match cli.command {
        Command::Cost(args) => {
            let costs = CostEstimator::new(&config.cost)?;
            let range = costs.range_for(&args.method);
            let estimate = costs.estimate(&args.method, &args.lesion, args.side_effects);
            println!(
                "{}: range {}-{}, lesion factor {:.2}, side-effect factor {:.2}, estimate {}",
                args.method,
                range.low,
                range.high,
                costs.lesion_factor(&args.lesion),
                costs.severity_factor(args.side_effects),
                estimate
            );
        }

        Command::Catalog => {
            let context = build_context(&config)?;
            let catalog = context.catalog();
            println!("Lesion types:      {}", catalog.lesion_types().join(", "));
            println!("Treatment methods: {}", catalog.treatment_methods().join(", "));
            let severities: Vec<&str> = SideEffectSeverity::ALL.iter().map(|s| s.as_str()).collect();
            println!("Side effects:      {}", severities.join(", "));
        }

        Command::Predict(args) => {
            let context = build_context(&config)?;
            let request = TreatmentRequest {
                patient: args.patient.profile(),
                treatment_method: args.method,
                cost_override: args.cost,
            };
            let result = context.predict(&request)?;
            let threshold = context.settings().success_threshold;
            if args.patient.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", report::render_prediction(&result, threshold));
            }
        }

        Command::Rank(args) => {
            let context = build_context(&config)?;
            let ranking = context.rank(&args.profile())?;
            let threshold = context.settings().success_threshold;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&ranking)?);
            } else {
                print!("{}", report::render_ranking(&ranking, threshold));
            }
        }

        Command::Serve { bind } => {
            info!("Verrux starting up...");
            info!("Version: {}", env!("CARGO_PKG_VERSION"));

            let context = build_context(&config)?;
            let state = verrux_web::state::AppState::new(context);
            let router = verrux_web::router::build_router(state);

            let bind_addr = bind.unwrap_or_else(|| config.server.bind.clone());
            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            info!("JSON API listening on http://{}", bind_addr);
            info!("   Catalog: GET  /api/catalog");
            info!("   Predict: POST /api/predict");
            info!("   Rank:    POST /api/rank");

            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
