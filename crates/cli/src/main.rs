use anyhow::{bail, Context};
use chrono::Local;
use clap::{Parser, Subcommand};
use pcr_core::config::{data_dir_from_env_value, default_unit_from_env_value};
use pcr_core::{
    export, CoreConfig, DocumentFormat, NarrativeService, Report, ReportId, ReportStore,
    SectionKind, SectionUpdate, VitalSigns,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pcr")]
#[command(about = "Prehospital patient care report narrative generator")]
struct Cli {
    /// Data directory (overrides PCR_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a fresh report, discarding the one in progress
    New,
    /// Print the current report as JSON
    Show,
    /// Replace one section of the current report from a JSON or YAML file
    Set {
        /// Section name (dispatch, chief-complaint, history, assessment-notes, assessment,
        /// treatment, transport)
        section: SectionKind,
        /// File holding the section; `.yaml`/`.yml` are read as YAML, anything else as JSON
        file: PathBuf,
    },
    /// Record a set of vital signs
    Vitals(VitalsArgs),
    /// Print the narrative for the current report
    Narrative {
        /// Render this report file instead of the current report
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Write the narrative to PCR_<id>_<date>.md
    Export {
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// Export this report file instead of the current report
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Save the current report and start a fresh one
    Save,
    /// List saved reports
    List,
    /// Load a saved report into the current slot
    Open {
        /// Report ID
        id: ReportId,
    },
    /// Delete a saved report
    Delete {
        /// Report ID
        id: ReportId,
    },
}

#[derive(clap::Args)]
struct VitalsArgs {
    /// Time taken (defaults to now)
    #[arg(long)]
    time: Option<String>,
    /// Blood pressure
    #[arg(long)]
    bp: Option<String>,
    #[arg(long)]
    pulse: Option<String>,
    /// Respirations
    #[arg(long)]
    resp: Option<String>,
    #[arg(long)]
    spo2: Option<String>,
    /// Temperature
    #[arg(long)]
    temp: Option<String>,
    /// Blood glucose
    #[arg(long)]
    bgl: Option<String>,
    #[arg(long)]
    gcs: Option<String>,
    /// Pain scale (0-10)
    #[arg(long)]
    pain: Option<String>,
}

impl VitalsArgs {
    fn into_vital_signs(self) -> VitalSigns {
        VitalSigns {
            time: String::new(),
            blood_pressure: self.bp.unwrap_or_default(),
            pulse: self.pulse.unwrap_or_default(),
            respirations: self.resp.unwrap_or_default(),
            sp_o2: self.spo2.unwrap_or_default(),
            temperature: self.temp.unwrap_or_default(),
            blood_glucose: self.bgl.unwrap_or_default(),
            gcs: self.gcs.unwrap_or_default(),
            pain_scale: self.pain.unwrap_or_default(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("pcr=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = Arc::new(resolve_config(cli.data_dir)?);

    match cli.command {
        Some(Commands::New) => {
            let mut store = open_store(&cfg)?;
            store.clear_current()?;
            println!("Started report {}", store.current().id_str().unwrap_or("N/A"));
        }
        Some(Commands::Show) => {
            let store = open_store(&cfg)?;
            println!("{}", store.current().to_json_pretty()?);
        }
        Some(Commands::Set { section, file }) => {
            let text = read_file(&file)?;
            let update = SectionUpdate::parse(section, DocumentFormat::from_path(&file), &text)
                .with_context(|| format!("invalid {} section in {}", section, file.display()))?;
            let mut store = open_store(&cfg)?;
            store.update_section(update)?;
            println!("Updated {}", section);
        }
        Some(Commands::Vitals(args)) => {
            let time = args
                .time
                .clone()
                .unwrap_or_else(|| Local::now().format("%-I:%M:%S %p").to_string());
            let Some(vitals) = args.into_vital_signs().with_unrecorded_defaults(time) else {
                bail!("at least one of --bp, --pulse or --resp is required");
            };
            let mut store = open_store(&cfg)?;
            store.add_vital_signs(vitals)?;
            let count = store
                .current()
                .assessment
                .as_ref()
                .map_or(0, |a| a.vital_signs.len());
            println!("Recorded vitals set {}", count);
        }
        Some(Commands::Narrative { file }) => {
            let report = load_report(&cfg, file.as_deref())?;
            println!("{}", NarrativeService::new().render(&report));
        }
        Some(Commands::Export { out, file }) => {
            let report = load_report(&cfg, file.as_deref())?;
            let Some(id) = report.id.clone() else {
                bail!("report has no id; cannot name the export file");
            };
            let narrative = NarrativeService::new().render(&report);
            let path = export::write_narrative(&out, &id, Local::now().date_naive(), &narrative)?;
            println!("Exported {}", path.display());
        }
        Some(Commands::Save) => {
            let mut store = open_store(&cfg)?;
            let id = store.save_current()?;
            println!("Saved report {}", id);
        }
        Some(Commands::List) => {
            let store = open_store(&cfg)?;
            let reports = store.list();
            if reports.is_empty() {
                println!("No saved reports.");
            } else {
                for report in reports {
                    println!("{}", list_line(report));
                }
            }
        }
        Some(Commands::Open { id }) => {
            let mut store = open_store(&cfg)?;
            store
                .open_report(&id)
                .with_context(|| format!("cannot open report {}", id))?;
            println!("Opened report {}", id);
        }
        Some(Commands::Delete { id }) => {
            let mut store = open_store(&cfg)?;
            store
                .delete_report(&id)
                .with_context(|| format!("cannot delete report {}", id))?;
            println!("Deleted report {}", id);
        }
        None => {
            println!("Use 'pcr --help' for commands");
        }
    }

    Ok(())
}

/// Environment first, then flags on top.
fn resolve_config(data_dir_flag: Option<PathBuf>) -> anyhow::Result<CoreConfig> {
    let data_dir =
        data_dir_flag.unwrap_or_else(|| data_dir_from_env_value(std::env::var("PCR_DATA_DIR").ok()));
    let default_unit = default_unit_from_env_value(std::env::var("PCR_DEFAULT_UNIT").ok());
    CoreConfig::new(data_dir, default_unit).context("invalid configuration")
}

fn open_store(cfg: &Arc<CoreConfig>) -> anyhow::Result<ReportStore> {
    ReportStore::open(cfg.clone())
        .with_context(|| format!("cannot open report store in {}", cfg.data_dir().display()))
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

/// The report in `file` if given, else the current report.
fn load_report(cfg: &Arc<CoreConfig>, file: Option<&Path>) -> anyhow::Result<Report> {
    match file {
        Some(path) => {
            let text = read_file(path)?;
            DocumentFormat::from_path(path)
                .parse_report(&text)
                .with_context(|| format!("invalid report in {}", path.display()))
        }
        None => Ok(open_store(cfg)?.snapshot()),
    }
}

fn list_line(report: &Report) -> String {
    let complaint = report
        .chief_complaint
        .as_ref()
        .map(|cc| cc.complaint.as_str())
        .filter(|c| !c.is_empty())
        .unwrap_or("-");
    format!(
        "ID: {}, Created: {}, Chief complaint: {}",
        report.id_str().unwrap_or("N/A"),
        report.created_at,
        complaint
    )
}
