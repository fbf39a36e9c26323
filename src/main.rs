use clap::{Parser, Subcommand, builder::styling};
use eyre::Result;
use fmu_dataio::cli::{
    CsvExport, CsvKind, checksum, export_csv, init_case, parameters_as_json, preview_filename,
};
use fmu_dataio::naming::{FilenameParts, ObjectLocation};
use fmu_dataio::storage::MetaFormat;
use fmu_dataio::verbosity::Verbosity;
use owo_colors::OwoColorize;
use std::path::PathBuf;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// FMU dataio: export data objects with standardized names and metadata sidecars
#[derive(Parser)]
#[command(name = "dataio", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source settings such as FMU_GLOBAL_CONFIG from
    #[arg(short, long, global = true, default_value = ".env")]
    env: PathBuf,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a CSV file as a table or polygons, with metadata
    Export {
        /// Kind of object in the file
        #[arg(value_enum)]
        kind: CsvKind,

        /// The CSV file to export
        input: PathBuf,

        /// Name to export under, defaults to the file stem
        #[arg(short, long)]
        name: Option<String>,

        /// Content, e.g. volumes or fault_lines
        #[arg(short, long)]
        content: Option<String>,

        /// Tag appended to the name
        #[arg(short, long)]
        tagname: Option<String>,

        #[arg(short, long)]
        unit: Option<String>,

        /// Date as YYYYMMDD, may be given twice
        #[arg(short, long = "date")]
        dates: Vec<String>,

        /// Export root, defaults to ../../share/results/
        #[arg(long)]
        export_root: Option<PathBuf>,

        /// Folder to run the export from, e.g. <realization>/<iteration>/rms/model
        #[arg(long)]
        runfolder: Option<PathBuf>,

        /// Global config file, defaults to $FMU_GLOBAL_CONFIG
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write metadata as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },

    /// Create case metadata in <root>/<casename>/share/metadata/fmu_case.yml
    InitCase {
        casename: String,

        /// Folder holding the case
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Global config file, defaults to $FMU_GLOBAL_CONFIG
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(short, long)]
        description: Option<String>,

        /// Replace existing case metadata
        #[arg(long)]
        overwrite: bool,
    },

    /// Show where an object would be exported
    Filename {
        name: String,

        /// One of surface, grid, table, polygons, cube
        #[arg(short, long, default_value = "surface")]
        location: ObjectLocation,

        #[arg(short, long)]
        tagname: Option<String>,

        /// Prefix, e.g. the grid name of a grid property
        #[arg(short, long)]
        parent: Option<String>,

        /// Date as YYYYMMDD, may be given twice
        #[arg(short, long = "date")]
        dates: Vec<String>,

        #[arg(short, long)]
        subfolder: Option<String>,

        #[arg(long)]
        export_root: Option<PathBuf>,
    },

    /// Print a parameters.txt as JSON
    Parameters {
        #[arg(default_value = "parameters.txt")]
        path: PathBuf,
    },

    /// Print the MD5 checksum and size of a file
    Checksum { path: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.env.is_file() {
        dotenvy::from_filename(&cli.env)?;
    }

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    match cli.command {
        Commands::Export {
            kind,
            input,
            name,
            content,
            tagname,
            unit,
            dates,
            export_root,
            runfolder,
            config,
            json,
        } => {
            let args = CsvExport {
                input,
                name,
                content,
                tagname,
                unit,
                dates,
                export_root,
                runfolder,
                config,
                meta_format: match json {
                    true => MetaFormat::Json,
                    false => MetaFormat::Yaml,
                },
                verbosity: match cli.debug {
                    true => Verbosity::Debug,
                    false => Verbosity::Info,
                },
            };
            let path = export_csv(kind, &args)?;
            log::info!("✓ Exported {}", path.display().bright_black());
        }
        Commands::InitCase {
            casename,
            root,
            config,
            description,
            overwrite,
        } => {
            let path = init_case(config.as_deref(), &root, &casename, description, overwrite)?;
            log::info!(
                "✓ Initialized case {} at {}",
                casename.cyan(),
                path.display().bright_black()
            );
        }
        Commands::Filename {
            name,
            location,
            tagname,
            parent,
            dates,
            subfolder,
            export_root,
        } => {
            let mut sorted = dates;
            sorted.sort();
            let mut parts = FilenameParts::new(name)
                .with_times(sorted.first().cloned(), sorted.get(1).cloned());
            parts.tagname = tagname;
            parts.pretagname = parent;
            parts.subfolder = subfolder;

            let path = preview_filename(location, &parts, export_root.as_deref());
            println!("{}", path.display().green());
        }
        Commands::Parameters { path } => {
            println!("{}", parameters_as_json(&path)?);
        }
        Commands::Checksum { path } => {
            let (md5, bytes) = checksum(&path)?;
            println!("{}  {} ({} bytes)", md5.cyan(), path.display(), bytes);
        }
    }

    Ok(())
}
