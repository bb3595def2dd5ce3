//! Command-line front end for icon codes, export and the saved-icon store.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bauhaus_icon::{
    codec, render_png, render_svg, ExportSettings, IconDescription, IconStore, JsonFileBackend,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bauhaus", about = "Compose, convert and store Bauhaus-style icons")]
struct Cli {
    /// Saved-icon store file.
    #[arg(long, global = true, default_value = "bauhaus_icons.json")]
    store: PathBuf,

    /// Export settings as JSON.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the SVG for an icon code.
    Svg { code: String },
    /// Write a PNG for an icon code.
    Png {
        code: String,
        #[arg(short, long, default_value = "bauhaus_icon.png")]
        output: PathBuf,
    },
    /// Print the JSON description behind an icon code.
    Decode { code: String },
    /// Turn a JSON description (file or `-` for stdin) into an icon code.
    Encode {
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Save an icon code under a name.
    Save { name: String, code: String },
    /// List saved icons.
    List,
    /// Delete a saved icon.
    Delete { id: String },
    /// Print the whole store as JSON.
    Export,
    /// Merge a store export into the store.
    Import { file: PathBuf },
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult {
    let settings = match &cli.settings {
        Some(path) => ExportSettings::from_json(&fs::read_to_string(path)?)?,
        None => ExportSettings::default(),
    };
    let mut store = IconStore::new(JsonFileBackend::new(&cli.store));
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Svg { code } => {
            let icon = codec::decode(&code)?;
            writeln!(stdout, "{}", render_svg(&icon, &settings))?;
        }
        Command::Png { code, output } => {
            let icon = codec::decode(&code)?;
            fs::write(&output, render_png(&icon, &settings)?)?;
            writeln!(stdout, "wrote {}", output.display())?;
        }
        Command::Decode { code } => {
            let icon = codec::decode(&code)?;
            writeln!(stdout, "{}", serde_json::to_string_pretty(&icon)?)?;
        }
        Command::Encode { input } => {
            let icon: IconDescription = serde_json::from_str(&read_input(&input)?)?;
            writeln!(stdout, "{}", codec::encode(&icon))?;
        }
        Command::Save { name, code } => {
            // Refuse to store codes that would not load again.
            codec::decode(&code)?;
            let id = store.save(name, code)?;
            writeln!(stdout, "{id}")?;
        }
        Command::List => {
            for (id, icon) in store.list()? {
                writeln!(stdout, "{id}\t{}\t{}\t{}", icon.date, icon.name, icon.code)?;
            }
        }
        Command::Delete { id } => {
            if !store.delete(&id)? {
                return Err(format!("no saved icon with id {id}").into());
            }
        }
        Command::Export => {
            writeln!(stdout, "{}", store.export_json()?)?;
        }
        Command::Import { file } => {
            let report = store.import_json(&fs::read_to_string(&file)?)?;
            writeln!(stdout, "imported {} icon(s)", report.imported)?;
            if report.is_partial() {
                writeln!(stdout, "skipped invalid: {}", report.skipped.join(", "))?;
            }
        }
    }
    Ok(())
}

fn read_input(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}
