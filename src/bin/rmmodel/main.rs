//! rmmodel CLI - Export scene snapshots to .rmmodel documents and inspect them.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use rmmodel::document::{AnyDocument, Channel};
use rmmodel::prelude::{export_scene, ExportSettings, SceneSnapshot};
use tracing_subscriber::EnvFilter;

/// Options parsed from the `export` command line.
#[derive(Debug, Default)]
struct ExportArgs {
    scene: PathBuf,
    output: Option<String>,
    settings_file: Option<PathBuf>,
    no_animations: bool,
    selected: bool,
    rate: Option<i64>,
    save_settings: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse global flags
    let mut level = "info";
    let mut filtered_args: Vec<&str> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "-v" | "--verbose" => level = "debug",
            "-vv" | "--trace" => level = "trace",
            "-q" | "--quiet" => level = "error",
            _ => filtered_args.push(arg),
        }
    }
    init_logging(level);

    if filtered_args.is_empty() {
        print_help();
        return;
    }

    let result = match filtered_args[0] {
        "export" | "e" => parse_export_args(&filtered_args[1..]).and_then(cmd_export),
        "inspect" | "i" => match filtered_args.get(1) {
            Some(path) => cmd_inspect(path),
            None => Err(anyhow!("missing file argument\nUsage: rmmodel inspect <file.rmmodel>")),
        },
        "version" | "--version" | "-V" => {
            print_version();
            Ok(())
        }
        "help" | "h" | "-h" | "--help" => {
            print_help();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_help() {
    println!("rmmodel - ReMapper model exporter");
    println!();
    println!("USAGE:");
    println!("    rmmodel [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    e, export  <scene.json> [FLAGS]  Bake a scene snapshot into a .rmmodel document");
    println!("    i, inspect <file.rmmodel>        Show document version, objects and keyframes");
    println!("    version                          Show version and build date");
    println!("    h, help                          Show this help");
    println!();
    println!("EXPORT FLAGS:");
    println!("    -o, --output <file>   Output file (default: scene name next to the scene)");
    println!("    --no-animations       Export the current frame only");
    println!("    --selected            Export selected objects instead of visible ones");
    println!("    --rate <n>            Sample every n-th frame (default: 1)");
    println!("    --settings <file>     Read settings from file instead of the user config");
    println!("    --save-settings       Store the effective settings in the user config");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Show debug output");
    println!("    -vv, --trace     Show trace output (very verbose)");
    println!("    -q, --quiet      Only show errors");
    println!();
    println!("EXAMPLES:");
    println!("    rmmodel export intro.json                 # Writes intro.rmmodel next to the scene");
    println!("    rmmodel export intro.json --rate 2 -o //env/intro");
    println!("    rmmodel inspect intro.rmmodel");
    println!();
    println!("NOTES:");
    println!("    - RUST_LOG overrides -v/-vv/-q when set");
}

fn print_version() {
    println!(
        "rmmodel {} (format v{}, built {})",
        env!("CARGO_PKG_VERSION"),
        rmmodel::document::FORMAT_VERSION,
        option_env!("RMMODEL_BUILD_STAMP").unwrap_or("unknown")
    );
}

fn parse_export_args(args: &[&str]) -> Result<ExportArgs> {
    let mut parsed = ExportArgs::default();
    let mut scene = None;
    let mut it = args.iter();

    while let Some(&arg) = it.next() {
        match arg {
            "-o" | "--output" => {
                let value = it.next().context("--output needs a file name")?;
                parsed.output = Some(value.to_string());
            }
            "--settings" => {
                let value = it.next().context("--settings needs a file")?;
                parsed.settings_file = Some(PathBuf::from(value));
            }
            "--rate" => {
                let value = it.next().context("--rate needs a number")?;
                parsed.rate = Some(value.parse().with_context(|| format!("invalid --rate '{}'", value))?);
            }
            "--no-animations" => parsed.no_animations = true,
            "--selected" => parsed.selected = true,
            "--save-settings" => parsed.save_settings = true,
            flag if flag.starts_with('-') => bail!("unknown export flag '{}'", flag),
            path => {
                if scene.replace(PathBuf::from(path)).is_some() {
                    bail!("more than one scene given");
                }
            }
        }
    }

    parsed.scene = scene.context("missing scene argument\nUsage: rmmodel export <scene.json> [FLAGS]")?;
    Ok(parsed)
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let mut settings = match &args.settings_file {
        Some(path) => ExportSettings::load_from(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?,
        None => ExportSettings::load(),
    };
    if let Some(output) = args.output {
        settings.filename = Some(output);
    }
    if args.no_animations {
        settings.export_animations = false;
    }
    if args.selected {
        settings.only_selected = true;
    }
    if let Some(rate) = args.rate {
        settings.sample_rate = rate;
    }
    tracing::debug!("effective settings: {:?}", settings);

    let mut scene = SceneSnapshot::open(&args.scene)
        .with_context(|| format!("failed to open {}", args.scene.display()))?;

    let summary = export_scene(&mut scene, &settings)?;
    for warning in &summary.warnings {
        eprintln!("warning: {}", warning);
    }
    println!("{}", summary);

    if args.save_settings {
        // The output path is per scene; keep it out of the user config
        let stored = ExportSettings { filename: None, ..settings };
        let path = stored.save()?;
        println!("Settings saved to {}", path.display());
    }
    Ok(())
}

fn cmd_inspect(path: &str) -> Result<()> {
    let doc = AnyDocument::open(path).with_context(|| format!("failed to read {}", path))?;

    println!("Document: {}", path);
    match doc.version() {
        Some(v) => println!("Version:  {}", v),
        None => println!("Version:  legacy (no version tag)"),
    }

    let doc = doc.into_current();
    println!("Objects:  {} ({} animated)", doc.objects.len(), doc.animated_count());
    println!();

    for (i, object) in doc.objects.iter().enumerate() {
        let group = object.group.as_deref().unwrap_or("-");
        match &object.position {
            Channel::Static(p) => {
                println!("  [{i}] static   group={group} pos=[{:.3}, {:.3}, {:.3}]", p[0], p[1], p[2]);
            }
            Channel::Animated(keys) => {
                let span = match (keys.first(), keys.last()) {
                    (Some(a), Some(b)) => format!("t={:.3}..{:.3}", a[3], b[3]),
                    _ => "empty".to_string(),
                };
                println!("  [{i}] animated group={group} keys={} {span}", keys.len());
            }
        }
    }
    Ok(())
}
