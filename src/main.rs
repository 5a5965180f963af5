use clap::{Parser, Subcommand, ValueEnum};
use qr_label::batch::{self, ProgressEvent};
use qr_label::config::{self, ToolConfig};
use qr_label::imaging::{RustBackend, terminal_preview};
use qr_label::{input, naming, output, package, preview, validate};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;

fn version_string() -> &'static str {
    let hash = env!("QR_LABEL_GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup
        Box::leak(format!("{}+{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "qr-label")]
#[command(about = "Turn IDs into labeled QR codes")]
#[command(long_about = "\
Turn IDs into labeled QR codes

A single ID becomes one PNG with the ID printed under the code. A batch of
IDs becomes a ZIP archive, an Excel workbook with the images embedded, or a
directory of PNGs.

Batch input:

  plain text          one numeric ID per line
  CSV                 header row, then id,name per line
                      (any comma switches to CSV; non-numeric rows are skipped)

Output names embed a timestamp:

  qrcode_<id>_YYYYMMDD_HHMM.png
  qrcodes_YYYYMMDD_HHMM.zip | .xlsx

Run 'qr-label gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Output directory
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Render bare QR codes without the ID label
    #[arg(long, global = true)]
    no_label: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// ZIP archive of <id>.png files
    Zip,
    /// Excel workbook with embedded images
    Xlsx,
    /// Directory of <id>.png files
    Png,
}

/// Shared flag for commands that read batch input.
#[derive(clap::Args, Clone)]
struct InputArgs {
    /// Input file, or '-' for stdin
    #[arg(long, short, default_value = "-")]
    input: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one labeled QR code PNG
    Single {
        /// Letters, digits, '-' and '_'
        id: String,
        /// Also print the code to the terminal
        #[arg(long)]
        show: bool,
    },
    /// Generate QR codes for a list of IDs
    Batch {
        #[command(flatten)]
        input: InputArgs,
        /// Output formats (repeatable)
        #[arg(long = "format", value_enum, default_values_t = [OutputFormat::Xlsx])]
        formats: Vec<OutputFormat>,
        /// Also write preview.html with the first codes
        #[arg(long)]
        preview: bool,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse and validate batch input without generating anything
    Check(InputArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Single { id, show } => {
            let config = load_tool_config(&cli.config_dir, cli.no_label)?;
            let entry = batch::generate_single(&RustBackend::new(), &id, &config)?;
            let name = naming::single_png_name(&entry.id, &naming::now_timestamp());
            let path = package::write_file(&cli.output, &name, &entry.png)?;
            if show {
                println!("{}", terminal_preview(&entry.id, config.qr.ec_level)?);
            }
            output::print_single_output(&entry.id, &path);
        }
        Command::Batch {
            input,
            formats,
            preview,
            json,
        } => {
            let config = load_tool_config(&cli.config_dir, cli.no_label)?;
            run_batch(&cli.output, &config, &input.input, &formats, preview, json)?;
        }
        Command::Check(args) => {
            let config = load_tool_config(&cli.config_dir, cli.no_label)?;
            let text = input::read_input(&args.input)?;
            let records = input::parse_batch(&text);
            validate::validate_batch(&records, &config.limits)?;
            output::print_check_output(input::detect_format(text.trim()), &records);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `config.toml` and apply CLI overrides.
fn load_tool_config(dir: &Path, no_label: bool) -> Result<ToolConfig, config::ConfigError> {
    let mut config = config::load_config(dir)?;
    if no_label {
        config.label.enabled = false;
    }
    Ok(config)
}

fn run_batch(
    output_dir: &Path,
    config: &ToolConfig,
    input_path: &Path,
    formats: &[OutputFormat],
    write_preview: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = input::read_input(input_path)?;
    let records = input::parse_batch(&text);

    let (tx, rx) = mpsc::channel::<ProgressEvent>();
    let printer = std::thread::spawn(move || {
        for event in rx {
            if json {
                continue;
            }
            for line in output::format_progress_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = batch::generate_batch(&RustBackend::new(), &records, config, Some(tx));
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;
    let result = result?;

    let stamp = naming::now_timestamp();
    let mut written = Vec::new();
    let mut done = Vec::new();
    for format in formats {
        if done.contains(format) {
            continue;
        }
        done.push(*format);
        match format {
            OutputFormat::Zip => {
                let bytes = package::build_archive(&result.entries)?;
                written.push(package::write_file(
                    output_dir,
                    &naming::archive_name(&stamp),
                    &bytes,
                )?);
            }
            OutputFormat::Xlsx => {
                let bytes = package::build_workbook(&result.entries, &config.workbook)?;
                written.push(package::write_file(
                    output_dir,
                    &naming::workbook_name(&stamp),
                    &bytes,
                )?);
            }
            OutputFormat::Png => {
                let dir = output_dir.join(naming::png_dir_name(&stamp));
                package::write_png_dir(&dir, &result.entries)?;
                written.push(dir);
            }
        }
    }

    if write_preview {
        let html = preview::render_preview(&result);
        written.push(package::write_file(
            output_dir,
            preview::PREVIEW_FILENAME,
            html.as_bytes(),
        )?);
    }

    let summary = result.summary();
    if json {
        let report = serde_json::json!({
            "summary": summary,
            "entries": result.entries,
            "written": written,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_batch_summary(&summary, &written);
    }
    Ok(())
}
