use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use abrechnungsformular::config::{FormPaths, Settings};
use abrechnungsformular::models::Abrechnung;
use abrechnungsformular::printer::HtmlPrinter;
use abrechnungsformular::services::{evaluate_query, suggest_filename};

#[derive(Parser)]
#[command(
    name = "abrechnung",
    version,
    about = "Fills volunteer expense/income settlement forms as HTML documents",
    long_about = "abrechnung fills the fixed-layout volunteer settlement form of a \
                  nonprofit from submitted form fields and writes the result as an \
                  HTML document, ready for PDF rendering."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill the settlement template from form fields
    Render {
        /// Form fields as KEY=VALUE pairs (e.g. username=Erika p1value=-12,50)
        fields: Vec<String>,

        /// Read form fields from a JSON object file instead
        #[arg(short, long)]
        query_file: Option<PathBuf>,

        /// Template file (overrides the configured one)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Output file; '-' for stdout. Defaults to the suggested filename
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Compose an empty settlement document
    Blank {
        /// Template file (overrides the configured one)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Output file; '-' for stdout. Defaults to the suggested filename
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Initialize the configuration directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FormPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Render {
            fields,
            query_file,
            template,
            out,
        }) => {
            let query = collect_query(&fields, query_file.as_deref())?;

            let mut abrechnung = Abrechnung::new();
            evaluate_query(&mut abrechnung, &query)?;

            let printer = load_printer(template.as_deref(), &settings, &paths)?;
            let html = printer.compose(Some(&abrechnung));

            let out = out.unwrap_or_else(|| {
                PathBuf::from(format!("{}.html", suggest_filename(&abrechnung)))
            });
            write_document(&html, &out)?;
        }
        Some(Commands::Blank { template, out }) => {
            let printer = load_printer(template.as_deref(), &settings, &paths)?;
            let html = printer.compose(None);

            let out = out.unwrap_or_else(|| PathBuf::from("Abrechnung.html"));
            write_document(&html, &out)?;
        }
        Some(Commands::Init) => {
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialized configuration at: {}", paths.base_dir().display());
            println!();
            println!("Place the document template at:");
            println!("  {}", settings.template_path(&paths).display());
        }
        Some(Commands::Config) => {
            println!("abrechnungsformular Configuration");
            println!("=================================");
            println!("Config directory:    {}", paths.base_dir().display());
            println!("Templates directory: {}", paths.templates_dir().display());
            println!("Initialized:         {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Template:   {}", settings.template_path(&paths).display());
            println!("  Stylesheet: {}", settings.stylesheet_path(&paths).display());
        }
        None => {
            println!("abrechnung - volunteer settlement forms as HTML documents");
            println!();
            println!("Run 'abrechnung --help' for usage information.");
            println!("Run 'abrechnung blank' to compose an empty form.");
        }
    }

    Ok(())
}

/// Merge the JSON query file (if any) with KEY=VALUE arguments
///
/// Command-line fields win over file entries.
fn collect_query(fields: &[String], query_file: Option<&Path>) -> Result<HashMap<String, String>> {
    let mut query: HashMap<String, String> = match query_file {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read query file '{}'", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("invalid query file '{}'", path.display()))?
        }
        None => HashMap::new(),
    };

    for raw in fields {
        let (key, value) = raw
            .split_once('=')
            .with_context(|| format!("expected KEY=VALUE, got '{}'", raw))?;
        query.insert(key.to_string(), value.to_string());
    }

    Ok(query)
}

fn load_printer(
    template: Option<&Path>,
    settings: &Settings,
    paths: &FormPaths,
) -> Result<HtmlPrinter> {
    let path = template
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings.template_path(paths));
    Ok(HtmlPrinter::from_file(path)?)
}

fn write_document(html: &str, out: &Path) -> Result<()> {
    if out == Path::new("-") {
        print!("{}", html);
    } else {
        fs::write(out, html)
            .with_context(|| format!("failed to write '{}'", out.display()))?;
        println!("Wrote {}", out.display());
    }
    Ok(())
}
