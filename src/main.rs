use clap::{Parser, Subcommand};
use folio::{config, generate, output, scan, sitemap};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Static site generator for a portfolio and blog")]
#[command(long_about = "\
Static site generator for a portfolio and blog

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── home.md                      # Home page intro (optional)
  ├── projects.toml                # Project registry: categories and projects
  ├── projects/
  │   └── project_tsp.md           # Write-up for the project with that slug
  ├── assets/                      # Copied verbatim to the output root
  └── blog/
      └── cfd-with-python/         # Directory name is the post slug
          ├── index.md             # Front matter + markdown (index.mdx preferred)
          └── cover.png            # Assets are copied next to the post

Front matter (first key found wins):
  Title:       Article Title → Title → title → slug
  Date:        Publish Date → date → Date
  Image:       Thumbnail → image → cover
  Published:   false only when Published/published is false

Run 'folio gen-config' to generate a documented config.toml.
Set RUST_LOG=warn (or debug) to see diagnostics.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".folio-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the final HTML site from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Print the sitemap XML for the content directory
    Sitemap,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            generate::generate(&manifest_path, &cli.source, &cli.output)?;
            let manifest_content = std::fs::read_to_string(&manifest_path)?;
            let manifest: folio::types::Manifest = serde_json::from_str(&manifest_content)?;
            output::print_generate_output(&manifest);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&manifest);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::Sitemap => {
            let entries = scan::scan_sitemap(&cli.source, chrono::Utc::now())?;
            print!("{}", sitemap::render_xml(&entries));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Serialize the manifest into `<temp_dir>/manifest.json` and return its path.
fn write_manifest(
    manifest: &folio::types::Manifest,
    temp_dir: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}
