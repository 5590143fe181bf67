use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use packer_core::{
    render_result, InstanceGenerator, Packer, PackingRequest, PackingResult, SvgOptions,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "packer")]
#[command(about = "Rectangle packer - Place rectangles into as few square containers as possible", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack the items of a request
    Pack {
        /// Input request file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for result (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a random packing request
    Generate {
        /// Number of items
        #[arg(short, long, default_value_t = 50)]
        count: usize,

        /// Container side length
        #[arg(long, default_value_t = 100)]
        container_size: u32,

        /// Smallest item side
        #[arg(long, default_value_t = 5)]
        min_side: u32,

        /// Largest item side
        #[arg(long, default_value_t = 40)]
        max_side: u32,

        /// Seed for reproducible instances
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render an SVG visualization from a result
    Render {
        /// Input result file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,

        /// Pixels per unit of container side
        #[arg(long, default_value_t = 4.0)]
        scale: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

const PALETTE: [&str; 8] = [
    "#E53935", "#8E24AA", "#3949AB", "#039BE5", "#00897B", "#7CB342", "#FDD835", "#FB8C00",
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Pack { input, output } => {
            pack_command(input, output)?;
        }
        Commands::Generate {
            count,
            container_size,
            min_side,
            max_side,
            seed,
            format,
            output,
        } => {
            let generator = InstanceGenerator::new(count, (min_side, max_side), (min_side, max_side))
                .with_colors(PALETTE);
            generate_command(generator, container_size, seed, format, output)?;
        }
        Commands::Render {
            input,
            output,
            scale,
        } => {
            render_command(input, output, scale)?;
        }
    }

    Ok(())
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Number of items a request expands to. Summed in u64 so large quantities cannot wrap.
fn item_count(request: &PackingRequest) -> u64 {
    request
        .items
        .iter()
        .map(|spec| u64::from(spec.quantity))
        .sum()
}

fn pack_command(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    println!("{}", "🔍 Loading input...".bright_blue());

    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("reading {}", input.display()))?;
    let request: PackingRequest = if is_yaml(&input) {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };

    let total = item_count(&request);
    println!(
        "  {} items to pack",
        total.to_string().bright_white().bold()
    );
    println!(
        "  container side {}",
        request.container_size.to_string().bright_white().bold()
    );
    println!(
        "  algorithm {}",
        request.algorithm.name().bright_white().bold()
    );
    println!();

    println!("{}", "🚀 Packing...".bright_blue());

    let packer = Packer::new(request)?;
    let result = packer.pack()?;

    println!();
    println!("{}", "✅ Packing complete!".bright_green().bold());
    println!();

    print_result(&result);

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(&output_path, json)?;
        println!(
            "💾 Saved result to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        let json = serde_json::to_string_pretty(&result)?;
        println!("{}", json);
    }

    Ok(())
}

fn print_result(result: &PackingResult) {
    let summary = &result.summary;

    println!("{}", "📊 Results:".bright_yellow().bold());
    println!(
        "  Containers used: {}",
        summary.total_containers.to_string().bright_white().bold()
    );
    for (index, container) in result.solution.containers().iter().enumerate() {
        println!(
            "    • #{}: {} items, {:.1}% used",
            index + 1,
            container.len(),
            container.utilization() * 100.0
        );
    }
    println!(
        "  Total waste: {}",
        format!("{:.1}%", summary.waste_percentage).bright_white()
    );
    if summary.overlap_area > 0 {
        println!(
            "  Overlapping area: {}",
            summary.overlap_area.to_string().bright_red()
        );
    }
    println!(
        "  Score: {}",
        format!("{:.3}", summary.score).bright_white()
    );
    println!(
        "  Search: {} iterations, {} accepted, {:.2}s ({:?})",
        result.stats.iterations,
        result.stats.accepted,
        result.stats.elapsed_secs,
        result.stats.stop_reason
    );
    println!();
}

fn generate_command(
    generator: InstanceGenerator,
    container_size: u32,
    seed: Option<u64>,
    format: Format,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    let request = PackingRequest {
        container_size,
        items: generator.generate(&mut rng)?,
        algorithm: Default::default(),
        weights: Default::default(),
    };

    let text = match format {
        Format::Yaml => serde_yaml::to_string(&request)?,
        Format::Json => serde_json::to_string_pretty(&request)?,
    };

    match output {
        Some(path) => {
            std::fs::write(&path, text)?;
            eprintln!(
                "{} Saved {} items to {}",
                "✅".bright_green(),
                request.items.len(),
                path.display().to_string().bright_white()
            );
        }
        None => print!("{}", text),
    }

    Ok(())
}

fn render_command(input: PathBuf, output: PathBuf, scale: f64) -> Result<()> {
    println!("{}", "🔍 Loading result...".bright_blue());

    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("reading {}", input.display()))?;
    let result: PackingResult = serde_json::from_str(&content)?;

    println!("{}", "🎨 Generating SVG...".bright_blue());

    let svg = render_result(
        &result,
        SvgOptions {
            scale,
            ..SvgOptions::default()
        },
    )?;

    std::fs::write(&output, svg)?;

    println!();
    println!(
        "{} Saved SVG to {}",
        "✅".bright_green(),
        output.display().to_string().bright_white()
    );

    Ok(())
}
