use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use tikztab::layout::LayoutAlgorithm;
use tikztab::output::{self, Session};
use tikztab::{CellLabels, CellOptions, table, tikz_parser};

#[derive(Parser)]
#[command(name = "tikztab", about = "Turn graphs into TikZ cells and paginated LaTeX tables")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Width of every cell, handed to \resizebox
    #[arg(long, global = true, default_value = "1in")]
    width: String,

    /// Placement for graphs without coordinates
    #[arg(long, global = true, value_enum, default_value_t = LayoutKind::Spring)]
    layout: LayoutKind,

    /// Iterations of the spring layout
    #[arg(long, global = true, default_value_t = 50)]
    iterations: usize,

    /// Log progress to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutKind {
    Spring,
    Circular,
}

#[derive(Subcommand)]
enum Command {
    /// Print one cell for a graph6 string
    Cell {
        graph6: String,
        #[command(flatten)]
        labels: LabelArgs,
    },
    /// Compose a longtable from a CSV of records
    Table {
        csv: Option<PathBuf>,
        /// Output file (stdout if not provided)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Write every cell and the table under <out-dir>/table_NNN
    Export {
        csv: Option<PathBuf>,
        #[arg(long)]
        out_dir: PathBuf,
        #[arg(long, default_value_t = 1)]
        table: usize,
    },
    /// List the vertices and edges of a diagram
    Inspect { file: Option<PathBuf> },
    /// Re-emit a diagram as a cell using its own coordinates
    Relayout {
        file: Option<PathBuf>,
        #[command(flatten)]
        labels: LabelArgs,
    },
    /// Add labels to an existing diagram
    Annotate {
        file: Option<PathBuf>,
        #[command(flatten)]
        labels: LabelArgs,
    },
}

#[derive(Args)]
struct LabelArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    upper_left: Option<String>,
    #[arg(long)]
    upper_right: Option<String>,
    #[arg(long)]
    lower_right: Option<String>,
    #[arg(long)]
    lower_left: Option<String>,
}

impl From<LabelArgs> for CellLabels {
    fn from(args: LabelArgs) -> Self {
        CellLabels {
            title: args.title,
            upper_left: args.upper_left,
            upper_right: args.upper_right,
            lower_right: args.lower_right,
            lower_left: args.lower_left,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let options = CellOptions {
        width: cli.width.clone(),
        layout: match cli.layout {
            LayoutKind::Spring => LayoutAlgorithm::Spring {
                iterations: cli.iterations,
            },
            LayoutKind::Circular => LayoutAlgorithm::Circular,
        },
    };

    if let Err(e) = run(cli.command, &options) {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}

fn run(command: Command, options: &CellOptions) -> tikztab::Result<()> {
    match command {
        Command::Cell { graph6, labels } => {
            println!("{}", tikztab::render_cell(&graph6, &labels.into(), options)?);
        }
        Command::Table { csv, output } => {
            let records = table::read_records(read_input(csv.as_deref())?.as_bytes())?;
            let document = table::compose_table(&records, options)?;
            match output {
                Some(path) => std::fs::write(path, document)?,
                None => print!("{document}"),
            }
        }
        Command::Export {
            csv,
            out_dir,
            table: number,
        } => {
            let records = table::read_records(read_input(csv.as_deref())?.as_bytes())?;
            let summary = output::export_table(&Session::new(out_dir, number), &records, options)?;
            for path in &summary.graph_files {
                println!("{}", path.display());
            }
            println!("{}", summary.table_file.display());
        }
        Command::Inspect { file } => {
            let parsed = tikz_parser::parse_diagram(&read_input(file.as_deref())?);
            println!(
                "{} vertices, {} edges",
                parsed.graph.vertex_count(),
                parsed.graph.edge_count()
            );
            for v in parsed.graph.vertices() {
                let Some(at) = parsed.layout.get(&v.id) else {
                    continue;
                };
                println!(
                    "  ({}) [{}] at ({:.4}, {:.4}) {{{}}}",
                    v.id,
                    v.style.as_deref().unwrap_or(""),
                    at.x,
                    at.y,
                    v.label.as_deref().unwrap_or("")
                );
            }
            for e in parsed.graph.edges() {
                println!("  ({}) -- ({}) [{}]", e.from, e.to, e.style.as_deref().unwrap_or(""));
            }
        }
        Command::Relayout { file, labels } => {
            let markup = read_input(file.as_deref())?;
            println!("{}", tikztab::relayout(&markup, &labels.into(), options)?);
        }
        Command::Annotate { file, labels } => {
            let markup = read_input(file.as_deref())?;
            println!("{}", tikztab::annotate_markup(&markup, &labels.into())?);
        }
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
