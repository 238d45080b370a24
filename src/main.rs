use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn, Level};
use rayon::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};

use genecheck::io::{bed, psl, sizes};
use genecheck::join::{self, JoinOptions};
use genecheck::seq::SequenceStore;
use genecheck::util::codon;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const FASTA_LINE_WIDTH: usize = 60;

#[derive(Parser, Debug)]
#[command(name = "genecheck", author, version, about = "Join gene-check transcripts with their detail annotations", arg_required_else_help = true)]
struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Attach detail annotations to transcripts and write out.bed / out_details.bed
    Join {
        /// Transcript BED12 file
        #[arg(short, long)]
        bed: PathBuf,
        /// Detail BED file (4 or 9 columns)
        #[arg(short, long)]
        details: PathBuf,
        /// Output directory (must exist)
        #[arg(short, long = "out-dir")]
        out_dir: PathBuf,
        /// Merge split labels such as orfStop/TAG into orfStop_TAG
        #[arg(long = "normalize-labels")]
        normalize_labels: bool,
    },
    /// Write 5'->3' mRNA of every transcript as FASTA
    Mrna {
        /// Transcript BED12 file
        #[arg(short, long)]
        bed: PathBuf,
        /// Genome FASTA, or a .seq cache built by `index`
        #[arg(short, long)]
        genome: PathBuf,
        /// Output FASTA path (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Uppercase the genome before slicing
        #[arg(long)]
        upper: bool,
        /// Also write the three-letter translation of each mRNA
        #[arg(long)]
        protein: bool,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
    },
    /// Load a genome FASTA and save it as a binary .seq cache
    Index {
        /// Reference FASTA file
        reference: PathBuf,
        /// Output prefix for the cache file
        #[arg(short, long, default_value = "genome")]
        output: String,
        #[arg(long)]
        upper: bool,
    },
    /// Validate a PSL file and print one composite key per row
    Psl {
        psl: PathBuf,
    },
    /// Validate a chrom.sizes file
    Sizes {
        sizes: PathBuf,
    },
}

fn main() -> Result<()> {
    let start = std::time::Instant::now();
    let cli = Cli::parse();
    let level = if cli.verbose { Level::Debug } else { Level::Info };
    simple_logger::init_with_level(level)?;

    match cli.command {
        Commands::Join { bed, details, out_dir, normalize_labels } => {
            run_join(&bed, &details, &out_dir, JoinOptions { normalize_labels })?;
        }
        Commands::Mrna { bed, genome, out, upper, protein, threads } => {
            run_mrna(&bed, &genome, out.as_deref(), upper, protein, threads)?;
        }
        Commands::Index { reference, output, upper } => run_index(&reference, &output, upper)?,
        Commands::Psl { psl } => run_psl(&psl)?,
        Commands::Sizes { sizes } => run_sizes(&sizes)?,
    }

    info!("Elapsed time: {:?}", start.elapsed());
    Ok(())
}

fn check_file(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("{} does not exist", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }
    Ok(())
}

fn check_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!("{} is not a directory", path.display());
    }
    Ok(())
}

/// 记录本次调用的命令行，便于复现
fn write_command_log(out_dir: &Path) -> Result<()> {
    let path = out_dir.join("command.log");
    let mut f = std::fs::File::create(&path)
        .with_context(|| format!("cannot write {}", path.display()))?;
    writeln!(f, "{}", std::env::args().collect::<Vec<_>>().join(" "))?;
    writeln!(f, "# {}", chrono::Utc::now().to_rfc3339())?;
    Ok(())
}

fn run_join(bed: &Path, details: &Path, out_dir: &Path, opts: JoinOptions) -> Result<()> {
    check_file(bed)?;
    check_file(details)?;
    check_dir(out_dir)?;
    write_command_log(out_dir)?;

    let transcripts = join::get_transcripts(bed, details, opts)
        .with_context(|| format!("cannot join {} with {}", bed.display(), details.display()))?;
    let (out_bed, out_details) = genecheck::io::write_all_beds(&transcripts, out_dir)?;
    info!("wrote {} and {}", out_bed.display(), out_details.display());
    Ok(())
}

fn run_mrna(
    bed_path: &Path,
    genome: &Path,
    out_path: Option<&Path>,
    upper: bool,
    protein: bool,
    threads: usize,
) -> Result<()> {
    check_file(bed_path)?;
    check_file(genome)?;

    let fh = std::fs::File::open(bed_path)
        .with_context(|| format!("cannot open BED '{}'", bed_path.display()))?;
    let transcripts = bed::read_transcripts(std::io::BufReader::new(fh), &bed_path.display().to_string())?;
    let store = SequenceStore::load(genome, upper)
        .with_context(|| format!("cannot load genome '{}'", genome.display()))?;
    info!("{} transcripts, {} sequences", transcripts.len(), store.len());

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let mrnas: Vec<genecheck::Result<Option<Vec<u8>>>> = pool.install(|| {
        transcripts
            .par_iter()
            .map(|t| match store.get(t.chromosome()) {
                Some(seq) => t.mrna(seq).map(Some),
                None => Ok(None),
            })
            .collect()
    });

    let mut out: Box<dyn Write> = match out_path {
        Some(p) => Box::new(std::io::BufWriter::new(std::fs::File::create(p)?)),
        None => Box::new(std::io::BufWriter::new(std::io::stdout())),
    };

    let mut missing = 0usize;
    for (t, mrna) in transcripts.iter().zip(mrnas) {
        let Some(mrna) = mrna.with_context(|| format!("transcript {}", t.name))? else {
            warn!("{}: chromosome {} not in genome, skipped", t.name, t.chromosome());
            missing += 1;
            continue;
        };
        writeln!(out, ">{}", t.name)?;
        for line in mrna.chunks(FASTA_LINE_WIDTH) {
            out.write_all(line)?;
            writeln!(out)?;
        }
        if protein {
            writeln!(out, ">{} protein", t.name)?;
            writeln!(out, "{}", codon::translate_sequence(&mrna))?;
        }
    }
    out.flush()?;

    if missing > 0 {
        warn!("{} transcripts skipped for missing sequences", missing);
    }
    Ok(())
}

fn run_index(reference: &Path, output: &str, upper: bool) -> Result<()> {
    check_file(reference)?;
    let store = SequenceStore::from_fasta(reference, upper)
        .with_context(|| format!("cannot read reference FASTA '{}'", reference.display()))?;
    if store.is_empty() {
        anyhow::bail!("FASTA file '{}' contains no sequences", reference.display());
    }
    let total: u64 = store.chrom_sizes().values().sum();
    info!("sequences: {}", store.len());
    info!("total_len: {}", total);

    let out_path = PathBuf::from(format!("{}.seq", output));
    store
        .save_to_file(&out_path)
        .with_context(|| format!("cannot write cache to '{}'", out_path.display()))?;
    info!("sequence cache saved: {}", out_path.display());
    Ok(())
}

fn run_psl(path: &Path) -> Result<()> {
    check_file(path)?;
    let rows = psl::get_alignments(path)?;
    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    for r in &rows {
        writeln!(out, "{}", r.hash_key())?;
    }
    out.flush()?;
    info!("{}: {} alignments", path.display(), rows.len());
    Ok(())
}

fn run_sizes(path: &Path) -> Result<()> {
    check_file(path)?;
    let sizes = sizes::load_chrom_sizes(path)?;
    let total: u64 = sizes.values().sum();
    info!("{}: {} sequences, {} bp", path.display(), sizes.len(), total);
    Ok(())
}
