use anyhow::{Context, Result};
use filing_chunker::{
    chunk_filing, core::ChunkerSettings, ChunkerConfig, FilingFacts, FilingParser, SectionChunker,
};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "filing-chunker", about = "Split a 10-K filing into embedding-ready chunks")]
struct Opt {
    /// Cached 10-K HTML filing
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Tokens per chunk (defaults to CHUNK_SIZE)
    #[structopt(long)]
    chunk_size: Option<usize>,

    /// Tokens shared by consecutive chunks (defaults to CHUNK_OVERLAP)
    #[structopt(long)]
    chunk_overlap: Option<usize>,

    /// Fiscal year to stamp on chunks instead of the one found in the filing
    #[structopt(long)]
    fiscal_year: Option<i32>,

    /// Print the extracted sections instead of chunks
    #[structopt(long)]
    sections_only: bool,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();
    let opt = Opt::from_args();

    let settings = ChunkerSettings::from_env()?;
    let parser = FilingParser::with_target_sections(settings.target_sections.clone());
    let parsed = parser
        .parse_html(&opt.input)
        .with_context(|| format!("Failed to parse {}", opt.input.display()))?;

    eprintln!("Detected headings:");
    for heading in &parsed.all_sections_found {
        eprintln!("  {}", heading);
    }

    if opt.sections_only {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    let config = ChunkerConfig::new(
        opt.chunk_size.unwrap_or(settings.chunk_size),
        opt.chunk_overlap.unwrap_or(settings.chunk_overlap),
    );
    let chunker = SectionChunker::new(config, &settings.tokenizer_source())?;

    let mut facts = FilingFacts::from_metadata(&parsed.metadata);
    if let Some(year) = opt.fiscal_year {
        facts = facts.with_fiscal_year(year);
    }

    let chunks = chunk_filing(&parsed, &chunker, &facts)?;
    eprintln!(
        "{} sections, {} chunks for {} FY{}",
        parsed.sections.len(),
        chunks.len(),
        facts.company_name,
        facts.fiscal_year
    );
    println!("{}", serde_json::to_string_pretty(&chunks)?);
    Ok(())
}
