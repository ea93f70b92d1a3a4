use anyhow::Result;
use clap::Parser;
use sift_core::{FsCorpus, Index, QueryLog, StopwordSet};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Interactive term-frequency search over a directory of HTML pages")]
struct Cli {
    /// Directory of HTML documents to index
    #[arg(long, default_value = "./input_pages")]
    corpus: String,
    /// Stopword file, one term per line
    #[arg(long, default_value = "./stopwords.txt")]
    stopwords: String,
    /// Append-only query log
    #[arg(long, default_value = "./output.txt")]
    query_log: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();

    // Fatal before any indexing: tokenization is undefined without it.
    let stopwords = Arc::new(StopwordSet::load(&args.stopwords)?);
    let index = Index::build(FsCorpus::new(&args.corpus), stopwords);
    let log = QueryLog::new(&args.query_log);

    println!(
        "Indexed {} documents ({} terms). Type a query, or \"exit\" to quit.",
        index.num_docs(),
        index.num_terms()
    );

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("\nQuery: ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("exit") {
            break;
        }

        let hits = index.search(query);
        if hits.is_empty() {
            println!("No matches found.");
        } else {
            for hit in &hits {
                println!("{} (score: {})", hit.doc_id, hit.score);
            }
        }
        log.append(query, &hits);
    }

    println!("Query log saved to {}", args.query_log);
    Ok(())
}
