use anyhow::{anyhow, Result};
use clap::Parser;
use reqwest::{header, Client};
use scraper::{Html, Selector};
use std::collections::{HashSet, VecDeque};
use std::fs;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "sift-crawler")]
#[command(about = "Fetch up to N same-origin pages from a seed URL into an HTML corpus")]
struct Cli {
    /// Seed URL to start from
    #[arg(long)]
    seed: String,
    /// Directory to save fetched pages into
    #[arg(long, default_value = "./input_pages")]
    output: String,
    /// Maximum number of pages to save
    #[arg(long, default_value_t = 10)]
    max_pages: usize,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// User-Agent string
    #[arg(long, default_value = "sift-crawler/0.1")]
    user_agent: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();

    let seed = Url::parse(&args.seed)?;
    if seed.host_str().is_none() {
        return Err(anyhow!("seed URL has no host"));
    }
    fs::create_dir_all(&args.output)?;

    let client = Client::builder()
        .user_agent(args.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(5))
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()?;

    tracing::info!(seed = %seed, max_pages = args.max_pages, output = %args.output, "starting crawl");

    let pages = crawl(seed, args.max_pages, |url| fetch_page(client.clone(), url)).await;

    for (i, (url, html)) in pages.iter().enumerate() {
        let path = Path::new(&args.output).join(format!("page{}.html", i + 1));
        fs::write(&path, html)?;
        tracing::info!(%url, path = %path.display(), "saved page");
    }

    Ok(())
}

/// Breadth-first same-origin traversal from the seed, bounded by `max_pages`.
///
/// An explicit worklist instead of recursion; the visited set is keyed on the
/// fragment-stripped URL, so a page is fetched at most once no matter how
/// many links reach it, and the result never exceeds `max_pages` entries.
/// `fetch` returning `Ok(None)` means the page was skipped without counting
/// against the budget; fetch errors are logged and likewise skipped.
async fn crawl<F, Fut>(seed: Url, max_pages: usize, mut fetch: F) -> Vec<(Url, String)>
where
    F: FnMut(Url) -> Fut,
    Fut: Future<Output = Result<Option<String>>>,
{
    let mut frontier: VecDeque<Url> = VecDeque::from([seed.clone()]);
    let mut visited: HashSet<String> = HashSet::new();
    let mut pages: Vec<(Url, String)> = Vec::new();

    while pages.len() < max_pages {
        let Some(url) = frontier.pop_front() else {
            break;
        };
        if !visited.insert(norm(&url)) {
            continue;
        }

        let html = match fetch(url.clone()).await {
            Ok(Some(html)) => html,
            Ok(None) => continue,
            Err(err) => {
                tracing::warn!(%url, error = %err, "fetch failed");
                continue;
            }
        };

        for link in extract_links(&html, &url) {
            if same_origin(&link, &seed) {
                frontier.push_back(link);
            }
        }
        pages.push((url, html));
    }

    tracing::info!(
        saved = pages.len(),
        visited = visited.len(),
        frontier = frontier.len(),
        "crawl complete"
    );
    pages
}

/// Fetch one page; `None` means skipped (non-success status or not HTML).
async fn fetch_page(client: Client, url: Url) -> Result<Option<String>> {
    let resp = client.get(url.clone()).send().await?;
    if !resp.status().is_success() {
        tracing::warn!(%url, status = %resp.status(), "skipping page");
        return Ok(None);
    }
    if let Some(ct) = resp.headers().get(header::CONTENT_TYPE) {
        if let Ok(v) = ct.to_str() {
            if !v.starts_with("text/html") {
                return Ok(None);
            }
        }
    }
    Ok(Some(resp.text().await?))
}

/// All absolute http(s) links on the page, relative hrefs joined against it.
fn extract_links(html: &str, base: &Url) -> Vec<Url> {
    let doc = Html::parse_document(html);
    let sel = Selector::parse("a[href]").expect("valid selector");
    doc.select(&sel)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| Url::parse(href).or_else(|_| base.join(href)).ok())
        .filter(|u| u.scheme().starts_with("http"))
        .collect()
}

fn same_origin(url: &Url, seed: &Url) -> bool {
    url.host_str() == seed.host_str() && url.port_or_known_default() == seed.port_or_known_default()
}

fn norm(u: &Url) -> String {
    let mut s = u.clone();
    s.set_fragment(None);
    s.to_string()
}
