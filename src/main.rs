//! Smart feed CLI: rank a JSON snapshot and print the page as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

use feed::config::Config;
use feed::embedding::{EmbeddingProvider, HashingEmbedder, OpenAiEmbedder};
use feed::explain::{Explainer, GenaiExplanationProvider};
use feed::feed::FeedService;
use feed::ranking::FeedRanker;
use feed::store::MemoryStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: smart-feed <snapshot.json> jobs <worker_id> [limit]\n       \
                     smart-feed <snapshot.json> candidates <job_id> [limit]";

#[derive(Debug, PartialEq)]
enum Command {
    Jobs { worker_id: u64 },
    Candidates { job_id: u64 },
}

#[derive(Debug)]
struct Args {
    snapshot: PathBuf,
    command: Command,
    limit: Option<usize>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let (Some(snapshot), Some(command), Some(id)) = (args.next(), args.next(), args.next()) else {
        bail!(USAGE);
    };
    let id: u64 = id.parse().with_context(|| format!("invalid id '{id}'"))?;
    let limit = args
        .next()
        .map(|l| l.parse::<usize>().with_context(|| format!("invalid limit '{l}'")))
        .transpose()?;

    let command = match command.as_str() {
        "jobs" => Command::Jobs { worker_id: id },
        "candidates" => Command::Candidates { job_id: id },
        other => bail!("unknown command '{other}'\n{USAGE}"),
    };

    Ok(Args {
        snapshot: PathBuf::from(snapshot),
        command,
        limit,
    })
}

fn build_providers(config: &Config) -> anyhow::Result<(Arc<dyn EmbeddingProvider>, Explainer)> {
    let Some(api_key) = &config.openai_api_key else {
        tracing::warn!("No API key configured, using offline hashing embedder without explanations");
        return Ok((Arc::new(HashingEmbedder::new()), Explainer::disabled()));
    };

    let embedder = OpenAiEmbedder::new(
        api_key,
        &config.openai_base_url,
        &config.embed_model,
        config.provider_timeout,
    )?;
    let explainer = Explainer::new(Arc::new(GenaiExplanationProvider::with_openai_endpoint(
        api_key,
        &config.openai_base_url,
        &config.chat_model,
        &config.explain_context,
    )))
    .with_limit(config.explain_limit)
    .with_timeout(config.provider_timeout)
    .with_max_concurrency(config.max_concurrency);

    Ok((Arc::new(embedder), explainer))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        snapshot = %args.snapshot.display(),
        embed_model = %config.embed_model,
        explore_rate = config.explore_rate,
        "Smart feed starting"
    );

    let store = MemoryStore::load_json(&args.snapshot)
        .with_context(|| format!("failed to load snapshot {}", args.snapshot.display()))?;
    let (embedder, explainer) = build_providers(&config)?;

    let ranker = FeedRanker::new(store, embedder, explainer, config.ranking_policy());
    let service = FeedService::new(ranker)
        .with_pool_limits(config.job_pool_limit, config.worker_pool_limit);

    let output = match args.command {
        Command::Jobs { worker_id } => {
            serde_json::to_string_pretty(&service.jobs_feed(worker_id, args.limit).await?)?
        }
        Command::Candidates { job_id } => {
            serde_json::to_string_pretty(&service.candidates_feed(job_id, args.limit).await?)?
        }
    };
    println!("{output}");

    Ok(())
}
