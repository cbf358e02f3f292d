//! Command handlers.

use super::commands::{Cli, Commands};
use archivist::{
    ArchivistConfig, ArchivistResult, ConfigError, ConfigErrorKind, FileUsageStore, JsonError,
    ShapedResponse, TierPolicyEngine, TopicExtractor, UsageSummary, summarize_session,
};
use chrono::Utc;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Runs the parsed command.
pub fn handle_command(cli: Cli) -> ArchivistResult<()> {
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Config => {
            let text = toml::to_string_pretty(&config)
                .map_err(|e| ConfigError::new(ConfigErrorKind::Render(e.to_string())))?;
            print!("{}", text);
            Ok(())
        }
        Commands::Ask {
            user,
            query,
            answer,
            words,
        } => {
            let engine = open_engine(&config, cli.store)?;
            ask(&engine, &config, &user, &query, answer.as_deref(), words)
        }
        Commands::Record { user, topic, words } => {
            let engine = open_engine(&config, cli.store)?;
            let record = engine.record(&user, Some(topic.as_str()), words, Utc::now())?;
            let summary = UsageSummary::from_record(&record, *engine.limits().daily_queries());
            print_json("usage summary", &summary)
        }
        Commands::Stats { user } => {
            let engine = open_engine(&config, cli.store)?;
            let summary = engine.stats(&user, Utc::now())?;
            print_json("session summary", &summarize_session(summary))
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> ArchivistResult<ArchivistConfig> {
    match path {
        Some(path) => ArchivistConfig::from_file(path),
        None => ArchivistConfig::load(),
    }
}

fn open_engine(
    config: &ArchivistConfig,
    store: Option<PathBuf>,
) -> ArchivistResult<TierPolicyEngine<FileUsageStore>> {
    let path = store
        .or_else(|| config.storage_path())
        .ok_or_else(|| ConfigError::new(ConfigErrorKind::MissingStorage))?;
    debug!(path = %path.display(), "Opening usage store");
    TierPolicyEngine::from_config(config, FileUsageStore::new(path)?)
}

fn ask(
    engine: &TierPolicyEngine<FileUsageStore>,
    config: &ArchivistConfig,
    user: &str,
    query: &str,
    answer: Option<&str>,
    words: Option<u64>,
) -> ArchivistResult<()> {
    let now = Utc::now();
    let topic = TopicExtractor::with_keywords(&config.topics.keywords).extract(query);
    let session = engine.begin(user, Some(topic.as_str()), now)?;

    let response = ShapedResponse::new(
        session.tier(),
        session.policy().clone(),
        session.topic(),
        answer.unwrap_or_default(),
    );

    let delivered = match (words, answer) {
        (Some(words), _) => Some(words),
        (None, Some(_)) => Some(*response.word_count()),
        (None, None) => None,
    };
    let recorded = match delivered {
        Some(words) => {
            let record = session.finish(words, now)?;
            info!(user, queries = *record.queries_count(), "Recorded query");
            Some(UsageSummary::from_record(&record, *engine.limits().daily_queries()))
        }
        None => None,
    };

    print_json(
        "ask result",
        &AskOutput {
            topic: &topic,
            response: &response,
            usage: recorded,
        },
    )
}

#[derive(Serialize)]
struct AskOutput<'a> {
    topic: &'a str,
    response: &'a ShapedResponse,
    usage: Option<UsageSummary>,
}

fn print_json<T: Serialize>(subject: &'static str, value: &T) -> ArchivistResult<()> {
    let text =
        serde_json::to_string_pretty(value).map_err(|e| JsonError::new(subject, e.to_string()))?;
    println!("{}", text);
    Ok(())
}
