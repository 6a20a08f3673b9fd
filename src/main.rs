use anyhow::{bail, Context, Result};
use polyglot_insight::analysis::MultiLanguageAnalyzer;
use polyglot_insight::config::Config;
use polyglot_insight::i18n::LanguageRegistry;
use polyglot_insight::translation::{OfflineTranslator, OpenAiTranslator, Translator};
use std::io::Read;
use tracing::{info, warn};

const USAGE: &str =
    "Usage: polyglot-insight [--root <code>] [--targets a,b,c] [--list-languages] [text...]";

#[derive(Debug, Default)]
struct Args {
    root: Option<String>,
    targets: Option<Vec<String>>,
    list_languages: bool,
    help: bool,
    text: Vec<String>,
}

fn parse_args(raw: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut args = Args::default();
    let mut raw = raw.into_iter();

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--root" => {
                args.root = Some(raw.next().context("--root requires a language code")?);
            }
            "--targets" => {
                let list = raw.next().context("--targets requires a comma-separated list")?;
                args.targets = Some(
                    list.split(',')
                        .map(str::trim)
                        .filter(|code| !code.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            }
            "--list-languages" => args.list_languages = true,
            "-h" | "--help" => args.help = true,
            flag if flag.starts_with("--") => bail!("Unknown option {}\n{}", flag, USAGE),
            text => args.text.push(text.to_string()),
        }
    }

    Ok(args)
}

fn print_languages(registry: &LanguageRegistry) {
    for language in registry.iter() {
        println!(
            "{:<4} {:<12} {:?} / {:?} / {} / {}",
            language.code,
            language.name,
            language.family,
            language.script,
            language.word_order,
            language.morphology.as_str()
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when variables come from the environment)
    let _ = dotenvy::dotenv();

    // Initialize logging on stderr, stdout carries the insight
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("polyglot_insight=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = Config::from_env()?;
    let registry = config.load_registry()?;

    if args.list_languages {
        print_languages(&registry);
        return Ok(());
    }

    let text = if args.text.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read text from stdin")?;
        input
    } else {
        args.text.join(" ")
    };

    let translator: Box<dyn Translator> = match config.openai_settings() {
        Some(settings) => {
            info!("Using OpenAI translator ({})", settings.model);
            Box::new(OpenAiTranslator::new(settings))
        }
        None => {
            warn!("OPENAI_API_KEY not set, unrelated languages will use placeholders");
            Box::new(OfflineTranslator)
        }
    };

    let analyzer = MultiLanguageAnalyzer::new(registry, translator, config.load_settings()?)
        .with_unrelated_count(config.unrelated_languages)
        .with_translation_timeout(config.translation_timeout());

    let root = args.root.unwrap_or(config.root_language);
    let targets: Option<Vec<&str>> = args
        .targets
        .as_ref()
        .map(|codes| codes.iter().map(String::as_str).collect());

    let insight = analyzer
        .analyze(&text, &root, targets.as_deref())
        .await
        .with_context(|| format!("Analysis from root '{}' failed", root))?;

    println!("{}", serde_json::to_string_pretty(&insight)?);

    let report = analyzer.metrics().report();
    info!(
        "Translations: {} requested, {} succeeded, {} placeholders ({:.1}% success)",
        report.requests, report.successes, report.placeholders, report.success_rate
    );

    Ok(())
}
