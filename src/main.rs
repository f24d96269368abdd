use clap::{Arg, ArgAction, ArgMatches, Command};
use koen_translator::mt::llm::DEFAULT_LLM_MODEL;
use koen_translator::shell::render;
use koen_translator::view::Completion;
use koen_translator::{
    Config, FallbackPolicy, Language, PhraseBreakdownView, ProviderKind, Shell, Translation,
    TranslationClient, TranslatorView,
};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("koen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("English-Korean translator and Korean phrase breakdown")
        .arg(
            Arg::new("provider")
                .long("provider")
                .short('p')
                .global(true)
                .value_parser(ProviderKind::NAMES)
                .help("Translation provider (default: $KOEN_PROVIDER or backend)"),
        )
        .arg(
            Arg::new("backend-url")
                .long("backend-url")
                .global(true)
                .help("Base URL of the translation backend (default: $KOEN_BACKEND_URL or http://localhost:8000)"),
        )
        .arg(
            Arg::new("model")
                .long("model")
                .global(true)
                .help(format!("Model for the llm provider (default: $KOEN_LLM_MODEL or {})", DEFAULT_LLM_MODEL)),
        )
        .arg(
            Arg::new("fallback")
                .long("fallback")
                .global(true)
                .help("Show a tagged placeholder instead of an error when translation fails")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Log requests and timings to stderr")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("translate")
                .about("Translate a single text and exit")
                .arg(Arg::new("text").help("Text to translate").required(true).index(1))
                .arg(
                    Arg::new("from")
                        .long("from")
                        .short('f')
                        .help("Source language (en or ko)")
                        .default_value("en"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .short('t')
                        .help("Target language (default: the other language)"),
                ),
        )
        .subcommand(
            Command::new("lookup")
                .about("Break down a Korean phrase and exit")
                .arg(Arg::new("phrase").help("Korean phrase").required(true).index(1)),
        )
        .subcommand(Command::new("shell").about("Interactive translator (default)"))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "koen_translator=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Environment configuration with command-line overrides applied
fn load_config(matches: &ArgMatches) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = Config::from_env()?;
    if let Some(provider) = matches.get_one::<String>("provider") {
        config.provider = provider.parse()?;
    }
    if let Some(url) = matches.get_one::<String>("backend-url") {
        config.backend_url = url.clone();
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config.llm_model = model.clone();
    }
    if matches.get_flag("fallback") {
        config.fallback = FallbackPolicy::Degrade;
    }
    Ok(config)
}

fn parse_language(value: &str) -> Result<Language, Box<dyn std::error::Error>> {
    Ok(value.parse::<Language>()?)
}

/// Translate one text through a translator view, so blank input is
/// rejected before any request is made
async fn translate_text(
    client: &TranslationClient,
    text: &str,
    source: Language,
    target: Language,
) -> Result<Translation, Box<dyn std::error::Error>> {
    let mut view = TranslatorView::new(source, target);
    view.set_input(text);
    match view.translate(client).await? {
        Completion::Translated(translation) => Ok(translation),
        Completion::Failed(message) => Err(message.into()),
        Completion::Stale => Err("translation was abandoned".into()),
    }
}

async fn translate_once(config: &Config, args: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let client = config.translation_client()?;
    let text = args.get_one::<String>("text").map(String::as_str).unwrap_or_default();
    let source = parse_language(args.get_one::<String>("from").map(String::as_str).unwrap_or("en"))?;
    let target = match args.get_one::<String>("to") {
        Some(code) => parse_language(code)?,
        None => source.other(),
    };

    let result = translate_text(&client, text, source, target).await?;
    if let Some(reason) = result.reason() {
        eprintln!("warning: showing a placeholder, translation unavailable ({})", reason);
    }
    println!("{}", result.text());
    Ok(())
}

async fn lookup_once(config: &Config, args: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let client = config.phrase_lookup()?;
    let mut view = PhraseBreakdownView::new();
    view.set_phrase(args.get_one::<String>("phrase").cloned().unwrap_or_default());
    view.lookup(client.as_ref()).await?;

    print!("{}", render::render_breakdown(&view));
    match view.error() {
        Some(message) => Err(message.to_string().into()),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let config = load_config(&matches)?;
    info!(?config, "configuration loaded");

    match matches.subcommand() {
        Some(("translate", args)) => translate_once(&config, args).await,
        Some(("lookup", args)) => lookup_once(&config, args).await,
        _ => {
            let mut shell = Shell::new(config.translation_client()?, config.phrase_lookup()?);
            shell
                .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use koen_translator::mt::{MockMode, MockTranslator};
    use std::sync::Arc;

    #[test]
    fn test_cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn test_translate_subcommand_args() {
        let matches = cli()
            .try_get_matches_from(["koen", "--provider", "mock", "translate", "안녕", "--from", "ko"])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "translate");
        assert_eq!(args.get_one::<String>("text").unwrap(), "안녕");
        assert_eq!(args.get_one::<String>("from").unwrap(), "ko");
        assert_eq!(matches.get_one::<String>("provider").unwrap(), "mock");
    }

    #[test]
    fn test_unknown_provider_rejected_by_parser() {
        assert!(
            cli()
                .try_get_matches_from(["koen", "--provider", "papago"])
                .is_err()
        );
    }

    #[test]
    fn test_flags_override_config() {
        let matches = cli()
            .try_get_matches_from(["koen", "--provider", "mock", "--fallback", "shell"])
            .unwrap();
        let config = load_config(&matches).unwrap();
        assert_eq!(config.provider, ProviderKind::Mock);
        assert_eq!(config.fallback, FallbackPolicy::Degrade);
    }

    #[tokio::test]
    async fn test_translate_text_rejects_blank_input() {
        let mock = MockTranslator::new(MockMode::Reverse);
        let client = TranslationClient::new(Arc::new(mock.clone()));

        let err = translate_text(&client, "   ", Language::English, Language::Korean)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Nothing to translate");
        assert_eq!(mock.call_count(), 0);

        let result = translate_text(&client, "Hello", Language::English, Language::Korean)
            .await
            .unwrap();
        assert_eq!(result.text(), "olleH");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_translate_text_failure_is_error() {
        let mock = MockTranslator::new(MockMode::Error("down".to_string()));
        let client = TranslationClient::new(Arc::new(mock));

        let err = translate_text(&client, "Hello", Language::English, Language::Korean)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("down"));
    }
}
