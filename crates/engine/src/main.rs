//! Davokar Engine - roll a dice pool for a character file.
//!
//! Usage: `davokar-engine <character.json> <term>... [--mod N]`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use davokar_domain::{CharacterSnapshot, RollRequest};
use davokar_engine::infrastructure::auto_prompt::AcceptDefaultsPrompt;
use davokar_engine::infrastructure::local_roller::LocalRollEvaluator;
use davokar_engine::infrastructure::notifications::TracingNotifier;
use davokar_engine::infrastructure::ports::{
    NotificationSink, RollEvaluator, SelectionPrompt,
};
use davokar_engine::infrastructure::random::SystemRandom;
use davokar_engine::infrastructure::settings::SystemSettings;
use davokar_engine::use_cases::SkillRoll;

struct Args {
    character: PathBuf,
    terms: Vec<String>,
    modifier: i32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "davokar_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    let settings = SystemSettings::from_env();
    tracing::debug!(?settings, "Settings loaded");

    let raw = std::fs::read_to_string(&args.character)
        .with_context(|| format!("reading {}", args.character.display()))?;
    let snapshot: CharacterSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.character.display()))?;
    tracing::info!(character = %snapshot.name, "Character loaded");

    let evaluator: Arc<dyn RollEvaluator> = Arc::new(LocalRollEvaluator::new(
        Arc::new(SystemRandom::new()),
        settings.max_pushes,
    ));
    let notifier: Arc<dyn NotificationSink> = Arc::new(TracingNotifier);
    let prompt: Arc<dyn SelectionPrompt> = Arc::new(AcceptDefaultsPrompt);
    let rolls = SkillRoll::new(prompt, evaluator, notifier);

    let request = RollRequest::new(args.terms).with_modifier(args.modifier);
    let (built, posted) = rolls.roll_request(&snapshot, &request, None).await?;

    println!("{}", built.formula);
    println!(
        "{}: {} success(es), {} bane(s)  {}",
        posted.flavor, posted.successes, posted.banes, posted.breakdown
    );
    Ok(())
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let Some(character) = raw.next() else {
        bail!("usage: davokar-engine <character.json> <term>... [--mod N]");
    };

    let mut terms = Vec::new();
    let mut modifier = 0;
    while let Some(arg) = raw.next() {
        if arg == "--mod" {
            let value = raw.next().context("--mod needs a value")?;
            modifier = value
                .parse()
                .with_context(|| format!("invalid modifier '{}'", value))?;
        } else {
            terms.push(arg);
        }
    }

    Ok(Args {
        character: PathBuf::from(character),
        terms,
        modifier,
    })
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
