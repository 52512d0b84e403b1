use std::sync::Arc;

use moodreel::api::{ApiConfig, HttpBackend, JourneyApiClient, RetryPolicy, RetryingApi};
use moodreel::cache::FlowCache;
use moodreel::core::MoodreelError;
use moodreel::graph::{draw_ascii, validate, NavigationState, Transition};
use moodreel::JourneySession;

const MAX_ANSWERS: usize = 32;

/// Walks a live journey, always taking the first option.
///
/// Usage: `walkthrough [mood-id] [intention-id]`. The backend is read from
/// `MOODREEL_API_URL`; set `RUST_LOG=debug` to see transitions.
#[tokio::main]
async fn main() -> Result<(), MoodreelError> {
    moodreel::init_tracing();

    let config = ApiConfig::from_env()?;
    println!("Backend: {}", config.base_url);
    let backend = Arc::new(HttpBackend::from_config(&config)?);
    let client = Arc::new(JourneyApiClient::new(config, backend));
    let api = Arc::new(RetryingApi::new(client, RetryPolicy::default()));
    let mut session = JourneySession::new(api, Arc::new(FlowCache::new()));

    // --- Moods ---
    println!("\n=== Moods ===");
    let sentiments = session.sentiments().await?;
    for sentiment in &sentiments {
        println!("  [{}] {} - {}", sentiment.id, sentiment.name, sentiment.description);
    }

    let mut args = std::env::args().skip(1);
    let mood_id = match args.next().or_else(|| sentiments.first().map(|s| s.id.clone())) {
        Some(id) => id,
        None => {
            println!("No moods available.");
            return Ok(());
        }
    };
    let intention_id = args.next();

    // --- Graph ---
    session.begin(&mood_id, intention_id.as_deref()).await;
    if let Some(graph) = session.graph() {
        println!("\n=== Graph ===");
        println!("{}", draw_ascii(graph));
        let defects = validate(graph);
        println!("Defects: {}", defects.len());
        for defect in &defects {
            println!("  {defect}");
        }
    }

    // --- Walk ---
    println!("\n=== Journey ===");
    for _ in 0..MAX_ANSWERS {
        let Some(step) = session.state().step().cloned() else {
            break;
        };
        println!("? {}", step.display_question());
        let Some(option) = step.options.first() else {
            break;
        };
        println!("> {}", option.text);
        if let Transition::Rejected(rejection) = session.select(&option.id) {
            println!("Rejected: {rejection:?}");
            break;
        }
    }

    // --- Outcome ---
    match session.state() {
        NavigationState::Terminal(_) => {
            if let Some(bundle) = session.suggestions() {
                println!("\nSuggested because you chose: {}", bundle.origin_option_text);
                for suggestion in &bundle.suggestions {
                    let year = suggestion
                        .movie
                        .year
                        .map(|y| format!(" ({y})"))
                        .unwrap_or_default();
                    println!("  {}{year}: {}", suggestion.movie.title, suggestion.reason);
                }
            }
        }
        NavigationState::Failed(reason) => println!("\nJourney failed: {reason}"),
        other => println!("\nStopped in state {}", other.name()),
    }

    let stats = session.cache().stats();
    println!("\nCache: {} hits, {} misses", stats.hits, stats.misses);
    Ok(())
}
