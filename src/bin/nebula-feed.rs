use clap::{App, Arg};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use nebula_art::config::ClientOptions;
use nebula_art::error::Error;
use nebula_art::persistence::FileStore;
use nebula_art::recommend::{display_aspect_ratio, score, sort_by_recommendation, UserPreferences};
use nebula_art::store::Store;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let matches = App::new("nebula-feed")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print the ranked NebulaArt feed")
        .arg(
            Arg::new("offline")
                .long("offline")
                .help("Use the bundled catalog instead of the API"),
        )
        .arg(
            Arg::new("state-dir")
                .long("state-dir")
                .value_name("DIR")
                .takes_value(true)
                .default_value(".nebula")
                .help("Directory holding the persisted state"),
        )
        .arg(
            Arg::new("top")
                .short('n')
                .long("top")
                .value_name("COUNT")
                .takes_value(true)
                .default_value("10")
                .help("Number of artworks to print"),
        )
        .get_matches();

    let options = ClientOptions::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let top = matches
        .value_of("top")
        .unwrap_or("10")
        .parse::<usize>()
        .map_err(|e| Error::config(format!("--top is not a number: {}", e)))?;
    let storage = Arc::new(FileStore::new(matches.value_of("state-dir").unwrap_or(".nebula")));

    let store = if matches.is_present("offline") {
        let mut store = Store::offline(options, storage);
        store.load_from_storage().await;
        store.load_mock_data().await;
        store
    } else {
        let mut store = Store::with_api(options, storage);
        store.bootstrap().await;
        store
    };

    let state = store.state();
    let prefs = UserPreferences::from_state(state);
    let ranked = sort_by_recommendation(state.artworks(), &prefs);

    match state.current_user() {
        Some(user) => println!("Feed for {} ({} following)", user.name, state.following_list().len()),
        None => println!("Feed (signed out)"),
    }
    for (rank, artwork) in ranked.iter().take(top).enumerate() {
        println!(
            "{:>3}. {:<40} {:<20} {:>8.1}  {:.2}",
            rank + 1,
            artwork.title,
            artwork.artist.name,
            score(artwork, &prefs),
            display_aspect_ratio(artwork),
        );
    }
    println!(
        "{} artworks, {} unread notifications",
        state.artworks().len(),
        state.unread_notification_count()
    );

    store.save_to_storage().await;
    Ok(())
}
