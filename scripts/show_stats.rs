//! Stats Preview Script
//!
//! Prints the stats reply the bot would post for a username, without posting
//! anything. Credentials come from the same environment variables as the bot.

use std::io::{self, Write};

use statsbot::{
    analyze_tweets, fetch_user_tweets, generate_stats, FrequencyCount, Timeframe, TwitterConfig,
    XApiClient,
};

/// Reads one trimmed line from stdin after printing `prompt`.
fn prompt(prompt: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prints every counted token in first-seen order.
fn print_breakdown(title: &str, counts: &FrequencyCount) {
    if counts.is_empty() {
        return;
    }
    println!("\n{} ({} distinct):", title, counts.len());
    for (token, count) in counts.iter() {
        println!("  {} x{}", token, count);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    println!("📊 Twitter Stats Preview Tool");
    println!("=============================");

    let username = prompt("👤 Enter a username: ")?;
    let username = username.trim_start_matches('@').to_string();
    if !statsbot::twitter::is_valid_username(&username) {
        println!("❌ '{}' is not a valid username!", username);
        return Err("A valid username is required".into());
    }

    let timeframe_input =
        prompt("🗓️ Timeframe (daily, weekly, monthly, yearly, or empty for all): ")?;
    let timeframe = if timeframe_input.is_empty() {
        None
    } else {
        match Timeframe::from_keyword(&timeframe_input) {
            Some(timeframe) => Some(timeframe),
            None => {
                println!("❌ Unknown timeframe '{}'", timeframe_input);
                return Err("Unknown timeframe".into());
            }
        }
    };

    let config = TwitterConfig::from_env()?;
    let client = XApiClient::new(config)?;

    println!("\n🚀 Fetching tweets for @{}...", username);
    let tweets = fetch_user_tweets(&client, &username, timeframe).await;
    if tweets.is_empty() {
        println!("🤷 No tweets found for @{}", username);
        return Ok(());
    }

    println!("📏 Analyzing {} tweets\n", tweets.len());
    let stats = analyze_tweets(&tweets);
    println!("{}", generate_stats(&username, &stats, timeframe));

    print_breakdown("😀 Emojis", &stats.emojis);
    print_breakdown("#️⃣ Hashtags", &stats.hashtags);

    Ok(())
}
