use chrono::Local;
use microadventure_core::{Config, SqliteStore, StreakTracker};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView<'a> {
    streak: u32,
    streak_alive: bool,
    last_completion_date: Option<String>,
    last_adventure_text: Option<&'a str>,
    completed: usize,
}

pub fn status(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = StreakTracker::new(SqliteStore::open()?);
    let state = tracker.get_state();
    let today = Local::now().date_naive();

    let view = StatusView {
        streak: state.streak(),
        streak_alive: state.streak_alive_on(today),
        last_completion_date: state.last_completion_date().map(|d| d.to_string()),
        last_adventure_text: state.last_adventure_text(),
        completed: state.history().len(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Streak: {}", view.streak);
    if view.streak > 0 && !view.streak_alive {
        println!("(complete an adventure today to start a new streak)");
    }
    println!(
        "Last adventure: {}",
        view.last_adventure_text.unwrap_or("none yet")
    );
    Ok(())
}

pub fn history(limit: Option<usize>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let tracker = StreakTracker::new(SqliteStore::open()?);
    let state = tracker.get_state();
    let limit = limit.unwrap_or(config.history.show);
    let entries: Vec<_> = state.history().iter().take(limit).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No completed adventures yet.");
        return Ok(());
    }
    for entry in entries {
        let when = entry.timestamp().with_timezone(&Local);
        println!("{}  {}", when.format("%Y-%m-%d %H:%M"), entry.text());
    }
    Ok(())
}
