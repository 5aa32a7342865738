use chrono::{DateTime, FixedOffset, Local};
use microadventure_core::{CoreError, StreakTransition, FALLBACK_MESSAGE};

use super::open_session;

pub fn generate() -> Result<(), Box<dyn std::error::Error>> {
    let (_, mut session) = open_session()?;
    match session.generate() {
        Ok(generated) => {
            if let Some(warning) = &generated.warning {
                eprintln!("warning: {warning}");
            }
            println!("{}", generated.prompt);
        }
        Err(CoreError::NoContentAvailable) => println!("{FALLBACK_MESSAGE}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn parse_time(at: Option<&str>) -> Result<DateTime<FixedOffset>, Box<dyn std::error::Error>> {
    match at {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map_err(|e| format!("invalid --at '{s}': {e}").into()),
        None => Ok(Local::now().fixed_offset()),
    }
}

fn describe(transition: StreakTransition) -> String {
    match transition {
        StreakTransition::Started => "streak started".to_string(),
        StreakTransition::Extended => "streak extended".to_string(),
        StreakTransition::Reset { previous } => format!("streak reset (was {previous})"),
        StreakTransition::AlreadyCountedToday => "already counted today".to_string(),
    }
}

pub fn complete(at: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let now = parse_time(at)?;
    let (_, mut session) = open_session()?;

    let report = match session.complete(now) {
        Ok(report) => report,
        Err(CoreError::NoActivePrompt) => {
            return Err("no adventure in progress; run `generate` first".into())
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(warning) = &report.warning {
        eprintln!("warning: {warning}");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Good job! Ready for another?");
        println!(
            "Streak: {} ({})",
            report.state.streak(),
            describe(report.transition)
        );
    }
    Ok(())
}

pub fn share(url: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let (config, session) = open_session()?;
    let url = url.unwrap_or(config.share.url);
    match session.share_message(&url) {
        Ok(message) => {
            println!("{}", config.share.title);
            println!("{message}");
        }
        Err(CoreError::NoActivePrompt) => {
            return Err("no adventure to share; run `generate` first".into())
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
