use std::{
    env,
    io::{self, Write},
    process::{Command, Stdio},
};

use anyhow::Context;
use chrono::{Local, NaiveDate};

use crewcal::{
    api::CrewCalClient,
    calendar::Event,
    storage::Config,
    store::CalendarStore,
    sync::EventFetcher,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CliArgs {
    pub date: NaiveDate,
    pub demo: bool,
}

pub fn parse_cli_args() -> Result<CliArgs, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args(&args)
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut demo = false;
    let mut date = Local::now().date_naive();
    let mut iter = args.iter().peekable();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--demo" => {
                demo = true;
            }
            "--agenda" => {
                if let Some(next) = iter.peek() {
                    if !next.starts_with("--") {
                        let date_str = iter.next().map(String::as_str).unwrap_or_default();
                        date = NaiveDate::parse_from_str(date_str, "%Y/%m/%d")
                            .map_err(|_| format!("Invalid date '{}'. Use YYYY/MM/DD.", date_str))?;
                    }
                }
            }
            "--help" => {
                println!("Usage: crewcal [--agenda [YYYY/MM/DD]] [--demo]");
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(CliArgs { date, demo })
}

pub async fn run_agenda_mode(args: CliArgs) -> anyhow::Result<()> {
    let events = if args.demo {
        let store = CalendarStore::with_seed_data();
        store
            .events_for_day(args.date)
            .into_iter()
            .cloned()
            .collect()
    } else {
        match fetch_server_events(args.date).await {
            Ok(events) => events,
            Err(e) => {
                eprintln!("Failed to fetch events: {e:#}");
                tracing::error!("Agenda fetch failed: {:#}", e);
                Vec::new()
            }
        }
    };

    let agenda = format_agenda_text(args.date, &events);
    display_with_pager(&agenda)?;
    Ok(())
}

async fn fetch_server_events(date: NaiveDate) -> anyhow::Result<Vec<Event>> {
    let config = Config::load_or_create()?;
    let token = read_cached_token(&config)?;

    let client = CrewCalClient::new(config.server.base_url.clone()).with_token(token);
    let calendars = client.list_calendars().await?;
    let calendar_ids: Vec<i64> = calendars.iter().map(|c| c.id).collect();

    let mut fetcher = EventFetcher::new(
        client,
        config.sync.fetch_past_days,
        config.sync.fetch_future_days,
    );
    fetcher.refetch(&calendar_ids, date, date).await?;

    let mut events = fetcher.events().to_vec();
    events.sort_by_key(|e| e.start);
    Ok(events)
}

fn read_cached_token(config: &Config) -> anyhow::Result<String> {
    let raw = std::fs::read_to_string(&config.server.token_cache)
        .context("not logged in: token cache missing")?;
    let cached: serde_json::Value = serde_json::from_str(&raw)?;
    cached
        .get("token")
        .and_then(|t| t.as_str())
        .map(str::to_string)
        .context("token cache is malformed")
}

fn format_agenda_text(date: NaiveDate, events: &[Event]) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Agenda for {}", date.format("%A, %B %d, %Y")));
    lines.push(String::new());

    if events.is_empty() {
        lines.push("No events scheduled.".to_string());
    } else {
        for event in events {
            lines.push(format!("- {}", build_agenda_line(event)));
        }
    }

    lines.join("\n")
}

fn build_agenda_line(event: &Event) -> String {
    let time_label = if event.all_day {
        "All Day".to_string()
    } else {
        format!("{}-{}", event.start.format("%H:%M"), event.end.format("%H:%M"))
    };

    let mut line = format!("{:<13} {}", time_label, event.title);
    if let Some(notes) = &event.notes
        && !notes.is_empty()
    {
        line.push_str(&format!(" ({})", notes));
    }
    line
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            print!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            print!("{text}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn event(title: &str, all_day: bool) -> Event {
        let start = NaiveDate::from_ymd_opt(2026, 1, 8)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Event {
            id: "e1".to_string(),
            calendar_id: "c1".to_string(),
            title: title.to_string(),
            start,
            end: start + chrono::Duration::minutes(30),
            all_day,
            reminder: None,
            notes: None,
        }
    }

    #[test]
    fn parse_agenda_with_date() {
        let args = parse_args(&strings(&["--agenda", "2026/01/08"])).unwrap();
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2026, 1, 8).unwrap());
        assert!(!args.demo);
    }

    #[test]
    fn parse_agenda_without_date_uses_today() {
        let args = parse_args(&strings(&["--agenda"])).unwrap();
        assert_eq!(args.date, Local::now().date_naive());
    }

    #[test]
    fn parse_rejects_bad_date() {
        let result = parse_args(&strings(&["--agenda", "Jan-8"]));
        assert!(result.is_err());
    }

    #[test]
    fn parse_rejects_unknown_flag() {
        let result = parse_args(&strings(&["--frobnicate"]));
        assert!(result.is_err());
    }

    #[test]
    fn parse_demo_flag() {
        let args = parse_args(&strings(&["--demo", "--agenda", "2026/01/08"])).unwrap();
        assert!(args.demo);
    }

    #[test]
    fn agenda_line_shows_time_range() {
        let line = build_agenda_line(&event("Standup", false));
        assert!(line.starts_with("09:00-09:30"));
        assert!(line.ends_with("Standup"));
    }

    #[test]
    fn agenda_line_labels_all_day() {
        let line = build_agenda_line(&event("Offsite", true));
        assert!(line.starts_with("All Day"));
    }

    #[test]
    fn empty_agenda_says_so() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 8).unwrap();
        let text = format_agenda_text(date, &[]);
        assert!(text.contains("No events scheduled."));
    }
}
