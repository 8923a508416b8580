use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use hms_scaffold::application::{WatchEvent, WatchOptions, WatchUseCase};

pub fn cmd_watch(config: &Path, force: bool, strict: bool, json: bool) -> Result<()> {
    let options = WatchOptions::new(config)
        .with_force(force)
        .with_strict(strict.then_some(true));

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("setting Ctrl+C handler")?;

    WatchUseCase::new(options).start(running, |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            let line = format!("[{}] {}", timestamp(), event.to_text());
            match event {
                WatchEvent::Error { .. } => eprintln!("{line}"),
                _ => println!("{line}"),
            }
        }
    })?;

    Ok(())
}

/// Wall-clock `HH:MM:SS` (UTC)
fn timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 86_400;
            let h = secs / 3600;
            let m = (secs % 3600) / 60;
            let s = secs % 60;
            format!("{:02}:{:02}:{:02}", h, m, s)
        })
        .unwrap_or_else(|_| "00:00:00".to_string())
}
