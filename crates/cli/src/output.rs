use std::io::{self, BufRead, Write};

use anyhow::Context;
use cms_console::{Console, NoticeLevel};
use serde::Serialize;

/// Pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).context("failed to write output")?;
    writeln!(out)?;
    Ok(())
}

/// Echo the newest notice to stderr. Returns it when it reports a failure.
pub fn report_notice(console: &Console) -> Option<String> {
    let notice = console.notices().latest()?;
    eprintln!("{}", notice.message);
    (notice.level == NoticeLevel::Error).then_some(notice.message)
}

/// Ask on stderr and read a yes/no answer from stdin. Anything but yes declines.
pub fn ask(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    let _ = io::stderr().flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
