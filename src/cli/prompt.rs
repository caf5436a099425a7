// Interactive prompts for operator-supplied run parameters
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use gold_price_monitor::{MonitorError, MonitorResult, MonitorSettings};

/// Ask for one value. Empty input or end of input keeps `default`.
pub fn prompt_value<T, R, W>(input: &mut R, output: &mut W, label: &str, default: T) -> MonitorResult<T>
where
    T: FromStr + Display,
    R: BufRead,
    W: Write,
{
    write!(output, "{} (default {}): ", label, default)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let answer = line.trim();
    if answer.is_empty() {
        return Ok(default);
    }

    answer.parse::<T>().map_err(|_| {
        MonitorError::InvalidInput(label.to_string(), format!("'{}' is not a valid number", answer))
    })
}

/// Ask for thresholds and check count, in that order, using the current
/// settings as defaults
pub fn prompt_run_settings<R: BufRead, W: Write>(
    settings: &mut MonitorSettings,
    input: &mut R,
    output: &mut W,
) -> MonitorResult<()> {
    settings.low_threshold = prompt_value(input, output, "Low alert", settings.low_threshold)?;
    settings.high_threshold = prompt_value(input, output, "High alert", settings.high_threshold)?;
    settings.checks = prompt_value(input, output, "How many checks?", settings.checks)?;
    Ok(())
}
