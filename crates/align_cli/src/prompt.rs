//! Interactive collection of search parameters that were not given as flags.

use align_core::float_range::resolve_display;
use align_core::{AlignError, Precision, SpeedPreset};
use anyhow::{bail, Result};
use std::io::{BufRead, Write};

/// Asks for a value until `parse` accepts it. Invalid input is reported and
/// asked for again; end of input is an error.
pub fn prompt_until_valid<R, W, T, F>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
    parse: F,
) -> Result<T>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> std::result::Result<T, AlignError>,
{
    loop {
        write!(writer, "{label}: ")?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            bail!("input ended before a value for '{}' was given", label);
        }
        match parse(line.trim()) {
            Ok(value) => return Ok(value),
            Err(err) => writeln!(writer, "{err}")?,
        }
    }
}

/// Uses `given` when `parse` accepts it. Otherwise reports why and prompts.
pub fn given_or_prompt<R, W, T, F>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
    given: Option<&str>,
    parse: F,
) -> Result<T>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> std::result::Result<T, AlignError>,
{
    if let Some(text) = given {
        match parse(text.trim()) {
            Ok(value) => return Ok(value),
            Err(err) => writeln!(writer, "{err}")?,
        }
    }
    prompt_until_valid(reader, writer, label, parse)
}

/// The displayed target position, checked the way a search at `precision`
/// will read it.
pub fn parse_target(text: &str, precision: Precision) -> std::result::Result<String, AlignError> {
    match precision {
        Precision::Single => resolve_display::<f32>(text).map(|_| ()),
        Precision::Double => resolve_display::<f64>(text).map(|_| ()),
    }?;
    Ok(text.to_string())
}

pub fn parse_ticks_per_second(text: &str) -> std::result::Result<f64, AlignError> {
    let value: f64 = text
        .parse()
        .map_err(|_| AlignError::InvalidInput(format!("'{text}' is not a number")))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(AlignError::InvalidInput(
            "ticks per second must be positive".to_string(),
        ));
    }
    Ok(value)
}

pub fn parse_speed(text: &str) -> std::result::Result<SpeedPreset, AlignError> {
    text.parse()
}

/// Empty input means no leniency.
pub fn parse_leniency(text: &str) -> std::result::Result<f64, AlignError> {
    if text.is_empty() {
        return Ok(0.0);
    }
    let value: f64 = text
        .parse()
        .map_err(|_| AlignError::InvalidInput(format!("'{text}' is not a number")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(AlignError::InvalidInput(
            "leniency must not be negative".to_string(),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reprompts_until_valid() {
        let mut input = Cursor::new("abc\n-5\n240\n");
        let mut output = Vec::new();
        let tps = prompt_until_valid(&mut input, &mut output, "TPS", parse_ticks_per_second)
            .expect("third line is valid");
        assert_eq!(tps, 240.0);

        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(transcript.matches("TPS: ").count(), 3);
        assert!(transcript.contains("'abc' is not a number"));
        assert!(transcript.contains("must be positive"));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut input = Cursor::new("nope\n");
        let mut output = Vec::new();
        let result = prompt_until_valid(&mut input, &mut output, "Speed", parse_speed);
        assert!(result.is_err());
    }

    #[test]
    fn target_is_checked_but_kept_verbatim() {
        assert_eq!(
            parse_target(" 100.000000", Precision::Single).unwrap(),
            " 100.000000"
        );
        assert!(parse_target("-1", Precision::Single).is_err());
    }

    #[test]
    fn target_is_checked_at_the_chosen_precision() {
        assert!(parse_target("1e300", Precision::Single).is_err());
        assert_eq!(parse_target("1e300", Precision::Double).unwrap(), "1e300");
    }

    #[test]
    fn valid_given_value_skips_the_prompt() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let tps = given_or_prompt(
            &mut input,
            &mut output,
            "TPS",
            Some("240"),
            parse_ticks_per_second,
        )
        .expect("given value is valid");
        assert_eq!(tps, 240.0);
        assert!(output.is_empty());
    }

    #[test]
    fn invalid_given_value_falls_back_to_prompt() {
        let mut input = Cursor::new("100\n");
        let mut output = Vec::new();
        let target = given_or_prompt(&mut input, &mut output, "Target", Some("-5"), |text| {
            parse_target(text, Precision::Single)
        })
        .expect("prompted value is valid");
        assert_eq!(target, "100");

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("negative"));
        assert_eq!(transcript.matches("Target: ").count(), 1);
    }

    #[test]
    fn invalid_given_value_at_end_of_input_is_an_error() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let result = given_or_prompt(
            &mut input,
            &mut output,
            "TPS",
            Some("0"),
            parse_ticks_per_second,
        );
        assert!(result.is_err());
    }

    #[test]
    fn blank_leniency_defaults_to_zero() {
        assert_eq!(parse_leniency("").unwrap(), 0.0);
        assert_eq!(parse_leniency("0.25").unwrap(), 0.25);
        assert!(parse_leniency("-0.1").is_err());
    }
}
