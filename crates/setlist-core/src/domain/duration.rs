//! Conversión entre la duración textual de las canciones (`MM:SS`) y minutos
//! fraccionarios.
//!
//! El parseo nunca falla: cualquier entrada que no se pueda interpretar vale
//! `0.0`. Quien llama debe tratar ese cero como "desconocido" y usar la
//! presencia del campo original para decidir qué mostrar.

/// Convierte `"M+:SS"` o un número de minutos (`"4"`, `"3.5"`) a minutos fraccionarios.
///
/// Devuelve `0.0` para `None`, cadenas vacías o formatos no válidos.
pub fn parse_duration(value: Option<&str>) -> f64 {
  value.and_then(parse_minutes).unwrap_or(0.0)
}

/// `true` si [`parse_duration`] puede interpretar el valor.
pub fn is_parseable(value: &str) -> bool {
  parse_minutes(value).is_some()
}

fn parse_minutes(value: &str) -> Option<f64> {
  let value = value.trim();
  if value.is_empty() {
    return None;
  }

  match value.split_once(':') {
    Some((minutes, seconds)) => {
      if !is_digits(minutes) || !is_digits(seconds) || seconds.len() != 2 {
        return None;
      }
      let minutes: u32 = minutes.parse().ok()?;
      let seconds: u32 = seconds.parse().ok()?;
      Some(f64::from(minutes) + f64::from(seconds) / 60.0)
    }
    None => {
      let minutes: f64 = value.parse().ok()?;
      (minutes.is_finite() && minutes >= 0.0).then_some(minutes)
    }
  }
}

fn is_digits(s: &str) -> bool {
  !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Formatea minutos fraccionarios como `M:SS`, o `H:MM:SS` a partir de una hora.
pub fn format_minutes(minutes: f64) -> String {
  let total_seconds = if minutes.is_finite() && minutes > 0.0 { (minutes * 60.0).round() as u64 } else { 0 };

  let hours = total_seconds / 3600;
  let mins = (total_seconds % 3600) / 60;
  let secs = total_seconds % 60;

  if hours > 0 { format!("{hours}:{mins:02}:{secs:02}") } else { format!("{mins}:{secs:02}") }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
  }

  #[test]
  fn test_parses_minutes_and_seconds() {
    assert!(close(parse_duration(Some("4:06")), 4.1));
    assert!(close(parse_duration(Some("0:30")), 0.5));
    assert!(close(parse_duration(Some("125:00")), 125.0));
  }

  #[test]
  fn test_seconds_are_not_range_checked() {
    // dos dígitos bastan; "4:75" vale 4 + 75/60
    assert!(close(parse_duration(Some("4:75")), 5.25));
    assert!(is_parseable("4:75"));
  }

  #[test]
  fn test_parses_bare_minutes() {
    assert!(close(parse_duration(Some("4")), 4.0));
    assert!(close(parse_duration(Some("3.5")), 3.5));
  }

  #[test]
  fn test_malformed_values_are_zero() {
    for raw in ["invalid", "", ":", "4:", ":30", "4:6", "4:006", "4:0a", "1:02:03", "-3", "NaN", "inf"] {
      assert_eq!(parse_duration(Some(raw)), 0.0, "{raw:?}");
      assert!(!is_parseable(raw), "{raw:?}");
    }
    assert_eq!(parse_duration(None), 0.0);
  }

  #[test]
  fn test_zero_is_parseable() {
    assert!(is_parseable("0:00"));
    assert_eq!(parse_duration(Some("0:00")), 0.0);
  }

  #[test]
  fn test_format_minutes() {
    assert_eq!(format_minutes(4.1), "4:06");
    assert_eq!(format_minutes(0.0), "0:00");
    assert_eq!(format_minutes(61.5), "1:01:30");
    assert_eq!(format_minutes(f64::NAN), "0:00");
  }
}
