use std::collections::BTreeMap;

/// Parse `"<Day>: <Hours>"` lines into a map keyed by day name.
///
/// Lines that don't match are dropped.
pub fn parse_opening_hours<S: AsRef<str>>(lines: &[S]) -> BTreeMap<String, String> {
  lines
    .iter()
    .filter_map(|line| parse_line(line.as_ref()))
    .collect()
}

fn parse_line(line: &str) -> Option<(String, String)> {
  let (day, hours) = line.split_once(':')?;
  let day = day.trim();
  let hours = hours.trim();

  if day.is_empty() || hours.is_empty() || !day.chars().all(char::is_alphabetic) {
    return None;
  }

  Some((day.to_string(), hours.to_string()))
}
