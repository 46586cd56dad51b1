//! HTML page for the log list.
//!
//! Entries arrive newest first. A day separator precedes the first entry of
//! every calendar date, where dates are taken in the display timezone.

use crate::{models::log::log_entry::LogEntry, util::html_escape};
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::time::Instant;

const DAY_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

pub struct LogPage<'a> {
  pub owner: &'a str,
  pub timezone: Tz,
}

impl LogPage<'_> {
  /// Render the full document. The footer reports time elapsed since `started`.
  pub fn render(&self, entries: &[LogEntry], started: Instant) -> String {
    let owner = html_escape(self.owner);
    let mut page = String::new();
    page.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"utf-8\" />\n");
    page.push_str(
      "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n",
    );
    page.push_str(&format!("<title>{owner}'s Logs</title>\n"));
    page.push_str("</head>\n<body>\n");
    page.push_str("<div style=\"max-width: 960px; margin: 0 auto;\">\n");
    page.push_str(&format!("<p><strong>{owner}'s Logs</strong></p>\n"));
    page.push_str(&format!("<p>Current TZ: {}.</p>\n", self.timezone.name()));
    page.push_str("<ul>\n");

    let mut prev_day: Option<NaiveDate> = None;
    for entry in entries {
      let local = entry.timestamp.with_timezone(&self.timezone);
      let day = local.date_naive();
      if prev_day != Some(day) {
        page.push_str(&format!(
          "<li class=\"day\"><strong>{}</strong></li>\n",
          day.format(DAY_FORMAT)
        ));
        prev_day = Some(day);
      }
      page.push_str(&format!(
        "<li>{}: {}</li>\n",
        local.format(TIME_FORMAT),
        html_escape(&entry.content)
      ));
    }

    page.push_str("</ul>\n");
    page.push_str(&format!(
      "<p style=\"text-align: center;\">Rendered {} logs in {} ms.</p>\n",
      entries.len(),
      started.elapsed().as_millis()
    ));
    page.push_str("</div>\n</body>\n</html>\n");
    page
  }
}
