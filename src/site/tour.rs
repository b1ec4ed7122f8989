use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TourError {
    #[error("Failed to read tour dates: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse tour dates: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One show on the tour page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourDate {
    pub id: String,
    /// ISO date (YYYY-MM-DD) used for ordering and filtering
    pub date: String,
    /// Human readable date, e.g. "Mar 15, 2024"
    pub display_date: String,
    pub venue: String,
    pub city: String,
    /// State, province or country code
    pub region: String,
    pub country: String,
    /// Tickets show as "TBA" without one
    pub ticket_url: Option<String>,
    #[serde(default)]
    pub sold_out: bool,
    pub notes: Option<String>,
}

impl TourDate {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Read tour dates from a JSON array file
pub fn load_tour_dates(path: &Path) -> Result<Vec<TourDate>, TourError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn dated(dates: &[TourDate]) -> impl Iterator<Item = (NaiveDate, &TourDate)> {
    dates
        .iter()
        .filter_map(|d| d.parsed_date().map(|date| (date, d)))
}

/// Shows on or after `today`, soonest first
pub fn upcoming(dates: &[TourDate], today: NaiveDate) -> Vec<TourDate> {
    let mut shows: Vec<_> = dated(dates).filter(|(date, _)| *date >= today).collect();
    shows.sort_by_key(|(date, _)| *date);
    shows.into_iter().map(|(_, d)| d.clone()).collect()
}

/// Shows before `today`, most recent first
pub fn past(dates: &[TourDate], today: NaiveDate) -> Vec<TourDate> {
    let mut shows: Vec<_> = dated(dates).filter(|(date, _)| *date < today).collect();
    shows.sort_by(|(a, _), (b, _)| b.cmp(a));
    shows.into_iter().map(|(_, d)| d.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(id: &str, date: &str) -> TourDate {
        TourDate {
            id: id.to_string(),
            date: date.to_string(),
            display_date: date.to_string(),
            venue: "The Fillmore".to_string(),
            city: "San Francisco".to_string(),
            region: "CA".to_string(),
            country: "USA".to_string(),
            ticket_url: None,
            sold_out: false,
            notes: None,
        }
    }

    fn ids(dates: &[TourDate]) -> Vec<&str> {
        dates.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_partition_by_today() {
        let dates = vec![
            show("a", "2024-03-28"),
            show("b", "2024-03-15"),
            show("c", "2024-03-22"),
            show("d", "2024-03-18"),
            show("bad", "next spring"),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();

        assert_eq!(ids(&upcoming(&dates, today)), vec!["c", "a"]);
        assert_eq!(ids(&past(&dates, today)), vec!["d", "b"]);
    }

    #[test]
    fn test_show_today_is_upcoming() {
        let dates = vec![show("today", "2024-03-20")];
        let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        assert_eq!(upcoming(&dates, today).len(), 1);
        assert!(past(&dates, today).is_empty());
    }

    #[test]
    fn test_load_tour_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tour.json");
        std::fs::write(
            &path,
            r#"[{"id": "1", "date": "2024-03-15", "displayDate": "Mar 15, 2024",
                "venue": "The Roxy Theatre", "city": "Los Angeles", "region": "CA",
                "country": "USA", "ticketUrl": "https://tickets.example.com", "soldOut": true}]"#,
        )
        .unwrap();

        let dates = load_tour_dates(&path).unwrap();
        assert_eq!(dates.len(), 1);
        assert!(dates[0].sold_out);
        assert!(dates[0].notes.is_none());
    }
}
