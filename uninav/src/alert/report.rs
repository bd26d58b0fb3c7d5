//! Plaintext distress report.

use std::fmt;

use chrono::{DateTime, TimeZone};

use crate::models::{Coordinate, NavigationSession};

pub const SUBJECT: &str = "UniNav Panic Alert";
pub const DEFAULT_SENDER_NAME: &str = "Unknown Student";
pub const DEFAULT_SENDER_CONTACT: &str = "unknown@example.com";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything the responder is told about the user in distress.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertReport {
    pub sender_name: String,
    pub sender_contact: String,
    pub position: Option<Coordinate>,
    pub destination: Option<Coordinate>,
    /// Present only when there is a position to point at.
    pub map_link: Option<String>,
    pub timestamp: String,
}

impl AlertReport {
    /// Build a report from a session snapshot, stamped with `now`.
    pub fn from_session<Tz>(session: &NavigationSession, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let position = session.current_position();
        Self {
            sender_name: session
                .display_name
                .clone()
                .unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string()),
            sender_contact: session
                .contact_email
                .clone()
                .unwrap_or_else(|| DEFAULT_SENDER_CONTACT.to_string()),
            position,
            destination: session.destination,
            map_link: position.map(map_link),
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

pub fn map_link(position: Coordinate) -> String {
    format!("https://maps.google.com/?q={position}")
}

impl fmt::Display for AlertReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Panic Alert!")?;
        writeln!(f)?;
        writeln!(f, "Name: {}", self.sender_name)?;
        writeln!(f, "Email: {}", self.sender_contact)?;
        match self.position {
            Some(position) => writeln!(f, "Location: {position}")?,
            None => writeln!(f, "Location: Not provided")?,
        }
        match self.destination {
            Some(destination) => writeln!(f, "Destination: {destination}")?,
            None => writeln!(f, "Destination: Not set")?,
        }
        if let Some(link) = &self.map_link {
            writeln!(f, "Google Maps: {link}")?;
        }
        write!(f, "Time: {}", self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::models::PositionFix;

    fn fixed_time() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn empty_session_uses_markers_and_no_link() {
        let report = AlertReport::from_session(&NavigationSession::default(), &fixed_time());

        assert_eq!(report.map_link, None);
        assert_eq!(
            report.to_string(),
            "Panic Alert!\n\n\
             Name: Unknown Student\n\
             Email: unknown@example.com\n\
             Location: Not provided\n\
             Destination: Not set\n\
             Time: 2026-03-14 09:05:07"
        );
    }

    #[test]
    fn full_session_reports_everything() {
        let session = NavigationSession {
            destination: Some(Coordinate::new(5.56, -0.21).unwrap()),
            last_route_coords: None,
            position: Some(PositionFix {
                coordinate: Coordinate::new(5.6, -0.19).unwrap(),
                at: fixed_time(),
            }),
            display_name: Some("Ama Mensah".to_string()),
            contact_email: Some("ama@example.edu".to_string()),
        };

        let body = AlertReport::from_session(&session, &fixed_time()).to_string();

        assert_eq!(
            body,
            "Panic Alert!\n\n\
             Name: Ama Mensah\n\
             Email: ama@example.edu\n\
             Location: 5.6,-0.19\n\
             Destination: 5.56,-0.21\n\
             Google Maps: https://maps.google.com/?q=5.6,-0.19\n\
             Time: 2026-03-14 09:05:07"
        );
    }
}
