//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod draft_guide_error_tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = DraftGuideError::from(io_error);

        match error {
            DraftGuideError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = DraftGuideError::from(json_error);

        match error {
            DraftGuideError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_error = "twenty-four".parse::<u16>().unwrap_err();
        let error = DraftGuideError::from(parse_error);

        match error {
            DraftGuideError::InvalidSeason(_) => (),
            _ => panic!("Expected InvalidSeason error variant"),
        }
    }

    #[test]
    fn test_csv_error_carries_path() {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("a,b\nc".as_bytes());
        let csv_error = reader
            .records()
            .find_map(|r| r.err())
            .expect("uneven row should fail");

        let error = DraftGuideError::csv(std::path::Path::new("data/weekly_stats.csv"), csv_error);
        let message = error.to_string();
        assert!(message.contains("CSV error in data/weekly_stats.csv"));
    }

    #[test]
    fn test_invalid_level_error() {
        let error = DraftGuideError::InvalidLevel {
            level: "monthly".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("monthly"));
        assert!(message.contains("'season' or 'weekly'"));
    }

    #[test]
    fn test_duplicate_record_error() {
        let error = DraftGuideError::DuplicateRecord {
            table: "active_rosters".to_string(),
            key: "00-0033873".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Duplicate active_rosters record for key 00-0033873"
        );
    }

    #[test]
    fn test_missing_data_dir_error() {
        let error = DraftGuideError::MissingDataDir {
            env_var: "FFL_DRAFT_GUIDE_DATA_DIR".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("Data directory not provided"));
        assert!(message.contains("FFL_DRAFT_GUIDE_DATA_DIR"));
    }

    #[test]
    fn test_not_found_errors() {
        let player = DraftGuideError::PlayerNotFound {
            id: "00-0000001".to_string(),
        };
        let team = DraftGuideError::TeamNotFound {
            team: "XYZ".to_string(),
        };
        let coach = DraftGuideError::CoachNotFound {
            name: "Nobody".to_string(),
        };

        assert_eq!(player.to_string(), "Player not found: 00-0000001");
        assert_eq!(team.to_string(), "Team not found: XYZ");
        assert_eq!(coach.to_string(), "Coach not found: Nobody");
    }

    #[test]
    fn test_error_debug_format() {
        let error = DraftGuideError::InvalidRole {
            role: "Special Teams".to_string(),
        };

        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("InvalidRole"));
        assert!(debug_str.contains("Special Teams"));
    }
}
