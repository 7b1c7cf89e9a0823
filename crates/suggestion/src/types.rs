use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(EnumString, Display, VariantArray, Default, Clone, Copy, Debug, PartialEq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    #[default]
    New,
    Read,
    Responded,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_status_round_trips_lowercase() {
        for status in Status::VARIANTS {
            assert_eq!(Status::from_str(&status.to_string()).ok(), Some(*status));
        }

        assert_eq!(Status::New.to_string(), "new");
        assert_eq!(Status::Responded.as_ref(), "responded");
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        assert!(Status::from_str("archived").is_err());
        assert!(Status::from_str("").is_err());
        assert!(Status::from_str("New").is_err());
    }
}
