use entity::constants::{InquiryStatus, VehicleStatus};
use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;
use validator::ValidationError;

lazy_static! {
    /// a non negative decimal number with at most 10 integer
    /// and 2 fractional digits, eg: "74990.00"
    pub static ref REGEX_IS_MONEY_AMOUNT: Regex =
        Regex::new(r"^\d{1,10}(\.\d{1,2})?$").unwrap();
}

pub fn is_vehicle_status(status: &str) -> Result<(), ValidationError> {
    VehicleStatus::from_str(status)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid vehicle status"))
}

pub fn is_inquiry_status(status: &str) -> Result<(), ValidationError> {
    InquiryStatus::from_str(status)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid inquiry status"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_amount_regex() {
        assert!(REGEX_IS_MONEY_AMOUNT.is_match("74990"));
        assert!(REGEX_IS_MONEY_AMOUNT.is_match("74990.5"));
        assert!(REGEX_IS_MONEY_AMOUNT.is_match("74990.50"));

        assert!(!REGEX_IS_MONEY_AMOUNT.is_match("-1"));
        assert!(!REGEX_IS_MONEY_AMOUNT.is_match("74,990"));
        assert!(!REGEX_IS_MONEY_AMOUNT.is_match("74990.505"));
        assert!(!REGEX_IS_MONEY_AMOUNT.is_match("abc"));
    }

    #[test]
    fn status_validators() {
        assert!(is_vehicle_status("available").is_ok());
        assert!(is_vehicle_status("parked").is_err());

        assert!(is_inquiry_status("answered").is_ok());
        assert!(is_inquiry_status("pending").is_err());
    }
}
