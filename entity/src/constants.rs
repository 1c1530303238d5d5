use strum::{Display, EnumIter, EnumString};

/// Listing status of a vehicle, stored as snake_case text
/// on the `vehicle.status` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    Reserved,
    Sold,
}

/// Handling status of a customer inquiry, stored as snake_case
/// text on the `inquiry.status` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum InquiryStatus {
    New,
    Answered,
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn vehicle_status_serializes_as_snake_case() {
        assert_eq!(VehicleStatus::Available.to_string(), "available");
        assert_eq!(VehicleStatus::Reserved.to_string(), "reserved");
        assert_eq!(VehicleStatus::Sold.to_string(), "sold");
    }

    #[test]
    fn inquiry_status_parses_from_column_text() {
        assert_eq!(InquiryStatus::from_str("new"), Ok(InquiryStatus::New));
        assert_eq!(
            InquiryStatus::from_str("answered"),
            Ok(InquiryStatus::Answered)
        );
        assert!(InquiryStatus::from_str("resolved").is_err());
    }
}
