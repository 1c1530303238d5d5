use crate::modules::common::validators::is_inquiry_status;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInquiryDto {
    /// id of the vehicle the inquiry is about, if any
    pub vehicle_id: Option<i32>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 5, max = 32))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

#[derive(Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListInquiriesDto {
    /// Filter by handling status
    #[validate(custom = "is_inquiry_status")]
    pub status: Option<String>,
}

#[derive(Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInquiryDto {
    #[validate(custom = "is_inquiry_status")]
    pub status: String,
}
