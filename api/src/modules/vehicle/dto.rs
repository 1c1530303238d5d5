use crate::config::app_config;
use crate::modules::common::validators::{is_vehicle_status, REGEX_IS_MONEY_AMOUNT};
use crate::modules::vehicle::repository::VehicleDetails;
use axum::body::Bytes;
use axum_typed_multipart::{FieldData, TryFromMultipart};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Deserialize, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListVehiclesDto {
    /// Search by brand
    pub brand: Option<String>,

    /// Filter by listing status
    #[validate(custom = "is_vehicle_status")]
    pub status: Option<String>,
}

#[derive(TryFromMultipart, ToSchema, Validate)]
#[try_from_multipart(rename_all = "camelCase")]
pub struct CreateVehicleDto {
    /// vehicle photos in display order
    #[schema(value_type = Vec<String>, format = Binary)]
    #[form_data(limit = "5MiB")]
    #[validate(length(max = 10, message = "a listing can have at most 10 images"))]
    pub images: Vec<FieldData<Bytes>>,

    /// JSON encoded array of feature labels, eg: `["heated seats","sunroof"]`
    pub features: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub brand: String,

    #[validate(length(min = 1, max = 64))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i16,

    /// price in the shop currency, eg: "74990.00"
    #[validate(regex(
        path = "REGEX_IS_MONEY_AMOUNT",
        message = "price must be a non negative number with at most 2 fractional digits"
    ))]
    pub price: String,

    #[validate(range(min = 0))]
    pub mileage: i32,

    #[validate(length(min = 1, max = 32))]
    pub fuel_type: String,

    #[validate(length(min = 1, max = 32))]
    pub transmission: String,

    /// engine power in hp
    #[validate(range(min = 1, max = 2000))]
    pub power: i16,

    pub description: Option<String>,
}

#[derive(Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleDto {
    #[validate(length(min = 1, max = 64))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i16>,

    #[validate(regex(
        path = "REGEX_IS_MONEY_AMOUNT",
        message = "price must be a non negative number with at most 2 fractional digits"
    ))]
    pub price: Option<String>,

    #[validate(range(min = 0))]
    pub mileage: Option<i32>,

    #[validate(length(min = 1, max = 32))]
    pub fuel_type: Option<String>,

    #[validate(length(min = 1, max = 32))]
    pub transmission: Option<String>,

    #[validate(range(min = 1, max = 2000))]
    pub power: Option<i16>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,

    #[validate(custom = "is_vehicle_status")]
    pub status: Option<String>,
}

/// Parses the JSON encoded `features` multipart field into feature labels
///
/// a absent field or a malformed encoding is treated as no features at all
/// rather than a error
pub fn parse_features_field(features: Option<&str>) -> Vec<String> {
    features
        .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
        .unwrap_or_default()
}

/// resolves the public URL of a stored upload, only paths relative to the
/// upload directory are persisted so the serving host can change freely
pub fn resolve_upload_url(path: &str) -> String {
    let public_url = app_config().public_url.as_str();

    format!("{}/uploads/{}", public_url.trim_end_matches('/'), path)
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleImageDto {
    pub id: i32,

    /// absolute URL the image can be fetched from
    pub url: String,

    /// zero based display position of the image
    pub sort_order: i32,
}

impl From<entity::vehicle_image::Model> for VehicleImageDto {
    fn from(img: entity::vehicle_image::Model) -> Self {
        VehicleImageDto {
            id: img.id,
            url: resolve_upload_url(&img.path),
            sort_order: img.sort_order,
        }
    }
}

/// A vehicle listing with its feature labels and image URLs
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDto {
    pub id: i32,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub brand: String,
    pub model: String,
    pub year: i16,
    #[schema(value_type = String, example = "74990.00")]
    pub price: Decimal,
    pub mileage: i32,
    pub fuel_type: String,
    pub transmission: String,
    pub power: i16,
    pub description: Option<String>,
    pub status: String,
    pub features: Vec<String>,
    pub images: Vec<VehicleImageDto>,
}

impl From<VehicleDetails> for VehicleDto {
    fn from(details: VehicleDetails) -> Self {
        let VehicleDetails {
            vehicle,
            features,
            images,
        } = details;

        VehicleDto {
            id: vehicle.id,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            price: vehicle.price,
            mileage: vehicle.mileage,
            fuel_type: vehicle.fuel_type,
            transmission: vehicle.transmission,
            power: vehicle.power,
            description: vehicle.description,
            status: vehicle.status,
            features: features.into_iter().map(|f| f.name).collect(),
            images: images.into_iter().map(VehicleImageDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn features_field_parses_a_json_string_array() {
        let parsed = parse_features_field(Some(r#"["heated seats","sunroof"]"#));

        assert_eq!(
            parsed,
            vec![String::from("heated seats"), String::from("sunroof")]
        );
    }

    #[test]
    fn absent_or_malformed_features_field_means_no_features() {
        assert_eq!(parse_features_field(None), Vec::<String>::new());
        assert_eq!(parse_features_field(Some("")), Vec::<String>::new());
        assert_eq!(
            parse_features_field(Some("not json at all")),
            Vec::<String>::new()
        );
        assert_eq!(
            parse_features_field(Some(r#"{"a": 1}"#)),
            Vec::<String>::new()
        );
    }

    #[test]
    fn update_dto_distinguishes_absent_and_null_description() {
        let keep: UpdateVehicleDto = serde_json::from_str("{}").unwrap();
        assert_eq!(keep.description, None);

        let clear: UpdateVehicleDto = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(clear.description, Some(None));

        let set: UpdateVehicleDto =
            serde_json::from_str(r#"{"description": "fresh paint"}"#).unwrap();
        assert_eq!(set.description, Some(Some(String::from("fresh paint"))));
    }

    #[test]
    fn create_vehicle_dto_validation() {
        let dto = CreateVehicleDto {
            images: vec![],
            features: None,
            brand: String::from("Toyota"),
            model: String::from("Corolla"),
            year: 2022,
            price: String::from("74990.00"),
            mileage: 15000,
            fuel_type: String::from("hybrid"),
            transmission: String::from("automatic"),
            power: 122,
            description: None,
        };

        assert!(validator::Validate::validate(&dto).is_ok());

        let bad_price = CreateVehicleDto {
            price: String::from("74,990"),
            ..dto
        };

        assert!(validator::Validate::validate(&bad_price).is_err());
    }
}
