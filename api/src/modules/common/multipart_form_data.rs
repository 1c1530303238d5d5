use axum::body::Bytes;
use axum_typed_multipart::FieldData;
use http::StatusCode;
use rand_core::{OsRng, RngCore};

use super::error_codes::INVALID_FILE_TYPE;
use super::responses::SimpleError;

/// content types a uploaded image can declare, `application/octet-stream` is
/// accepted because several http clients use it for any binary upload, files
/// that declare neither a image type nor a image filename extension are rejected
const ALLOWED_CONTENT_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/octet-stream",
];

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// lowercased filename extension, `None` for extensionless filenames
fn extension_of(file_name: Option<&str>) -> Option<String> {
    file_name?
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_lowercase())
}

/// a file is a acceptable image if its declared content type or its
/// filename extension is of a supported image format
fn is_allowed_image(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    let content_type_allowed = content_type
        .map(|ct| ALLOWED_CONTENT_TYPES.contains(&ct))
        .unwrap_or(false);

    let extension_allowed = extension_of(file_name)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);

    content_type_allowed || extension_allowed
}

/// asserts a multipart/form-data field is a image of a supported format,
/// returning its original filename extension (lowercased) if it has one
pub fn get_image_extension_from_field_or_fail_request(
    field: &FieldData<Bytes>,
) -> Result<Option<String>, (StatusCode, SimpleError)> {
    let meta = &field.metadata;

    if is_allowed_image(meta.content_type.as_deref(), meta.file_name.as_deref()) {
        Ok(extension_of(meta.file_name.as_deref()))
    } else {
        Err((
            StatusCode::BAD_REQUEST,
            SimpleError::from(INVALID_FILE_TYPE),
        ))
    }
}

/// validates the field is a supported image and creates a collision resistant
/// filename for it with the following format, preserving the original extension:
///
/// `<unix epoch millis>-<random u32>.<uploaded_file_extension>`
///
/// eg: 1723370096123-2890151430.jpeg
///
/// the name is independent of any database record, uploaded files are tied to
/// a vehicle only by the image rows created when the listing row is inserted
pub fn unique_image_filename(img: &FieldData<Bytes>) -> Result<String, (StatusCode, SimpleError)> {
    let extension = get_image_extension_from_field_or_fail_request(img)?;

    let timestamp = chrono::Utc::now().timestamp_millis();
    let discriminant = OsRng.next_u32();

    Ok(match extension {
        Some(ext) => format!("{}-{}.{}", timestamp, discriminant, ext),
        None => format!("{}-{}", timestamp, discriminant),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_files_by_content_type_or_extension() {
        // content type alone is enough
        assert!(is_allowed_image(Some("image/jpeg"), None));
        assert!(is_allowed_image(Some("image/webp"), Some("photo.exe")));
        assert!(is_allowed_image(Some("application/octet-stream"), None));

        // extension alone is enough, case insensitive
        assert!(is_allowed_image(None, Some("photo.jpg")));
        assert!(is_allowed_image(Some("text/plain"), Some("photo.PNG")));
        assert!(is_allowed_image(None, Some("archive.tar.webp")));
    }

    #[test]
    fn rejects_files_matching_neither_condition() {
        assert!(!is_allowed_image(None, None));
        assert!(!is_allowed_image(Some("text/html"), Some("page.html")));
        assert!(!is_allowed_image(Some("image/tiff"), Some("scan.tiff")));
        assert!(!is_allowed_image(None, Some("noextension")));
    }

    #[test]
    fn extension_is_lowercased_and_optional() {
        assert_eq!(extension_of(Some("a.JPeG")), Some(String::from("jpeg")));
        assert_eq!(extension_of(Some("a.b.gif")), Some(String::from("gif")));
        assert_eq!(extension_of(Some("noextension")), None);
        assert_eq!(extension_of(None), None);
    }
}
