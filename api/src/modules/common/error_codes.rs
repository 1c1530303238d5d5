/// a request to a endpoint was not authorized because it did
/// not contain the session id cookie in the request headers
pub static NO_SID_COOKIE: &str = "NO_SID_COOKIE";

/// a request to a endpoint was not authorized because the
/// session on the session id cookie is expired or does not exist
pub static INVALID_SESSION: &str = "INVALID_SESSION";

/// a uploaded file was rejected because neither its declared content
/// type nor its filename extension is of a supported image format
pub static INVALID_FILE_TYPE: &str = "INVALID_FILE_TYPE";
