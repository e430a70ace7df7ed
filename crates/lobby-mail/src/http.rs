//! Shared HTTP response check.

use crate::error::MailError;

/// Pass a success response through; turn anything else into [`MailError::Api`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, MailError> {
    if !resp.status().is_success() {
        return Err(MailError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
