use chrono::{DateTime, Utc};
use hai_mcp_core::credentials::Credentials;
use hmac::{Hmac, Mac, digest::InvalidLength};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

pub(crate) const ALGORITHM: &str = "TC3-HMAC-SHA256";
pub(crate) const CONTENT_TYPE: &str = "application/json; charset=utf-8";
const SIGNED_HEADERS: &str = "content-type;host";

fn hmac_sha256(key: &[u8], message: &str) -> Result<Vec<u8>, InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(key)?;
    mac.update(message.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

fn sha256_hex(message: &str) -> String {
    hex::encode(Sha256::digest(message.as_bytes()))
}

/// Builds the `Authorization` header of a TC3-HMAC-SHA256 signed POST to `/`.
pub(crate) fn authorization(
    credentials: &Credentials,
    service: &str,
    host: &str,
    payload: &str,
    signed_at: DateTime<Utc>,
) -> Result<String, InvalidLength> {
    let date = signed_at.format("%Y-%m-%d").to_string();
    let scope = format!("{date}/{service}/tc3_request");

    let canonical_headers = format!("content-type:{CONTENT_TYPE}\nhost:{host}\n");
    let canonical_request = format!(
        "POST\n/\n\n{canonical_headers}\n{SIGNED_HEADERS}\n{}",
        sha256_hex(payload)
    );
    let string_to_sign = format!(
        "{ALGORITHM}\n{}\n{scope}\n{}",
        signed_at.timestamp(),
        sha256_hex(&canonical_request)
    );

    let secret_date = hmac_sha256(format!("TC3{}", credentials.secret_key).as_bytes(), &date)?;
    let secret_service = hmac_sha256(&secret_date, service)?;
    let secret_signing = hmac_sha256(&secret_service, "tc3_request")?;
    let signature = hex::encode(hmac_sha256(&secret_signing, &string_to_sign)?);

    Ok(format!(
        "{ALGORITHM} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        credentials.secret_id
    ))
}
