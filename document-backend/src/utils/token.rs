// document-backend/src/utils/token.rs

//! 共有リンク用トークン

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};

/// トークンのエントロピー（バイト数）。256bit
pub const SHARE_TOKEN_BYTES: usize = 32;

/// OSの暗号論的乱数から推測不能な共有トークンを生成
pub fn generate_share_token() -> String {
    let mut bytes = [0u8; SHARE_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// `{base}/{document_id}/{token}` 形式の共有リンク
pub fn build_share_link(base_path: &str, document_id: &uuid::Uuid, token: &str) -> String {
    format!("{}/{}/{}", base_path.trim_end_matches('/'), document_id, token)
}
