use sha2::Digest;

/// Content hash over the raw template bytes. Gives each parsed template
/// a stable identity for change detection by the external store; the
/// parser itself never deduplicates.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}
