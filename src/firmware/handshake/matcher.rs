/// Compares one read against the token.
///
/// The candidate is the read up to its first NUL, so zero padding after the
/// token still matches. Reads are never stitched together: a token split
/// across two segments does not match.
pub fn token_matches(received: &[u8], token: &[u8]) -> bool {
    let end = received
        .iter()
        .position(|&byte| byte == 0)
        .unwrap_or(received.len());
    &received[..end] == token
}
