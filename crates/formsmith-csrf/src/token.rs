//! Token generation, masking, and comparison.
//!
//! Tokens are 32 random bytes rendered as 64 lowercase hex characters. A
//! masked token is a fresh random mask followed by the token XORed with that
//! mask, so the same secret renders differently on every page.

use rand::RngCore;

/// The length of a token in bytes (64 hex characters).
pub const TOKEN_LENGTH: usize = 32;

/// Generates a random token as a 64-character hex string.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_LENGTH];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex_encode(&bytes)
}

/// Masks a token with a fresh random mask.
///
/// Returns an empty string when `token` is not valid hex.
pub fn mask_token(token: &str) -> String {
    let Some(token_bytes) = hex_decode(token) else {
        return String::new();
    };
    if token_bytes.is_empty() {
        return String::new();
    }

    let mut mask = vec![0u8; token_bytes.len()];
    rand::thread_rng().fill_bytes(&mut mask);

    let masked: Vec<u8> = token_bytes.iter().zip(&mask).map(|(t, m)| t ^ m).collect();

    let mut out = mask;
    out.extend_from_slice(&masked);
    hex_encode(&out)
}

/// Recovers the token from a masked value.
///
/// Returns an empty string when `masked` is not valid hex or its byte length
/// is odd.
pub fn unmask_token(masked: &str) -> String {
    let Some(bytes) = hex_decode(masked) else {
        return String::new();
    };
    if bytes.len() % 2 != 0 {
        return String::new();
    }

    let (mask, body) = bytes.split_at(bytes.len() / 2);
    let unmasked: Vec<u8> = body.iter().zip(mask).map(|(b, m)| b ^ m).collect();
    hex_encode(&unmasked)
}

/// Returns `true` if `submitted` matches `expected`.
///
/// `submitted` may be the raw token or a masked one (twice the length).
/// Empty values never match. The final comparison runs in constant time.
pub fn tokens_match(submitted: &str, expected: &str) -> bool {
    if submitted.is_empty() || expected.is_empty() {
        return false;
    }

    let effective = if submitted.len() == expected.len() * 2 {
        unmask_token(submitted)
    } else {
        submitted.to_string()
    };

    constant_time_eq(effective.as_bytes(), expected.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
            let _ = write!(s, "{b:02x}");
            s
        })
}

fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}
