//! Public tracking-identifier generation.
//!
//! A tracking id is `GRV-<base36 millis>-<base36 5-char random>`, fully
//! uppercased. The timestamp component makes collisions astronomically
//! unlikely; the store still enforces uniqueness as a hard constraint.

use rand::Rng;

const PREFIX: &str = "GRV";
const SUFFIX_LEN: usize = 5;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh tracking identifier for a new complaint.
pub fn generate_tracking_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;

    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();

    format!("{PREFIX}-{}-{suffix}", to_base36(millis)).to_uppercase()
}

/// Whether a string has the shape of a tracking id
/// (`GRV-<base36>-<base36>`). The public lookup rejects malformed ids
/// without touching the store.
pub fn is_tracking_id(candidate: &str) -> bool {
    let mut parts = candidate.split('-');
    let (Some(prefix), Some(stamp), Some(suffix), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    prefix == PREFIX
        && !stamp.is_empty()
        && suffix.len() == SUFFIX_LEN
        && stamp.chars().chain(suffix.chars()).all(is_base36_upper)
}

fn is_base36_upper(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_uppercase()
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize] as char);
        n /= 36;
    }
    digits.reverse();
    digits.into_iter().collect()
}
