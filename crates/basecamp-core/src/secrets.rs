//! WordPress authentication keys and salts

use rand::Rng;

/// Keys written to `.env` with freshly generated values
pub const SALT_KEYS: [&str; 8] = [
    "AUTH_KEY",
    "SECURE_AUTH_KEY",
    "LOGGED_IN_KEY",
    "NONCE_KEY",
    "AUTH_SALT",
    "SECURE_AUTH_SALT",
    "LOGGED_IN_SALT",
    "NONCE_SALT",
];

pub const SALT_LENGTH: usize = 64;

/// Never contains quotes or backslashes, so values can be single-quoted in `.env`
pub const SALT_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

/// Placeholder value in `.env.example` marking a key to generate
pub const SALT_PLACEHOLDER: &str = "generate";

pub fn generate_salt() -> String {
    generate_salt_with(&mut rand::thread_rng())
}

pub fn generate_salt_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SALT_LENGTH)
        .map(|_| SALT_CHARSET[rng.gen_range(0..SALT_CHARSET.len())] as char)
        .collect()
}

/// Replace every `KEY=generate` line with `KEY='<salt>'`.
///
/// Only whole-line matches are replaced, so `AUTH_KEY` never touches
/// `SECURE_AUTH_KEY`. Each key gets its own value. Returns the new content and
/// the keys that were filled in.
pub fn apply_salts(content: &str) -> (String, Vec<&'static str>) {
    let mut applied = Vec::new();
    let mut out = String::with_capacity(content.len() + SALT_KEYS.len() * SALT_LENGTH);

    for raw in content.split_inclusive('\n') {
        let (body, ending) = split_line_ending(raw);
        let key = SALT_KEYS
            .iter()
            .find(|key| body == format!("{}={}", key, SALT_PLACEHOLDER));

        match key {
            Some(key) => {
                out.push_str(&format!("{}='{}'", key, generate_salt()));
                if !applied.contains(key) {
                    applied.push(*key);
                }
            }
            None => out.push_str(body),
        }
        out.push_str(ending);
    }

    (out, applied)
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
