use rand::Rng;

// Lowercase alphanumerics only: the local part is user-visible and must be
// accepted verbatim by the upstream provider.
const CHARSET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

fn random_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET.as_bytes()[idx] as char
        })
        .collect()
}

/// Random local part for a generated address. Collisions are not retried;
/// the unique constraint on the address column is the backstop.
pub fn random_local_part(length: usize) -> String {
    random_string(length)
}

/// Throwaway password for the upstream account. Used once to create the
/// account and obtain a token, never persisted.
pub fn random_password(length: usize) -> String {
    random_string(length)
}
