//! Pure helpers shared by server and clients

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Half-open interval overlap: [a_start, a_end) vs [b_start, b_end)
///
/// Abutting windows (a_end == b_start) do NOT overlap.
pub fn windows_overlap(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    a_start < b_end && b_start < a_end
}

/// Reservation code alphabet - unambiguous uppercase (no 0/O/1/I)
const CODE_ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Code suffix length (32^6 ≈ 1e9 values, collision-free at restaurant scale)
const CODE_LEN: usize = 6;

/// Generate a human-readable reservation code, e.g. "BK-7GXK2M".
///
/// Uniqueness is enforced by the caller (check-and-retry against the store).
pub fn reservation_code() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let suffix: String = (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    format!("BK-{}", suffix)
}
