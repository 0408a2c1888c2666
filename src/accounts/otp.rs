use rand::Rng;
use time::{Duration, OffsetDateTime};

pub const OTP_TTL_MINUTES: i64 = 10;

/// Uniform random 6-digit code, zero-padded.
pub fn generate_otp() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{n:06}")
}

pub fn expiry() -> OffsetDateTime {
    OffsetDateTime::now_utc() + Duration::minutes(OTP_TTL_MINUTES)
}

pub fn is_expired(otp_expire: Option<OffsetDateTime>, now: OffsetDateTime) -> bool {
    match otp_expire {
        Some(expire) => now >= expire,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_is_six_ascii_digits() {
        for _ in 0..100 {
            let code = generate_otp();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn otp_is_zero_padded() {
        // Formatting, not generation: small values keep their width.
        assert_eq!(format!("{:06}", 42u32), "000042");
    }

    #[test]
    fn otps_are_not_constant() {
        let mut all_equal = true;
        for _ in 0..10 {
            if generate_otp() != generate_otp() {
                all_equal = false;
                break;
            }
        }
        assert!(!all_equal);
    }

    #[test]
    fn expiry_is_ten_minutes_out() {
        let now = OffsetDateTime::now_utc();
        let expire = expiry();
        let delta = expire - now;
        assert!(delta > Duration::minutes(9));
        assert!(delta <= Duration::minutes(10) + Duration::seconds(1));
    }

    #[test]
    fn expiry_window_is_strict() {
        let now = OffsetDateTime::now_utc();
        assert!(is_expired(Some(now), now));
        assert!(is_expired(Some(now - Duration::seconds(1)), now));
        assert!(!is_expired(Some(now + Duration::seconds(1)), now));
        assert!(is_expired(None, now));
    }
}
