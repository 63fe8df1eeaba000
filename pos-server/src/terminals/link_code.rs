//! Link code generation

use rand::Rng;
use shared::models::LINK_CODE_LEN;

/// Fresh random numeric link code of [`LINK_CODE_LEN`] digits
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    (0..LINK_CODE_LEN)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Exactly [`LINK_CODE_LEN`] ASCII digits
pub fn is_well_formed(code: &str) -> bool {
    code.len() == LINK_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        for _ in 0..100 {
            let code = generate();
            assert!(is_well_formed(&code), "{code}");
        }
    }

    #[test]
    fn test_well_formed() {
        assert!(is_well_formed("000000000000"));
        assert!(!is_well_formed("12345678901"));
        assert!(!is_well_formed("1234567890123"));
        assert!(!is_well_formed("12345678901a"));
        assert!(!is_well_formed("１２３４５６７８９０１２"));
    }
}
