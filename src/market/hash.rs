const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;
const BUCKETS: u32 = 10_000;

/// Map any string to a stable value in [0, 1).
///
/// 32-bit FNV-1a over the UTF-16 code units of `key`, reduced modulo 10000.
/// Stateless: the same key always gives the same value.
pub fn hash01(key: &str) -> f64 {
    let h = key.encode_utf16().fold(FNV_OFFSET_BASIS, |h, unit| {
        (h ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    });
    f64::from(h % BUCKETS) / f64::from(BUCKETS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        let key = "Will it rain in NYC tomorrow?:Will Google win?:2";
        assert_eq!(hash01(key), hash01(key));
    }

    #[test]
    fn test_empty_key() {
        // Offset basis untouched: 2166136261 % 10000 = 6261
        assert!((hash01("") - 0.6261).abs() < 1e-12);
    }

    #[test]
    fn test_known_value() {
        // "a": (2166136261 ^ 97) * 16777619 mod 2^32 = 3826002220
        assert!((hash01("a") - 0.2220).abs() < 1e-12);
    }

    #[test]
    fn test_range() {
        for i in 0..500 {
            let v = hash01(&format!("key-{}", i));
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_keys_differ() {
        assert_ne!(hash01("title:a:0"), hash01("title:a:1"));
    }
}
