use chrono::Utc;
use uuid::Uuid;

pub const OBJECT_ID_LEN: usize = 24;

/// Generate a store-assigned document id: 24 lowercase hex characters,
/// 4 bytes of unix timestamp followed by 8 random bytes. Opaque to
/// clients, roughly creation-ordered for the store.
pub fn generate() -> String {
    let mut bytes = [0u8; 12];

    let secs = Utc::now().timestamp() as u32;
    bytes[..4].copy_from_slice(&secs.to_be_bytes());
    bytes[4..].copy_from_slice(&Uuid::new_v4().as_bytes()[..8]);

    hex::encode(bytes)
}

/// Whether a path parameter parses as a store id. Lowercase hex only,
/// exactly 24 characters.
pub fn is_valid(id: &str) -> bool {
    id.len() == OBJECT_ID_LEN
        && id
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_valid() {
        let id = generate();
        assert_eq!(id.len(), OBJECT_ID_LEN);
        assert!(is_valid(&id));
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(generate(), generate());
    }

    #[test]
    fn test_rejects_malformed_ids() {
        assert!(!is_valid(""));
        assert!(!is_valid("abc123"));
        assert!(!is_valid("64b1f0a2c3d4e5f60718293g"));
        assert!(!is_valid("64B1F0A2C3D4E5F60718293A"));
        assert!(!is_valid("64b1f0a2c3d4e5f60718293a0"));
    }
}
