/// Length in hex characters of a tracking id (128 bits).
pub const TRACKING_ID_LEN: usize = 32;

/// Mints a new tracking id: 128 random bits as lowercase hex.
///
/// Collisions are not checked here; the store's primary key rejects them.
pub fn generate_tracking_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tracking_id_shape() {
        let id = generate_tracking_id();
        assert_eq!(id.len(), TRACKING_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_tracking_ids_are_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_tracking_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
