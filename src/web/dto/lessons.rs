use uuid::Uuid;

/// Record ids come in as free-form strings. Anything that isn't a UUID can't
/// name an existing record and is treated as missing.
pub fn parse_record_id(raw: &str) -> Option<Uuid> {
    raw.trim().parse::<Uuid>().ok()
}
