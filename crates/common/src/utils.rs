/// Get current timestamp in milliseconds since Unix epoch
/// Used as the uniqueness prefix of generated storage names
pub fn current_timestamp_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}
