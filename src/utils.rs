/// The wall-clock time in milliseconds since the Unix epoch. Reducers take the
/// time as an argument, this is only called at the edges.
pub fn get_timestamp() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
