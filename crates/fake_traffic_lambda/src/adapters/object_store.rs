/// Single-put blob store holding one session log per invocation.
pub trait SessionLogStore {
    fn put_object(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), String>;

    /// Human-readable location of `key`, used in log lines.
    fn location(&self, key: &str) -> String {
        key.to_string()
    }
}
