pub(super) fn default_name() -> String {
    "Polyglot".to_string()
}
pub(super) fn default_log_level() -> String {
    "info".to_string()
}
pub(super) fn default_locale() -> String {
    "en".to_string()
}
pub(super) fn default_available_locales() -> Vec<String> {
    vec!["en".into()]
}
pub(super) fn default_store_backend() -> String {
    "sqlite".to_string()
}
pub(super) fn default_db_path() -> String {
    "~/.polyglot/data/content.db".to_string()
}
pub(super) fn default_max_connections() -> u32 {
    4
}
