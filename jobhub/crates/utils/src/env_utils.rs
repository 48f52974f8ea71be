/// Returns the variable's value, or `None` when it is unset or blank.
pub fn get_env_var_optional(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

pub fn get_env_var_or_default(key: &str, default: &str) -> String {
    get_env_var_optional(key).unwrap_or_else(|| default.to_string())
}
