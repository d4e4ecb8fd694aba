use super::ServerConfig;

/// Validate a fully merged configuration.
///
/// # Errors
/// Returns an error if any history capacity is zero.
pub(super) fn validate(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    validate_history_limits(config)?;
    Ok(())
}

fn validate_history_limits(config: &ServerConfig) -> Result<(), String> {
    let limits = [
        ("MAX_CALLS", config.history.calls),
        ("MAX_CONVERSATIONS", config.history.conversations),
        ("MAX_ASSISTANTS", config.history.assistants),
        ("MAX_LOG_SESSIONS", config.history.log_sessions),
    ];

    for (name, value) in limits {
        if value == 0 {
            return Err(format!("{name} must be greater than zero"));
        }
    }

    Ok(())
}
