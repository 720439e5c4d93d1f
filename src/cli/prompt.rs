use dialoguer::Password;
use std::io::IsTerminal;
use ziplift::core::{ZipliftError, ZipliftResult};

/// Token from the command line / `GITHUB_TOKEN`, else a hidden prompt
pub fn resolve_token(token: Option<String>) -> ZipliftResult<String> {
    if let Some(token) = token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        return Ok(token);
    }

    if !std::io::stdin().is_terminal() {
        return Err(ZipliftError::Validation(
            "GitHub token required: pass --token or set GITHUB_TOKEN".to_string(),
        ));
    }

    let token = Password::new()
        .with_prompt("GitHub token")
        .interact()
        .map_err(|e| ZipliftError::Validation(format!("Failed to read token: {}", e)))?;
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(ZipliftError::Validation("GitHub token must not be empty".to_string()));
    }
    Ok(token)
}
