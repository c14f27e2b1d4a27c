use parley::ChatError;

use crate::config::API_KEY_ENV;
use crate::render::Theme;

const API_KEYS_URL: &str = "https://platform.openai.com/account/api-keys";

/// Text shown to the user for a failed turn.
pub(super) fn error_notice(err: &ChatError) -> String {
    if err.is_credential_error() {
        format!(
            "Api key is not valid. Is the '{API_KEY_ENV}' env var set?\n\
             You can grab one at {API_KEYS_URL}"
        )
    } else {
        format!("[ERROR: {err}]")
    }
}

pub(super) fn print_error(err: &ChatError, theme: &Theme) {
    eprintln!("{}", theme.error.apply(error_notice(err)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_error_points_to_key_page() {
        let notice = error_notice(&ChatError::InvalidCredential);
        assert!(notice.contains("OPENAI_API_KEY"));
        assert!(notice.contains(API_KEYS_URL));
    }

    #[test]
    fn other_errors_are_bracketed() {
        let notice = error_notice(&ChatError::RateLimited);
        assert_eq!(notice, format!("[ERROR: {}]", ChatError::RateLimited));
    }
}
