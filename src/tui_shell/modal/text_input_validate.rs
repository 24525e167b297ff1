use super::super::TextInputAction;

/// Field edits may clear a value; login inputs and member names may not.
pub(super) fn allow_empty_text_input(action: &TextInputAction) -> bool {
    matches!(action, TextInputAction::FieldEdit { .. })
}

/// Checks that run before the modal closes, so the prompt can surface the
/// problem inline instead of bouncing it to the output panel.
pub(super) fn validate_text_input(action: &TextInputAction, value: &str) -> Result<(), String> {
    match action {
        TextInputAction::LoginUrl => {
            if value.starts_with("http://") || value.starts_with("https://") {
                Ok(())
            } else {
                Err("the URL must start with http:// or https://".to_string())
            }
        }
        TextInputAction::LoginToken => Ok(()),
        TextInputAction::FieldEdit { field }
            if field == "name" || field == "organisationName" =>
        {
            if value.contains('|') {
                Err("names must not contain '|'".to_string())
            } else {
                Ok(())
            }
        }
        TextInputAction::FieldEdit { .. } => Ok(()),
        TextInputAction::MemberName => {
            if value.contains('|') {
                Err("names must not contain '|'".to_string())
            } else {
                Ok(())
            }
        }
    }
}
