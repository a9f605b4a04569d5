/// Vote stream errors.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("vote stream ended after user '{user}' without an answer line")]
    MissingAnswer { user: String },

    #[error("blank user name at line {line}")]
    BlankUser { line: usize },
}

impl super::AffinityErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        super::error_code::INPUT_ERROR
    }
}
