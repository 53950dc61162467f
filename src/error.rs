/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Recommendation provider credential is missing")]
    CredentialMissing,

    #[error("Recommendation provider error: {0}")]
    Provider(String),

    #[error("Recommendation provider returned no usable candidates")]
    EmptyResult,

    #[error("Artwork lookup error: {0}")]
    ArtworkLookup(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Message shown on the blocking error screen.
    ///
    /// Credential problems get their own wording so the user knows the fix
    /// is configuration, not retrying another genre.
    pub fn user_message(&self) -> String {
        match self {
            AppError::CredentialMissing => {
                "No API key was found for the recommendation service. \
                 Check your GEMINI_API_KEY configuration."
                    .to_string()
            }
            AppError::EmptyResult => {
                "We couldn't find any recommendations. \
                 Try another genre or check your API key."
                    .to_string()
            }
            AppError::Provider(_) | AppError::HttpClient(_) => {
                "Something went wrong while talking to the recommendation service.".to_string()
            }
            AppError::ArtworkLookup(msg) | AppError::InvalidInput(msg) => msg.clone(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
