use serde::{Deserialize, Serialize};

/// Structured failure body returned by the expense API.
///
/// The server answers validation and lookup failures with a problem-details
/// document; older endpoints put the text under `message` instead of `title`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ProblemDetails {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Parses a failure body, yielding `None` for anything that is not a JSON object.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// The text to show the user: `title`, else `message`, skipping blanks.
    pub fn summary(&self) -> Option<&str> {
        [self.title.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::ProblemDetails;

    #[test]
    fn title_wins_over_message() {
        let body = br#"{"title":"Descricao obrigatoria","message":"ignored","status":400}"#;
        let problem = ProblemDetails::from_body(body).expect("problem");
        assert_eq!(problem.summary(), Some("Descricao obrigatoria"));
        assert_eq!(problem.status, Some(400));
    }

    #[test]
    fn blank_title_falls_back_to_message() {
        let body = br#"{"title":"  ","message":"Gasto nao encontrado"}"#;
        let problem = ProblemDetails::from_body(body).expect("problem");
        assert_eq!(problem.summary(), Some("Gasto nao encontrado"));
    }

    #[test]
    fn non_object_bodies_have_no_summary() {
        assert!(ProblemDetails::from_body(b"Internal Server Error").is_none());
        assert!(ProblemDetails::from_body(b"\"just a string\"").is_none());
        assert_eq!(ProblemDetails::default().summary(), None);
    }
}
