//! Grammar check via the LanguageTool HTTP API.
//!
//! This path never fails: any HTTP or parse error is rendered into the
//! report text instead of being raised, so a grammar outage degrades to a
//! readable message rather than a failed action.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct GrammarResponse {
    #[serde(default)]
    pub matches: Vec<GrammarMatch>,
}

#[derive(Debug, Deserialize)]
pub struct GrammarMatch {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
    pub context: MatchContext,
}

#[derive(Debug, Deserialize)]
pub struct Replacement {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct MatchContext {
    pub text: String,
    pub offset: usize,
    pub length: usize,
}

/// Client for the LanguageTool `/v2/check` endpoint.
pub struct GrammarClient {
    client: Client,
    endpoint: String,
}

impl GrammarClient {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    /// Checks the resume text and returns a markdown report.
    pub async fn check(&self, resume_text: &str) -> String {
        match self.request(resume_text).await {
            Ok(response) => {
                debug!("grammar check returned {} matches", response.matches.len());
                format_report(&response)
            }
            Err(e) => format!("Error checking grammar: {e}"),
        }
    }

    async fn request(&self, text: &str) -> Result<GrammarResponse, reqwest::Error> {
        let params = [("text", text), ("language", "en-US")];
        self.client
            .post(&self.endpoint)
            .form(&params)
            .send()
            .await?
            .json()
            .await
    }
}

/// Matches with no suggested replacement, or whose message is about
/// whitespace, are noise for resume review and are dropped.
fn keep_match(m: &GrammarMatch) -> bool {
    !m.replacements.is_empty() && !m.message.to_lowercase().contains("whitespace")
}

fn format_report(response: &GrammarResponse) -> String {
    let issues: Vec<String> = response
        .matches
        .iter()
        .filter(|m| keep_match(m))
        .map(|m| format_issue(m))
        .collect();

    if issues.is_empty() {
        "No major grammar issues found!".to_string()
    } else {
        format!("### Grammar Issues Found:\n\n{}", issues.join("\n"))
    }
}

fn format_issue(m: &GrammarMatch) -> String {
    let suggestions = m
        .replacements
        .iter()
        .map(|r| r.value.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let highlighted = highlight(&m.context.text, m.context.offset, m.context.length);
    format!(
        "🔹 **Issue:** {}\n🔸 **Line:** {}\n💡 **Suggestion:** {}\n",
        m.message, highlighted, suggestions
    )
}

/// Wraps the flagged span of the excerpt in `**`. API offsets are clamped
/// to the excerpt and snapped to char boundaries so a bad span can never
/// panic the formatter.
fn highlight(sentence: &str, offset: usize, length: usize) -> String {
    let start = snap_to_boundary(sentence, offset);
    let end = snap_to_boundary(sentence, offset.saturating_add(length)).max(start);
    format!(
        "{}**{}**{}",
        &sentence[..start],
        &sentence[start..end],
        &sentence[end..]
    )
}

fn snap_to_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_with(message: &str, replacements: &[&str]) -> GrammarMatch {
        GrammarMatch {
            message: message.to_string(),
            replacements: replacements
                .iter()
                .map(|v| Replacement {
                    value: v.to_string(),
                })
                .collect(),
            context: MatchContext {
                text: "I has experience".to_string(),
                offset: 2,
                length: 3,
            },
        }
    }

    #[test]
    fn test_match_without_replacements_is_dropped() {
        assert!(!keep_match(&match_with("Possible typo", &[])));
    }

    #[test]
    fn test_whitespace_message_is_dropped_case_insensitively() {
        assert!(!keep_match(&match_with("Whitespace repetition found", &["fix"])));
        assert!(!keep_match(&match_with("possible WHITESPACE issue", &["fix"])));
    }

    #[test]
    fn test_real_issue_is_kept() {
        assert!(keep_match(&match_with("Possible agreement error", &["have"])));
    }

    #[test]
    fn test_empty_report_message() {
        let response = GrammarResponse { matches: vec![] };
        assert_eq!(format_report(&response), "No major grammar issues found!");
    }

    #[test]
    fn test_report_from_api_fixture() {
        let json = r#"{
            "matches": [
                {
                    "message": "Possible agreement error",
                    "replacements": [{"value": "have"}, {"value": "had"}],
                    "context": {"text": "I has experience", "offset": 2, "length": 3}
                },
                {
                    "message": "Possible typo: you repeated a whitespace",
                    "replacements": [{"value": " "}],
                    "context": {"text": "two  spaces", "offset": 3, "length": 2}
                },
                {
                    "message": "No suggestion here",
                    "replacements": [],
                    "context": {"text": "something odd", "offset": 0, "length": 9}
                }
            ]
        }"#;
        let response: GrammarResponse = serde_json::from_str(json).unwrap();
        let report = format_report(&response);

        assert!(report.starts_with("### Grammar Issues Found:"));
        assert!(report.contains("I **has** experience"));
        assert!(report.contains("💡 **Suggestion:** have, had"));
        // Filtered matches leave no trace
        assert!(!report.contains("whitespace"));
        assert!(!report.contains("No suggestion here"));
    }

    #[test]
    fn test_highlight_clamps_out_of_range_offsets() {
        assert_eq!(highlight("short", 99, 4), "short****");
        assert_eq!(highlight("short", 3, 99), "sho**rt**");
    }

    #[test]
    fn test_highlight_snaps_to_char_boundaries() {
        // "é" is two bytes; an offset inside it must not panic
        let highlighted = highlight("résumé", 2, 1);
        assert!(highlighted.contains("**"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_degrades_to_error_string() {
        let client = GrammarClient::new(
            Client::new(),
            "http://127.0.0.1:9/v2/check".to_string(),
        );
        let report = client.check("I has experience").await;
        assert!(report.starts_with("Error checking grammar:"));
    }
}
