use anyhow::{Context, anyhow};
use serde_json::{Value, json};
use std::env;

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Generate the AI enrichment for a submitted feedback.
/// Returns (user response, summary, recommended actions).
pub async fn generate_ai_responses(
    rating: i32,
    review: &str,
) -> anyhow::Result<(String, String, String)> {
    let api_key = env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?;

    let prompt = format!(
        "You are an AI assistant for a feedback management system.\n\
         A user has submitted the following feedback:\n\n\
         Rating: {}/5 stars\n\
         Review: {}\n\n\
         Please provide three things in your response, clearly separated:\n\n\
         1. USER_RESPONSE: A friendly, empathetic response to thank the user for their feedback (2-3 sentences)\n\
         2. SUMMARY: A concise summary of the feedback (1-2 sentence)\n\
         3. RECOMMENDED_ACTIONS: Specific, actionable recommendations for the business based on this feedback (2-4 bullet points)\n\n\
         Format your response exactly like this:\n\
         USER_RESPONSE:\n\
         [your response here]\n\n\
         SUMMARY:\n\
         [your summary here]\n\n\
         RECOMMENDED_ACTIONS:\n\
         [your actions here]",
        rating, review
    );

    let body = json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": { "temperature": 0.7, "maxOutputTokens": 1000 }
    });

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}?key={}", GEMINI_API_URL, api_key))
        .json(&body)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await?;
        anyhow::bail!("Gemini API error ({}): {}", status, text);
    }

    let payload: Value = response.json().await?;
    let response_text = payload["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(|| anyhow!("Gemini response missing generated text"))?;

    Ok(parse_ai_sections(response_text))
}

#[derive(Clone, Copy)]
enum Section {
    UserResponse,
    Summary,
    Actions,
}

// The model is asked for labeled sections separated by blank lines; a
// paragraph without a label continues the section it follows.
fn parse_ai_sections(response_text: &str) -> (String, String, String) {
    let mut user_response = String::new();
    let mut summary = String::new();
    let mut recommended_actions = String::new();
    let mut current: Option<Section> = None;

    for section in response_text.split("\n\n") {
        if section.contains("USER_RESPONSE:") {
            current = Some(Section::UserResponse);
            user_response = section.replace("USER_RESPONSE:", "").trim().to_string();
        } else if section.contains("SUMMARY:") {
            current = Some(Section::Summary);
            summary = section.replace("SUMMARY:", "").trim().to_string();
        } else if section.contains("RECOMMENDED_ACTIONS:") {
            current = Some(Section::Actions);
            recommended_actions = section
                .replace("RECOMMENDED_ACTIONS:", "")
                .trim()
                .to_string();
        } else {
            match current {
                Some(Section::UserResponse) => {
                    user_response.push('\n');
                    user_response.push_str(section);
                }
                Some(Section::Summary) => {
                    summary.push('\n');
                    summary.push_str(section);
                }
                Some(Section::Actions) => {
                    recommended_actions.push('\n');
                    recommended_actions.push_str(section);
                }
                None => {}
            }
        }
    }

    (
        user_response.trim().to_string(),
        summary.trim().to_string(),
        recommended_actions.trim().to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_response_splits_into_three_sections() {
        let text = "USER_RESPONSE:\nThank you for the kind words!\n\n\
                    SUMMARY:\nA happy customer praising the service.\n\n\
                    RECOMMENDED_ACTIONS:\n- Keep response times low\n- Share praise with the team";

        let (user_response, summary, actions) = parse_ai_sections(text);
        assert_eq!(user_response, "Thank you for the kind words!");
        assert_eq!(summary, "A happy customer praising the service.");
        assert!(actions.starts_with("- Keep response times low"));
        assert!(actions.contains("- Share praise with the team"));
    }

    #[test]
    fn unlabeled_paragraphs_continue_the_current_section() {
        let text = "USER_RESPONSE:\nThanks a lot.\n\n\
                    We really appreciate it.\n\n\
                    SUMMARY:\nPositive feedback.\n\n\
                    RECOMMENDED_ACTIONS:\n- First action\n\n- Second action";

        let (user_response, _, actions) = parse_ai_sections(text);
        assert!(user_response.contains("Thanks a lot."));
        assert!(user_response.contains("We really appreciate it."));
        assert!(actions.contains("- First action"));
        assert!(actions.contains("- Second action"));
    }

    #[test]
    fn missing_sections_come_back_empty() {
        let (user_response, summary, actions) =
            parse_ai_sections("USER_RESPONSE:\nJust the thanks.");
        assert_eq!(user_response, "Just the thanks.");
        assert_eq!(summary, "");
        assert_eq!(actions, "");
    }

    #[test]
    fn leading_chatter_before_any_label_is_dropped() {
        let text = "Sure, here is the breakdown:\n\n\
                    SUMMARY:\nShort and sweet.";
        let (user_response, summary, _) = parse_ai_sections(text);
        assert_eq!(user_response, "");
        assert_eq!(summary, "Short and sweet.");
    }
}
