mod models;
mod render;

use colored::*;
use models::*;
use std::env;
use std::io::{self, Write};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

// ===== Main =====

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let base_url = env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

    println!("{}", "=".repeat(60).bright_cyan());
    println!("{}", "    ⭐ FEEDBACK COLLECTION ⭐".bright_yellow().bold());
    println!("{}", "=".repeat(60).bright_cyan());

    loop {
        println!();
        println!(
            "{}",
            "[F]eedback form  [A]dmin analytics  [R]eviews  [Q]uit".bright_black()
        );
        let choice = prompt(&"> ".bright_green().bold().to_string())?;

        match choice.to_lowercase().as_str() {
            "f" | "feedback" => submission_screen(&base_url).await?,
            "a" | "admin" => admin_screen(&base_url).await?,
            "r" | "reviews" => reviews_screen(&base_url).await?,
            "q" | "quit" => {
                println!();
                println!("{}", "Thanks for your feedback! 👋".bright_cyan().bold());
                return Ok(());
            }
            _ => println!("{}", "Invalid choice. Please try again.".red()),
        }
    }
}

// ===== Input Helpers =====

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn parse_rating(input: &str) -> Option<i32> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    input.parse().ok()
}

fn validate_submission(rating: Option<i32>, review: &str) -> Result<i32, &'static str> {
    let rating = rating.ok_or("Please provide both rating and review.")?;
    if !(1..=5).contains(&rating) || review.trim().is_empty() {
        return Err("Please provide both rating and review.");
    }
    Ok(rating)
}

// ===== Submission Screen =====

async fn submission_screen(base_url: &str) -> anyhow::Result<()> {
    loop {
        println!();
        println!("{}", "FEEDBACK FORM".bright_yellow().bold());
        println!(
            "{}",
            "Please provide your feedback below (or [B]ack to return).".bright_black()
        );
        println!();

        let rating_input = prompt("Rating (1-5): ")?;
        if rating_input.eq_ignore_ascii_case("b") {
            return Ok(());
        }
        let review = prompt("Write a review: ")?;

        // Validation happens before any request goes out.
        let rating = match validate_submission(parse_rating(&rating_input), &review) {
            Ok(rating) => rating,
            Err(message) => {
                println!("{}", message.red());
                continue;
            }
        };

        loop {
            println!("{}", "Submitting...".bright_black());

            match create_feedback(base_url, rating, &review).await {
                Ok(Some(feedback)) => {
                    println!();
                    println!("{}", "Thank you for your feedback!".green().bold());
                    println!(
                        "{}",
                        "Your feedback has been submitted successfully.".bright_black()
                    );
                    if let Some(ai_response) = feedback
                        .ai_response
                        .as_deref()
                        .filter(|text| !text.trim().is_empty())
                    {
                        println!();
                        println!("{}", ai_response.bright_white());
                    }
                    println!();
                    // Enter clears the confirmation and returns to an empty form.
                    prompt("Press Enter to go back")?;
                    break;
                }
                Ok(None) => println!("{}", "Failed to submit the feedback.".red()),
                Err(err) => {
                    eprintln!("Error submitting feedback: {err:?}");
                    println!(
                        "{}",
                        "Error connecting to the server. Please try again.".red()
                    );
                }
            }

            // The entered rating and review are kept for the retry.
            let retry = prompt("Retry with the same rating and review? [Y/n] ")?;
            if retry.to_lowercase().starts_with('n') {
                break;
            }
        }
    }
}

// ===== Admin Analytics Screen =====

async fn admin_screen(base_url: &str) -> anyhow::Result<()> {
    let mut analytics: Option<AnalyticsResponse> = None;

    loop {
        println!();
        println!("{}", "ADMIN ANALYTICS".bright_yellow().bold());
        println!("{}", "Fetching analytics...".bright_black());

        match fetch_analytics(base_url).await {
            Ok(Some(snapshot)) => analytics = Some(snapshot),
            Ok(None) => println!("{}", "Failed to analyze the feedback.".red()),
            Err(err) => {
                eprintln!("Error analyzing feedback: {err:?}");
                println!(
                    "{}",
                    "Error connecting to the server. Please try again.".red()
                );
            }
        }

        println!();
        match &analytics {
            Some(snapshot) => println!("{}", render::render_analytics(snapshot)),
            None => println!("{}", render::render_skeleton()),
        }

        loop {
            let choice = prompt(&format!(
                "{}\n> ",
                "[F]etch again  [B]ack".bright_black()
            ))?;
            match choice.to_lowercase().as_str() {
                "f" | "fetch" => break,
                "b" | "back" => return Ok(()),
                _ => println!("{}", "Invalid choice. Please try again.".red()),
            }
        }
    }
}

// ===== Reviews Screen =====

async fn reviews_screen(base_url: &str) -> anyhow::Result<()> {
    let mut feedbacks: Option<Vec<Feedback>> = None;

    loop {
        println!();
        println!("{}", "ALL REVIEWS".bright_yellow().bold());
        println!("{}", "Fetching reviews...".bright_black());

        match fetch_all_feedbacks(base_url).await {
            Ok(Some(list)) => feedbacks = Some(list),
            Ok(None) => println!("{}", "Failed to fetch reviews.".red()),
            Err(err) => {
                eprintln!("Error fetching all feedbacks: {err:?}");
                println!(
                    "{}",
                    "Error connecting to the server. Please try again.".red()
                );
            }
        }

        if let Some(list) = &feedbacks {
            println!();
            println!("{}", render::render_reviews(list));
        }

        loop {
            let choice = prompt(&format!(
                "{}\n> ",
                "[F]etch again  [B]ack".bright_black()
            ))?;
            match choice.to_lowercase().as_str() {
                "f" | "fetch" => break,
                "b" | "back" => return Ok(()),
                _ => println!("{}", "Invalid choice. Please try again.".red()),
            }
        }
    }
}

// ===== API Calls =====

async fn create_feedback(
    base_url: &str,
    rating: i32,
    review: &str,
) -> anyhow::Result<Option<Feedback>> {
    let client = reqwest::Client::new();
    let request = FeedbackRequest {
        rating,
        review: review.to_string(),
    };

    let response = client
        .post(format!("{}/feedbacks/", base_url))
        .json(&request)
        .send()
        .await?;

    if response.status().as_u16() != 201 {
        return Ok(None);
    }

    Ok(Some(response.json().await?))
}

async fn fetch_analytics(base_url: &str) -> anyhow::Result<Option<AnalyticsResponse>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/feedbacks/analytics/", base_url))
        .send()
        .await?;

    if response.status().as_u16() != 200 {
        return Ok(None);
    }

    Ok(Some(response.json().await?))
}

async fn fetch_all_feedbacks(base_url: &str) -> anyhow::Result<Option<Vec<Feedback>>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/feedbacks/", base_url))
        .send()
        .await?;

    if response.status().as_u16() != 200 {
        return Ok(None);
    }

    Ok(Some(response.json().await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_input_parses_only_digits() {
        assert_eq!(parse_rating("3"), Some(3));
        assert_eq!(parse_rating(" 5 "), Some(5));
        assert_eq!(parse_rating(""), None);
        assert_eq!(parse_rating("abc"), None);
        assert_eq!(parse_rating("4.5"), None);
    }

    #[test]
    fn submission_requires_rating_and_review() {
        assert!(validate_submission(None, "great").is_err());
        assert!(validate_submission(Some(3), "").is_err());
        assert!(validate_submission(Some(3), "   ").is_err());
        assert_eq!(validate_submission(Some(3), "great"), Ok(3));
    }

    #[test]
    fn submission_rejects_out_of_range_rating() {
        assert!(validate_submission(Some(0), "great").is_err());
        assert!(validate_submission(Some(6), "great").is_err());
        assert_eq!(validate_submission(Some(1), "great"), Ok(1));
        assert_eq!(validate_submission(Some(5), "great"), Ok(5));
    }

    #[test]
    fn validation_message_matches_the_form_error() {
        let err = validate_submission(None, "").unwrap_err();
        assert_eq!(err, "Please provide both rating and review.");
    }
}
