use sqlx::postgres::PgPoolOptions;
use std::env;

// Each line is "rating|review"; blank lines and '#' comments are skipped.
fn parse_seed_line(line: &str) -> Option<(i32, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (rating, review) = line.split_once('|')?;
    let rating: i32 = rating.trim().parse().ok()?;
    if !(1..=5).contains(&rating) {
        return None;
    }

    let review = review.trim();
    if review.is_empty() {
        return None;
    }

    Some((rating, review.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    println!("Connected to database!");

    // Read sample feedback from file
    let feedbacks_content = std::fs::read_to_string("feedbacks.txt")
        .expect("Failed to read feedbacks.txt - make sure it exists!");

    let mut count = 0;
    let mut skipped = 0;

    for line in feedbacks_content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((rating, review)) = parse_seed_line(line) else {
            println!("⊘ Skipped (malformed): {}", trimmed);
            skipped += 1;
            continue;
        };

        // Check if this review was already seeded
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM feedbacks WHERE review = $1)")
                .bind(&review)
                .fetch_one(&db)
                .await?;

        if exists {
            println!("⊘ Skipped (duplicate): {}", review);
            skipped += 1;
            continue;
        }

        sqlx::query("INSERT INTO feedbacks (rating, review) VALUES ($1, $2)")
            .bind(rating)
            .bind(&review)
            .execute(&db)
            .await?;

        count += 1;
        println!("✓ Loaded: {} stars - {}", rating, review);
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ Successfully loaded {} new feedbacks!", count);
    if skipped > 0 {
        println!("⊘ Skipped {} lines", skipped);
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_lines_parse() {
        assert_eq!(
            parse_seed_line("4|Great service, would come back"),
            Some((4, "Great service, would come back".to_string()))
        );
        assert_eq!(
            parse_seed_line("  1 |  terrible  "),
            Some((1, "terrible".to_string()))
        );
    }

    #[test]
    fn comments_and_blanks_are_skipped() {
        assert_eq!(parse_seed_line(""), None);
        assert_eq!(parse_seed_line("   "), None);
        assert_eq!(parse_seed_line("# 5|not a real line"), None);
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert_eq!(parse_seed_line("no separator here"), None);
        assert_eq!(parse_seed_line("six|review"), None);
        assert_eq!(parse_seed_line("0|review"), None);
        assert_eq!(parse_seed_line("9|review"), None);
        assert_eq!(parse_seed_line("3|   "), None);
    }
}
