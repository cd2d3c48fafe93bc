use chrono::NaiveDate;

use crate::models::NormalizedMessage;

const SLUG_CHARS: usize = 30;
const FALLBACK_SLUG: &str = "conversation";

/// File-name-safe slug from the start of `content`.
///
/// Takes the first 30 characters, turns every run of non-ASCII-alphanumeric characters
/// into one hyphen and trims hyphens from both ends. Falls back to `conversation` when
/// nothing is left.
pub fn slugify(content: &str) -> String {
    let mut slug = String::with_capacity(SLUG_CHARS);
    for c in content.chars().take(SLUG_CHARS) {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_end_matches('-');
    if slug.is_empty() { FALLBACK_SLUG.to_string() } else { slug.to_string() }
}

/// Archive entry name `NNN-YYYY-MM-DD-slug.json` for the `index`-th (1-based)
/// conversation, slugged from its first message
pub fn backup_entry_name(index: usize, date: NaiveDate, messages: &[NormalizedMessage]) -> String {
    let slug = messages.first().map_or_else(|| FALLBACK_SLUG.to_string(), |m| slugify(&m.content));
    format!("{:03}-{}-{}.json", index, date.format("%Y-%m-%d"), slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageType;

    #[test]
    fn test_slugify_collapses_and_trims() {
        assert_eq!(slugify("How do I fix: the   build?"), "How-do-I-fix-the-build");
        assert_eq!(slugify("--leading and trailing--"), "leading-and-trailing");
    }

    #[test]
    fn test_slugify_truncates_before_replacing() {
        let slug = slugify("abcdefghij klmnopqrst uvwxyzABCDEFG");
        assert_eq!(slug, "abcdefghij-klmnopqrst-uvwxyzAB");
        assert_eq!(slugify(&format!("{}!x", "a".repeat(29))), "a".repeat(29));
    }

    #[test]
    fn test_slugify_non_ascii_is_replaced() {
        assert_eq!(slugify("café crème"), "caf-cr-me");
    }

    #[test]
    fn test_slugify_fallback() {
        assert_eq!(slugify(""), "conversation");
        assert_eq!(slugify("!!! ???"), "conversation");
    }

    #[test]
    fn test_backup_entry_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let messages = vec![NormalizedMessage {
            uuid: None,
            message_type: MessageType::User,
            timestamp: None,
            content: "Refactor the parser".to_string(),
            parent_uuid: None,
            cwd: None,
            git_branch: None,
            is_meta: false,
        }];

        assert_eq!(backup_entry_name(1, date, &messages), "001-2024-03-07-Refactor-the-parser.json");
        assert_eq!(backup_entry_name(42, date, &[]), "042-2024-03-07-conversation.json");
    }
}
