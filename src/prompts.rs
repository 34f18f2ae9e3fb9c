// prompts.rs

use crate::rss::NewsItem;

/// Single prompt covering every fetched headline. The model is asked to keep
/// the input order so that each response line can be matched back to the
/// headline it rates.
pub fn digest_prompt(items: &[NewsItem]) -> String {
    let mut prompt = String::from(
        "Rate each of the following crypto news headlines for importance as HIGH, MEDIUM or LOW
and write a short one-sentence summary. Respond with exactly one line per headline, in the
same order the headlines are given, formatted as: LEVEL | title | short summary

Do not add any preamble or explanation, just the formatted lines.

",
    );

    for item in items {
        prompt.push_str(&item.title);
        prompt.push('\n');
    }

    prompt
}
