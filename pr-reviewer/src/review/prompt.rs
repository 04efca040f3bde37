//! Prompt builders for the review step.
//!
//! The system instruction is fixed; the user message embeds PR metadata and
//! the diff verbatim.

use crate::types::PrMetadata;

/// Headings the model is asked to cover, in order.
pub const REVIEW_SECTIONS: [&str; 6] = [
    "Summary of changes",
    "High priority issues (bugs, security)",
    "Code-style / maintainability suggestions",
    "Performance concerns",
    "Small concrete suggested fixes or code examples",
    "A short checklist for the author",
];

/// Builds the fixed system instruction.
pub fn build_system_prompt() -> String {
    let mut s = String::new();
    s.push_str("You are an expert senior software engineer. Given a git diff for a pull request,\n");
    s.push_str("produce a clear, structured code review covering:\n");
    for (i, section) in REVIEW_SECTIONS.iter().enumerate() {
        s.push_str(&format!("{}) {}\n", i + 1, section));
    }
    s
}

/// Builds the user message: title, body, the diff, and output instructions.
pub fn build_user_prompt(diff: &str, meta: &PrMetadata) -> String {
    let mut s = String::with_capacity(diff.len() + 256);
    s.push_str("PR Title: ");
    s.push_str(&meta.title);
    s.push_str("\nPR Body: ");
    s.push_str(&meta.body);
    s.push_str("\n\nDiff:\n");
    s.push_str(diff);
    s.push_str("\n\nProvide the review as markdown, with headings and bullet points.");
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_embeds_title_and_diff_verbatim() {
        let diff = "+added line\n-removed line";
        let meta = PrMetadata {
            title: "Fix bug".into(),
            body: String::new(),
        };

        let user = build_user_prompt(diff, &meta);

        assert!(user.contains("Fix bug"));
        assert!(user.contains(diff));
        assert!(user.contains("PR Body: \n"));
    }

    #[test]
    fn system_prompt_names_all_sections() {
        let system = build_system_prompt();

        for marker in [
            "Summary",
            "High priority issues",
            "maintainability",
            "Performance",
            "suggested fixes",
            "checklist",
        ] {
            assert!(system.contains(marker), "missing section marker {marker:?}");
        }
        for n in 1..=6 {
            assert!(system.contains(&format!("{n}) ")));
        }
    }

    #[test]
    fn diff_with_markdown_fences_is_not_escaped() {
        let diff = "+```rust\n+fn x() {}\n+```";
        let meta = PrMetadata {
            title: "T".into(),
            body: "B".into(),
        };
        assert!(build_user_prompt(diff, &meta).contains(diff));
    }
}
