//! Splits raw plan text into ordered meal-section blocks.
//!
//! The backend is instructed to separate recipes with a run of 50
//! dashes, but model output drifts, so the separator rule is a
//! tolerant heuristic rather than strict delimiter matching: any line
//! that is nothing but dashes and at least 10 characters long counts.

/// True when `line`, after trimming, consists entirely of dashes and
/// is at least 10 characters long.
fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 10 && trimmed.bytes().all(|b| b == b'-')
}

/// Close the current block if it holds any non-blank line.
///
/// Blocks that are blank-only (or empty) are discarded rather than
/// emitted, so consecutive separators do not produce empty sections.
fn flush(blocks: &mut Vec<String>, current: &mut Vec<&str>) {
    if current.iter().any(|line| !line.trim().is_empty()) {
        blocks.push(current.join("\n").trim().to_string());
    }
    current.clear();
}

/// Split raw plan text into an ordered sequence of non-empty blocks.
///
/// Lines between separators (or before the first / after the last)
/// accumulate into the current block; each returned block is the
/// trimmed join of its lines. Separator lines themselves never appear
/// in any block.
pub fn segment(raw: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in raw.lines() {
        if is_separator(line) {
            flush(&mut blocks, &mut current);
        } else {
            current.push(line);
        }
    }
    flush(&mut blocks, &mut current);

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_block_without_separators() {
        let blocks = segment("Scramble the eggs.\nServe hot.");
        assert_eq!(blocks, vec!["Scramble the eggs.\nServe hot."]);
    }

    #[test]
    fn splits_on_dash_separators() {
        let raw = "Breakfast recipe\n----------\nLunch recipe\n----------\nDinner recipe";
        let blocks = segment(raw);
        assert_eq!(blocks, vec!["Breakfast recipe", "Lunch recipe", "Dinner recipe"]);
    }

    #[test]
    fn k_separators_with_content_yield_k_plus_one_blocks() {
        let raw = "a\n----------\nb\n--------------------\nc\n".to_string()
            + &"-".repeat(50)
            + "\nd";
        assert_eq!(segment(&raw).len(), 4);
    }

    #[test]
    fn separator_requires_at_least_ten_dashes() {
        // 9 dashes is ordinary content, not a separator.
        let blocks = segment("a\n---------\nb");
        assert_eq!(blocks, vec!["a\n---------\nb"]);
    }

    #[test]
    fn separator_tolerates_surrounding_whitespace() {
        let blocks = segment("a\n   ------------   \nb");
        assert_eq!(blocks, vec!["a", "b"]);
    }

    #[test]
    fn mixed_characters_are_not_separators() {
        let blocks = segment("a\n-----=-----\nb");
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn blank_only_blocks_are_discarded() {
        let raw = "a\n----------\n   \n\n----------\nb";
        assert_eq!(segment(raw), vec!["a", "b"]);
    }

    #[test]
    fn leading_and_trailing_separators_produce_no_empty_blocks() {
        let raw = "----------\na\n----------";
        assert_eq!(segment(raw), vec!["a"]);
    }

    #[test]
    fn separator_lines_never_appear_in_blocks() {
        let raw = "a\n----------\nb";
        for block in segment(raw) {
            assert!(!block.contains("----------"), "block leaked separator: {block:?}");
        }
    }

    #[test]
    fn blocks_are_trimmed_joins() {
        let raw = "\n  first line\n  second line\n\n----------\nb";
        let blocks = segment(raw);
        assert_eq!(blocks[0], "first line\n  second line");
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(segment("").is_empty());
        assert!(segment("   \n  \n").is_empty());
    }

    #[test]
    fn only_separators_yield_no_blocks() {
        let raw = format!("{}\n{}", "-".repeat(50), "-".repeat(12));
        assert!(segment(&raw).is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let raw = "one\n----------\ntwo\n----------\nthree\n----------\nfour\n----------\nfive";
        assert_eq!(segment(raw), vec!["one", "two", "three", "four", "five"]);
    }
}
