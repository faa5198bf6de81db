use crate::config::LayoutConfig;

/// Estimated rendered width of `text` at the base label font.
pub(super) fn estimate_width(text: &str, config: &LayoutConfig) -> f64 {
    text.chars().count() as f64 * config.char_width
}

fn joined_width(words: &[&str], config: &LayoutConfig) -> f64 {
    estimate_width(&words.join(" "), config)
}

/// Whether the longest word of `label` fails to fit across `width`.
pub(super) fn longest_word_overflows(label: &str, width: f64, config: &LayoutConfig) -> bool {
    let longest = label
        .split_whitespace()
        .map(|word| word.chars().count())
        .max()
        .unwrap_or(0);
    longest as f64 * config.char_width >= width - config.rotate_margin
}

/// Rotate only when a single word cannot fit horizontally and the room is
/// taller than wide.
pub(super) fn should_rotate(label: &str, width: f64, height: f64, config: &LayoutConfig) -> bool {
    longest_word_overflows(label, width, config) && height > width
}

/// Splits `words` into display lines for a label that does not fit on one
/// line of `available` pixels. A two-word label may still share one line if
/// it fits the `relaxed` width.
pub(super) fn plan_lines(
    words: &[&str],
    available: f64,
    relaxed: f64,
    config: &LayoutConfig,
) -> Vec<String> {
    let fits = |chunk: &[&str]| joined_width(chunk, config) <= available;
    let groups: Vec<&[&str]> = match words.len() {
        0 | 1 => vec![words],
        2 => {
            let each_fits = words
                .iter()
                .all(|word| estimate_width(word, config) <= available);
            if each_fits && joined_width(words, config) <= relaxed {
                vec![words]
            } else {
                vec![&words[..1], &words[1..]]
            }
        }
        3 => vec![&words[..1], &words[1..2], &words[2..]],
        4 => {
            if fits(&words[..2]) && fits(&words[2..]) {
                vec![&words[..2], &words[2..]]
            } else {
                vec![&words[..1], &words[1..3], &words[3..]]
            }
        }
        5 | 6 => {
            let mid = words.len() / 2;
            if fits(&words[..mid]) && fits(&words[mid..]) {
                vec![&words[..mid], &words[mid..]]
            } else {
                let third = words.len() / 3;
                vec![&words[..third], &words[third..2 * third], &words[2 * third..]]
            }
        }
        n => {
            let quarter = n / 4;
            vec![
                &words[..quarter],
                &words[quarter..2 * quarter],
                &words[2 * quarter..3 * quarter],
                &words[3 * quarter..],
            ]
        }
    };
    groups.into_iter().map(|group| group.join(" ")).collect()
}

/// English ordinal, e.g. `1st`, `12th`, `23rd`.
pub fn ordinal(n: u32) -> String {
    let suffix = if (10..=20).contains(&(n % 100)) {
        "th"
    } else {
        match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{n}{suffix}")
}

pub fn floor_title(building: &str, floor: u32) -> String {
    format!("{building} - {} Floor", ordinal(floor))
}
