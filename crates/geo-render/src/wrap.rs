//! Text measurement and greedy word wrap for the standard Helvetica faces.
//!
//! Widths come from the Helvetica AFM metrics (units of 1/1000 em). The bold
//! face is approximated by scaling the regular widths, which is close enough
//! for column fitting and right alignment.

use crate::layout::FontWeight;

/// Millimetres per PDF point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

const BOLD_SCALE: f32 = 1.06;

/// Helvetica advance widths for ASCII 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :;<=>?@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [\]^_`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {|}~
];

fn char_width(c: char) -> u16 {
    let code = c as u32;
    if (32..=126).contains(&code) {
        HELVETICA_WIDTHS[(code - 32) as usize]
    } else {
        556
    }
}

/// Width of `text` in millimetres at `size` points.
pub fn text_width(text: &str, size: f32, weight: FontWeight) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();
    let scale = match weight {
        FontWeight::Regular => 1.0,
        FontWeight::Bold => BOLD_SCALE,
    };
    units as f32 / 1000.0 * size * MM_PER_PT * scale
}

/// Greedy word wrap to `max_width` millimetres.
///
/// Words are packed onto a line until the next one would overflow. A
/// single word wider than the line is broken by character. Explicit line
/// breaks in the input are kept. Empty input gives no lines.
pub fn wrap_text(text: &str, max_width: f32, size: f32, weight: FontWeight) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };

            if text_width(&candidate, size, weight) <= max_width {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }

            if text_width(word, size, weight) <= max_width {
                line = word.to_string();
            } else {
                for c in word.chars() {
                    line.push(c);
                    if text_width(&line, size, weight) > max_width && line.chars().count() > 1 {
                        line.pop();
                        lines.push(std::mem::take(&mut line));
                        line.push(c);
                    }
                }
            }
        }

        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_scale_with_size() {
        let small = text_width("Invoice", 10.0, FontWeight::Regular);
        let large = text_width("Invoice", 20.0, FontWeight::Regular);
        assert!((large - 2.0 * small).abs() < 0.001);
        assert!(text_width("Invoice", 10.0, FontWeight::Bold) > small);
        assert_eq!(text_width("", 10.0, FontWeight::Regular), 0.0);
    }

    #[test]
    fn test_short_text_is_one_line() {
        let lines = wrap_text("Slim Fit Jeans", 40.0, 10.0, FontWeight::Regular);
        assert_eq!(lines, vec!["Slim Fit Jeans"]);
    }

    #[test]
    fn test_wrap_is_greedy_and_fits() {
        let text = "Premium cotton t-shirt with reinforced seams and a relaxed fit for summer";
        let lines = wrap_text(text, 40.0, 10.0, FontWeight::Regular);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 10.0, FontWeight::Regular) <= 40.0);
        }
        assert_eq!(lines.join(" "), text);

        // Greedy: the first word of each following line would not have fit.
        for pair in lines.windows(2) {
            let first_next = pair[1].split(' ').next().unwrap();
            let joined = format!("{} {first_next}", pair[0]);
            assert!(text_width(&joined, 10.0, FontWeight::Regular) > 40.0);
        }
    }

    #[test]
    fn test_long_word_is_broken() {
        let word = "W".repeat(40);
        let lines = wrap_text(&word, 20.0, 10.0, FontWeight::Regular);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_empty_and_newlines() {
        assert!(wrap_text("", 50.0, 10.0, FontWeight::Regular).is_empty());
        assert_eq!(
            wrap_text("first\nsecond", 50.0, 10.0, FontWeight::Regular),
            vec!["first", "second"]
        );
    }
}
