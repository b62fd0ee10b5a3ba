use crate::catalog::FontStyle;
use crate::config::SUPPORTED_FONT_EXTENSIONS;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static FONT_EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.(ttf|otf)$").unwrap());

pub fn is_supported_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext_str| SUPPORTED_FONT_EXTENSIONS.contains(&ext_str.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Filename-derived metadata for an uploaded font file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFontName {
    pub family: String,
    pub weight: u16,
    pub style: FontStyle,
}

/// Parses (family, weight, style) out of a font file name.
///
/// Understands the common naming shapes: `Family-Regular.ttf`,
/// `Family-Bold.otf`, `Family-700-Italic.ttf`, `Family_400_italic.ttf`,
/// `Family-BoldItalic.ttf`.
pub fn parse_font_filename(filename: &str) -> ParsedFontName {
    let stem = FONT_EXTENSION.replace(filename, "");
    let parts: Vec<&str> = stem
        .split(['-', '_', ' '])
        .filter(|part| !part.is_empty())
        .collect();

    let mut family = parts.first().copied().unwrap_or("Unknown Font").to_string();
    let mut weight = 400;
    let mut style = FontStyle::Normal;

    for (i, part) in parts.iter().enumerate().skip(1) {
        let lower = part.to_lowercase();

        // "BoldItalic" and friends carry both pieces in one token.
        let mut token = lower.as_str();
        let mut italic = false;
        if let Some(rest) = token.strip_suffix("italic") {
            token = rest;
            italic = true;
        } else if let Some(rest) = token.strip_suffix("oblique") {
            token = rest;
            italic = true;
        }
        if italic {
            style = FontStyle::Italic;
        }
        if token.is_empty() {
            continue;
        }

        if let Ok(numeric) = token.parse::<u16>() {
            if (100..=900).contains(&numeric) {
                weight = numeric;
                continue;
            }
        }

        if let Some(named) = weight_from_name(token) {
            weight = named;
            continue;
        }

        // An unrecognized second token is taken as part of a multi-word
        // family name.
        if i == 1 && !italic {
            family.push(' ');
            family.push_str(part);
        }
    }

    ParsedFontName {
        family,
        weight,
        style,
    }
}

fn weight_from_name(token: &str) -> Option<u16> {
    let weight = match token {
        "thin" => 100,
        "extralight" | "ultralight" => 200,
        "light" => 300,
        "regular" | "normal" => 400,
        "medium" => 500,
        "semibold" | "demibold" => 600,
        "bold" => 700,
        "extrabold" | "ultrabold" => 800,
        "black" | "heavy" => 900,
        _ => return None,
    };
    Some(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parsed(family: &str, weight: u16, style: FontStyle) -> ParsedFontName {
        ParsedFontName {
            family: family.to_string(),
            weight,
            style,
        }
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(is_supported_font_file(&PathBuf::from("Inter-Regular.ttf")));
        assert!(is_supported_font_file(&PathBuf::from("Inter-Regular.OTF")));
        assert!(!is_supported_font_file(&PathBuf::from("Inter-Regular.woff2")));
        assert!(!is_supported_font_file(&PathBuf::from("README")));
    }

    #[test]
    fn plain_regular_file() {
        assert_eq!(
            parse_font_filename("Inter-Regular.ttf"),
            parsed("Inter", 400, FontStyle::Normal)
        );
    }

    #[test]
    fn named_weight() {
        assert_eq!(
            parse_font_filename("Inter-Bold.ttf"),
            parsed("Inter", 700, FontStyle::Normal)
        );
        assert_eq!(
            parse_font_filename("Inter-SemiBold.otf"),
            parsed("Inter", 600, FontStyle::Normal)
        );
    }

    #[test]
    fn numeric_weight_and_italic_token() {
        assert_eq!(
            parse_font_filename("Inter-700-Italic.ttf"),
            parsed("Inter", 700, FontStyle::Italic)
        );
        assert_eq!(
            parse_font_filename("Inter_400_italic.ttf"),
            parsed("Inter", 400, FontStyle::Italic)
        );
    }

    #[test]
    fn combined_weight_and_style_token() {
        assert_eq!(
            parse_font_filename("Inter-BoldItalic.ttf"),
            parsed("Inter", 700, FontStyle::Italic)
        );
    }

    #[test]
    fn oblique_counts_as_italic() {
        assert_eq!(
            parse_font_filename("Inter-Oblique.ttf"),
            parsed("Inter", 400, FontStyle::Italic)
        );
    }

    #[test]
    fn multi_word_family_name() {
        assert_eq!(
            parse_font_filename("Source Serif-Bold.ttf"),
            parsed("Source Serif", 700, FontStyle::Normal)
        );
    }

    #[test]
    fn out_of_range_numbers_are_not_weights() {
        assert_eq!(
            parse_font_filename("Station-2000.ttf"),
            parsed("Station 2000", 400, FontStyle::Normal)
        );
    }
}
