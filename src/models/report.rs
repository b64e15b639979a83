//! Line-by-line presentation of backend-generated analytics and price
//! comparison text.

const HEADING_MARKERS: [&str; 4] = [
    "Загальний огляд",
    "Аналіз кожного товару",
    "Модель",
    "Рекомендації",
];

const EMPHASIS_MARKERS: [&str; 4] = ["Висока", "Преміум", "Середня", "маржинальність"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    /// Lines with figures or rating words, shown in bold
    Important,
    Plain,
}

impl LineKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Heading => "report-line report-heading",
            Self::Important => "report-line report-important",
            Self::Plain => "report-line",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub text: String,
    pub kind: LineKind,
}

impl ReportLine {
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim();

        let is_heading = trimmed.starts_with('#')
            || trimmed.starts_with("**")
            || HEADING_MARKERS.iter().any(|m| trimmed.contains(m));

        if is_heading {
            return Self {
                text: strip_markup(trimmed).to_string(),
                kind: LineKind::Heading,
            };
        }

        let is_important = trimmed.chars().any(|c| c.is_ascii_digit())
            || EMPHASIS_MARKERS.iter().any(|m| trimmed.contains(m));

        Self {
            text: line.trim_end().to_string(),
            kind: if is_important {
                LineKind::Important
            } else {
                LineKind::Plain
            },
        }
    }
}

/// Drops markdown heading hashes and surrounding bold markers.
fn strip_markup(line: &str) -> &str {
    let line = line.trim_start_matches('#').trim();
    let line = line.strip_prefix("**").unwrap_or(line);
    let line = line.strip_suffix("**").unwrap_or(line);
    line.trim()
}

/// Splits report text into classified lines, keeping blank lines as spacers.
pub fn format_report(text: &str) -> Vec<ReportLine> {
    text.lines().map(ReportLine::classify).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_headings() {
        let line = ReportLine::classify("## Підсумок");
        assert_eq!(line.kind, LineKind::Heading);
        assert_eq!(line.text, "Підсумок");

        let line = ReportLine::classify("**Висновок**");
        assert_eq!(line.kind, LineKind::Heading);
        assert_eq!(line.text, "Висновок");
    }

    #[test]
    fn test_keyword_headings() {
        assert_eq!(
            ReportLine::classify("Рекомендації щодо цін").kind,
            LineKind::Heading
        );
    }

    #[test]
    fn test_important_lines() {
        assert_eq!(
            ReportLine::classify("- Ціна 3899 грн").kind,
            LineKind::Important
        );
        assert_eq!(
            ReportLine::classify("Висока конкуренція").kind,
            LineKind::Important
        );
        assert_eq!(ReportLine::classify("звичайний рядок").kind, LineKind::Plain);
    }

    #[test]
    fn test_format_report_keeps_blank_lines() {
        let lines = format_report("# Огляд\n\nтекст");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text, "");
        assert_eq!(lines[1].kind, LineKind::Plain);
    }
}
