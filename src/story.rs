/// One line of story content before analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub content: String,
    pub timestamp: Option<String>,
}

/// Splits story content into lines: one per subtitle block if the whole text is SRT, otherwise
/// one per non-empty text line.
pub fn split_content(content: &str) -> Vec<RawLine> {
    let normalized = content.replace("\r\n", "\n");
    read_srt(&normalized).unwrap_or_else(|| read_txt(&normalized))
}

fn read_srt(content: &str) -> Option<Vec<RawLine>> {
    let mut lines = Vec::new();

    for block in content.split("\n\n").map(str::trim).filter(|block| !block.is_empty()) {
        let rows: Vec<&str> = block.lines().map(str::trim).collect();
        if rows.len() < 3 || rows[0].parse::<u32>().is_err() || !rows[1].contains("-->") {
            return None;
        }

        let text = rows[2..].iter().filter(|row| !row.is_empty()).copied().collect::<Vec<_>>();
        lines.push(RawLine { content: text.join(" "), timestamp: Some(rows[1].to_string()) });
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines)
    }
}

fn read_txt(content: &str) -> Vec<RawLine> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| RawLine { content: line.to_string(), timestamp: None })
        .collect()
}
