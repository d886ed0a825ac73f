/// Search highlighting for the slot editors
/// Colours every occurrence of the last submitted query
use iced::advanced::text::highlighter::{self, Format};
use iced::{Color, Font, Theme};
use std::ops::Range;

use crate::state::bulk::find_matches;

/// Colour used for matches
const MATCH_COLOR: Color = Color {
    r: 1.0,
    g: 0.78,
    b: 0.0,
    a: 1.0,
};

/// Marker for a matched span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match;

/// Highlights occurrences of a fixed query, line by line.
///
/// Settings are the query itself; an empty query highlights nothing.
#[derive(Debug)]
pub struct QueryHighlighter {
    query: String,
    current_line: usize,
}

impl highlighter::Highlighter for QueryHighlighter {
    type Settings = String;
    type Highlight = Match;
    type Iterator<'a> = std::vec::IntoIter<(Range<usize>, Match)>;

    fn new(settings: &Self::Settings) -> Self {
        Self {
            query: settings.clone(),
            current_line: 0,
        }
    }

    fn update(&mut self, new_settings: &Self::Settings) {
        self.query = new_settings.clone();
        self.current_line = 0;
    }

    fn change_line(&mut self, line: usize) {
        self.current_line = line;
    }

    fn highlight_line(&mut self, line: &str) -> Self::Iterator<'_> {
        self.current_line += 1;
        find_matches(line, &self.query)
            .into_iter()
            .map(|range| (range, Match))
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn current_line(&self) -> usize {
        self.current_line
    }
}

/// Text format for a matched span
pub fn match_format(_highlight: &Match, _theme: &Theme) -> Format<Font> {
    Format {
        color: Some(MATCH_COLOR),
        font: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::advanced::text::highlighter::Highlighter;

    #[test]
    fn test_highlights_each_line_fresh() {
        let mut highlighter = QueryHighlighter::new(&"ab".to_string());

        let spans: Vec<_> = highlighter.highlight_line("ab xab").collect();
        assert_eq!(spans, vec![(0..2, Match), (4..6, Match)]);
        assert_eq!(highlighter.current_line(), 1);

        let spans: Vec<_> = highlighter.highlight_line("nothing").collect();
        assert!(spans.is_empty());
        assert_eq!(highlighter.current_line(), 2);
    }

    #[test]
    fn test_new_query_replaces_old() {
        let mut highlighter = QueryHighlighter::new(&"old".to_string());
        highlighter.change_line(5);
        highlighter.update(&"new".to_string());

        assert_eq!(highlighter.current_line(), 0);
        let spans: Vec<_> = highlighter.highlight_line("old new").collect();
        assert_eq!(spans, vec![(4..7, Match)]);
    }

    #[test]
    fn test_empty_query_highlights_nothing() {
        let mut highlighter = QueryHighlighter::new(&String::new());
        assert_eq!(highlighter.highlight_line("anything").count(), 0);
    }
}
