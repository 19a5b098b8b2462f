use serde::{Deserialize, Serialize};

/// Which side of the text the padding goes on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Pad at the start, right-aligning the text
    #[default]
    Start,
    /// Pad at the end, left-aligning the text
    End,
}

/// True if `s` is empty or whitespace only.
pub fn is_empty_string(s: &str) -> bool {
    s.trim().is_empty()
}

/// Pads `s` with `fill` up to `length` characters.
///
/// Missing or blank input yields `fill` repeated `length` times. Text already
/// at least `length` characters long is returned unchanged.
pub fn pad_string(s: Option<&str>, length: usize, fill: char, alignment: Alignment) -> String {
    let Some(text) = s.filter(|text| !is_empty_string(text)) else {
        return std::iter::repeat_n(fill, length).collect();
    };

    let missing = length.saturating_sub(text.chars().count());
    let padding = std::iter::repeat_n(fill, missing);
    match alignment {
        Alignment::Start => padding.chain(text.chars()).collect(),
        Alignment::End => text.chars().chain(padding).collect(),
    }
}
