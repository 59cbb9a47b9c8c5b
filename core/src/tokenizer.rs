/// Split text into words on the ASCII space character.
///
/// Runs of spaces and leading/trailing spaces never yield empty tokens. Tabs,
/// newlines and punctuation stay inside tokens and no case folding is done.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(' ').filter(|word| !word.is_empty()).collect()
}
